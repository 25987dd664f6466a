//! Sequencing reads
//!
//! A [`Read`] is positioned on the library structure by its primer: the leaf
//! region it starts sequencing from, and the strand it proceeds along.

use serde::{Deserialize, Serialize};

/// Direction a read proceeds relative to the library molecule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    /// Downstream of the primer
    #[default]
    Pos,
    /// Upstream of the primer, read outward
    Neg,
}

impl Strand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Pos => "pos",
            Strand::Neg => "neg",
        }
    }

    /// Convert to sign char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Pos => '+',
            Strand::Neg => '-',
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sequencing file (typically a fastq) attached to a read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub file_id: String,
    pub filename: String,
    #[serde(default)]
    pub filetype: String,
    #[serde(default)]
    pub filesize: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub urltype: String,
    #[serde(default)]
    pub md5: String,
}

impl File {
    /// File whose id and name are both `filename`
    pub fn local(filename: &str) -> Self {
        let filetype = filename
            .split_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default();
        Self {
            file_id: filename.to_string(),
            filename: filename.to_string(),
            filetype,
            urltype: "local".to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Read {
    pub read_id: String,
    pub name: String,
    pub modality: String,
    /// Must resolve to a leaf region id of the modality tree
    pub primer_id: String,
    pub min_len: u64,
    pub max_len: u64,
    pub strand: Strand,
    #[serde(default)]
    pub files: Vec<File>,
}

impl Read {
    pub fn new(
        read_id: &str,
        modality: &str,
        primer_id: &str,
        min_len: u64,
        max_len: u64,
        strand: Strand,
    ) -> Self {
        Self {
            read_id: read_id.to_string(),
            name: read_id.to_string(),
            modality: modality.to_string(),
            primer_id: primer_id.to_string(),
            min_len,
            max_len,
            strand,
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<File>) -> Self {
        self.files = files;
        self
    }

    /// Apply a partial update; unset fields are left untouched
    pub fn update_read(&mut self, patch: ReadPatch) {
        if let Some(v) = patch.read_id {
            self.read_id = v;
        }
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.modality {
            self.modality = v;
        }
        if let Some(v) = patch.primer_id {
            self.primer_id = v;
        }
        if let Some(v) = patch.min_len {
            self.min_len = v;
        }
        if let Some(v) = patch.max_len {
            self.max_len = v;
        }
        if let Some(v) = patch.strand {
            self.strand = v;
        }
        if let Some(v) = patch.files {
            self.files = v;
        }
    }

    /// `Some(self)` if one of the files has this id
    pub fn get_read_by_file_id(&self, file_id: &str) -> Option<&Read> {
        self.files
            .iter()
            .any(|f| f.file_id == file_id)
            .then_some(self)
    }
}

impl std::fmt::Display for Read {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, {}){}:{}",
            self.strand.to_char(),
            self.min_len,
            self.max_len,
            self.read_id,
            self.primer_id
        )
    }
}

/// Field-level update for a [`Read`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadPatch {
    pub read_id: Option<String>,
    pub name: Option<String>,
    pub modality: Option<String>,
    pub primer_id: Option<String>,
    pub min_len: Option<u64>,
    pub max_len: Option<u64>,
    pub strand: Option<Strand>,
    pub files: Option<Vec<File>>,
}
