//! Assay: modalities, their library structures, and the reads that sequence them

use crate::core::error::{SpecError, SpecResult};
use crate::core::read::Read;
use crate::core::region::Region;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assay {
    #[serde(default)]
    pub seqspec_version: Option<String>,
    pub assay_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub doi: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    pub modalities: Vec<String>,
    #[serde(default)]
    pub lib_struct: String,
    /// Reads, in spec order
    #[serde(default)]
    pub sequence_spec: Vec<Read>,
    /// One root region per modality, in `modalities` order
    #[serde(default)]
    pub library_spec: Vec<Region>,
}

impl Assay {
    pub fn new(assay_id: &str, modalities: Vec<String>, library_spec: Vec<Region>, sequence_spec: Vec<Read>) -> Self {
        Self {
            assay_id: assay_id.to_string(),
            name: assay_id.to_string(),
            modalities,
            library_spec,
            sequence_spec,
            ..Self::default()
        }
    }

    pub fn list_modalities(&self) -> &[String] {
        &self.modalities
    }

    /// Re-derive sequence and lengths of every modality tree
    pub fn update_spec(&mut self) {
        for r in &mut self.library_spec {
            r.update_attr();
        }
    }

    fn libspec_index(&self, modality: &str) -> SpecResult<usize> {
        let idx = self
            .modalities
            .iter()
            .position(|m| m == modality)
            .ok_or_else(|| SpecError::ModalityNotFound(modality.to_string()))?;
        let root = self
            .library_spec
            .get(idx)
            .ok_or_else(|| SpecError::ModalityNotFound(modality.to_string()))?;
        if root.region_id != modality {
            return Err(SpecError::ModalityMismatch {
                region_id: root.region_id.clone(),
                modality: modality.to_string(),
            });
        }
        Ok(idx)
    }

    /// Root region of `modality`
    ///
    /// The modality must be listed and its root must carry the modality name
    /// as `region_id`.
    pub fn get_libspec(&self, modality: &str) -> SpecResult<&Region> {
        let idx = self.libspec_index(modality)?;
        Ok(&self.library_spec[idx])
    }

    pub fn get_libspec_mut(&mut self, modality: &str) -> SpecResult<&mut Region> {
        let idx = self.libspec_index(modality)?;
        Ok(&mut self.library_spec[idx])
    }

    /// Reads of `modality`, in spec order
    pub fn get_seqspec(&self, modality: &str) -> Vec<&Read> {
        self.sequence_spec
            .iter()
            .filter(|r| r.modality == modality)
            .collect()
    }

    pub fn get_read(&self, read_id: &str) -> SpecResult<&Read> {
        self.sequence_spec
            .iter()
            .find(|r| r.read_id == read_id)
            .ok_or_else(|| SpecError::ReadNotFound(read_id.to_string()))
    }

    /// Insert `regions` as children of the modality root
    ///
    /// With `after`, they go right after that child; otherwise at the front.
    /// The modality tree is re-derived afterwards.
    pub fn insert_regions(&mut self, regions: Vec<Region>, modality: &str, after: Option<&str>) -> SpecResult<()> {
        let root = self.get_libspec_mut(modality)?;
        let insert_idx = match after {
            Some(after) => {
                root.regions
                    .iter()
                    .position(|r| r.region_id == after)
                    .ok_or_else(|| SpecError::AnchorNotFound {
                        after: after.to_string(),
                        modality: modality.to_string(),
                    })?
                    + 1
            }
            None => 0,
        };
        root.regions.splice(insert_idx..insert_idx, regions);
        root.update_attr();
        Ok(())
    }

    /// Insert `reads` into the sequence spec, assigning them to `modality`
    ///
    /// With `after`, they go right after that read (or at the end when it is
    /// not found); otherwise at the front.
    pub fn insert_reads(&mut self, reads: Vec<Read>, modality: &str, after: Option<&str>) -> SpecResult<()> {
        if !self.modalities.iter().any(|m| m == modality) {
            return Err(SpecError::ModalityNotFound(modality.to_string()));
        }
        let insert_idx = match after {
            Some(after) => self
                .sequence_spec
                .iter()
                .position(|r| r.read_id == after)
                .map(|i| i + 1)
                .unwrap_or(self.sequence_spec.len()),
            None => 0,
        };
        let reads = reads.into_iter().map(|mut r| {
            r.modality = modality.to_string();
            r
        });
        self.sequence_spec.splice(insert_idx..insert_idx, reads);
        Ok(())
    }
}
