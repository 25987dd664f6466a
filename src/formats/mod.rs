//! Index formats for downstream tools
//!
//! Each tool consumes the per-read coordinate lists produced by
//! [`index_assay`](crate::core::index_assay) in its own string convention
//! (token order, separators, 0- or 1-based starts, sentinel values).

pub mod chromap;
pub mod kb;
pub mod relative;
pub mod seqkit;
pub mod simpleaf;
pub mod splitcode;
pub mod starsolo;
pub mod tab;
pub mod zumis;

pub use chromap::{format_chromap, stable_deduplicate};
pub use kb::{format_kallisto_bus, format_kallisto_bus_force_single};
pub use relative::{compute_relative, format_relative};
pub use seqkit::format_seqkit_subseq;
pub use simpleaf::format_simpleaf;
pub use splitcode::{filter_groupby_region_type, format_splitcode, groupby_region_id};
pub use starsolo::format_starsolo;
pub use tab::format_tab;
pub use zumis::format_zumis;

use crate::core::{Coordinate, FormatError, FormatResult, RegionCoordinate};

/// Supported index formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// Tab-separated table, one coordinate per line
    #[default]
    Tab,
    /// kallisto bus `-x` technology string
    Kb,
    /// kallisto bus, keeping only the longest feature
    KbSingle,
    /// STARsolo CB/UMI arguments
    Starsolo,
    /// simpleaf / salmon alevin fragment geometry
    Simpleaf,
    /// zUMIs base definitions
    Zumis,
    /// chromap read-format arguments
    Chromap,
    /// seqkit subseq range
    Seqkit,
    /// Offsets of elements relative to linkers
    Relative,
    /// splitcode `@extract` patterns and linker tag table
    Splitcode,
}

impl IndexFormat {
    pub const ALL: [IndexFormat; 10] = [
        IndexFormat::Chromap,
        IndexFormat::Kb,
        IndexFormat::KbSingle,
        IndexFormat::Relative,
        IndexFormat::Seqkit,
        IndexFormat::Simpleaf,
        IndexFormat::Splitcode,
        IndexFormat::Starsolo,
        IndexFormat::Tab,
        IndexFormat::Zumis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexFormat::Tab => "tab",
            IndexFormat::Kb => "kb",
            IndexFormat::KbSingle => "kb-single",
            IndexFormat::Starsolo => "starsolo",
            IndexFormat::Simpleaf => "simpleaf",
            IndexFormat::Zumis => "zumis",
            IndexFormat::Chromap => "chromap",
            IndexFormat::Seqkit => "seqkit",
            IndexFormat::Relative => "relative",
            IndexFormat::Splitcode => "splitcode",
        }
    }
}

impl std::str::FromStr for IndexFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndexFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s.to_lowercase())
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

impl std::fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `indices` for the tool selected by `format`
///
/// `subregion_type` is only read by [`IndexFormat::Seqkit`].
pub fn format_index(
    indices: &[Coordinate],
    format: IndexFormat,
    subregion_type: Option<&str>,
) -> FormatResult<String> {
    match format {
        IndexFormat::Tab => Ok(format_tab(indices)),
        IndexFormat::Kb => Ok(format_kallisto_bus(indices)),
        IndexFormat::KbSingle => Ok(format_kallisto_bus_force_single(indices)),
        IndexFormat::Starsolo => format_starsolo(indices),
        IndexFormat::Simpleaf => Ok(format_simpleaf(indices)),
        IndexFormat::Zumis => Ok(format_zumis(indices)),
        IndexFormat::Chromap => format_chromap(indices),
        IndexFormat::Seqkit => format_seqkit_subseq(indices, subregion_type),
        IndexFormat::Relative => format_relative(indices),
        IndexFormat::Splitcode => format_splitcode(indices),
    }
}

/// Semantic class of a coordinate, from its upper-cased region type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bucket {
    Barcode,
    Umi,
    Cdna,
    Gdna,
    Protein,
    Tag,
    Other,
}

impl Bucket {
    pub(crate) fn of(rc: &RegionCoordinate) -> Self {
        match rc.region_type.to_uppercase().as_str() {
            "BARCODE" => Bucket::Barcode,
            "UMI" => Bucket::Umi,
            "CDNA" => Bucket::Cdna,
            "GDNA" => Bucket::Gdna,
            "PROTEIN" => Bucket::Protein,
            "TAG" => Bucket::Tag,
            _ => Bucket::Other,
        }
    }

    /// Biological payload (as opposed to technical sequence)
    pub(crate) fn is_feature(&self) -> bool {
        matches!(self, Bucket::Cdna | Bucket::Gdna | Bucket::Protein | Bucket::Tag)
    }
}
