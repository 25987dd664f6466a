//! Error types for seqspec
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for seqspec operations
#[derive(Debug, Error)]
pub enum SeqSpecError {
    /// Assay / library structure lookup errors
    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    /// Coordinate arithmetic errors
    #[error("Coordinate error: {0}")]
    Coordinate(#[from] CoordinateError),

    /// Read-to-region mapping errors
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Index formatting errors
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Spec file loading errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
}

/// Errors raised while navigating or editing an assay
#[derive(Debug, Error)]
pub enum SpecError {
    /// Modality is not listed in the assay
    #[error("Modality '{0}' does not exist")]
    ModalityNotFound(String),

    /// Top-level region does not carry the modality as its id
    #[error("Top-level region id '{region_id}' does not correspond to modality '{modality}'")]
    ModalityMismatch { region_id: String, modality: String },

    /// Read id is not part of the sequence spec
    #[error("read_id {0} not found in reads")]
    ReadNotFound(String),

    /// Insertion anchor does not exist under the modality root
    #[error("No region with id '{after}' found under modality '{modality}'")]
    AnchorNotFound { after: String, modality: String },
}

/// Errors that can occur during coordinate arithmetic
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    /// Difference requested between two overlapping, non-identical intervals
    #[error("Difference is not defined for overlapping coordinates {a} [{a_start}, {a_stop}) and {b} [{b_start}, {b_stop})")]
    Overlapping {
        a: String,
        a_start: u64,
        a_stop: u64,
        b: String,
        b_start: u64,
        b_stop: u64,
    },
}

/// Errors that can occur while mapping reads onto the library structure
#[derive(Debug, Error)]
pub enum MappingError {
    /// Primer id is not a leaf of the modality tree
    #[error("Primer '{primer_id}' of read '{read_id}' is not a leaf region of '{modality}'")]
    PrimerNotFound {
        read_id: String,
        primer_id: String,
        modality: String,
    },

    /// Region id does not exist in the modality tree
    #[error("Region '{region_id}' not found in '{modality}'")]
    RegionNotFound { region_id: String, modality: String },

    /// Underlying assay lookup failed
    #[error(transparent)]
    Spec(#[from] SpecError),
}

/// Errors that can occur while rendering an index for a downstream tool
#[derive(Debug, Error)]
pub enum FormatError {
    /// Tool name is not one of the supported formats
    #[error("Unknown format '{0}'")]
    UnknownFormat(String),

    /// The tool cannot express this many input files for one element class
    #[error("{tool} only supports {what} from {max} fastq(s), got {got}")]
    Capacity {
        tool: &'static str,
        what: &'static str,
        max: usize,
        got: usize,
    },

    /// A region class the tool needs is absent from every coordinate list
    #[error("{tool} requires at least one {region_type} region")]
    MissingRegion {
        tool: &'static str,
        region_type: String,
    },

    /// Tool needs a target region type but none was supplied
    #[error("{0} requires a subregion type")]
    MissingSubregionType(&'static str),

    /// Relative offsets could not be computed
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

/// Errors that can occur while reading a spec file
#[derive(Debug, Error)]
pub enum LoadError {
    /// File not found
    #[error("Spec file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// YAML could not be decoded into an assay
    #[error("Invalid spec YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error during reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for seqspec operations
pub type Result<T> = std::result::Result<T, SeqSpecError>;

/// Result type alias for assay lookups
pub type SpecResult<T> = std::result::Result<T, SpecError>;

/// Result type alias for coordinate arithmetic
pub type CoordinateResult<T> = std::result::Result<T, CoordinateError>;

/// Result type alias for mapping operations
pub type MappingResult<T> = std::result::Result<T, MappingError>;

/// Result type alias for formatting operations
pub type FormatResult<T> = std::result::Result<T, FormatError>;

/// Result type alias for spec loading
pub type LoadResult<T> = std::result::Result<T, LoadError>;
