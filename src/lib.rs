//! seqspec - library structure indexing
//!
//! Describes the physical layout of a sequencing library (adapters,
//! barcodes, UMIs, inserts, primers) as a tree of [`Region`]s and derives
//! the coordinates downstream tools need to find each element inside raw
//! reads.
//!
//! # Features
//!
//! - Self-deriving region trees (sequence, length bounds, Newick)
//! - Strand-aware mapping of reads onto leaf regions
//! - Interval projection and clipping to read length
//! - Bit-exact index strings for kallisto bus, STARsolo, simpleaf, zUMIs,
//!   chromap and seqkit
//!
//! # Example
//!
//! ```
//! use seqspec::{index_for_primer, Read, Region, Strand};
//! use seqspec::formats::{format_index, IndexFormat};
//! use seqspec::core::Coordinate;
//!
//! let mut rna = Region::joined("rna", "rna", vec![
//!     Region::fixed("r1_primer", "custom_primer", "ACACTCTTTCCCTACACGACGCTCTTCCGATCT"),
//!     Region::random("barcode", "barcode", 16, 16),
//!     Region::random("umi", "umi", 12, 12),
//!     Region::random("cdna", "cdna", 1, 98),
//! ]);
//! rna.update_attr();
//!
//! let read = Read::new("R1", "rna", "r1_primer", 28, 28, Strand::Pos);
//! let (rcv, strand) = index_for_primer(&rna, &read)?;
//! let kb = format_index(&[Coordinate::new("R1", rcv, strand)], IndexFormat::Kb, None)?;
//! assert_eq!(kb, "0,0,16:0,16,28:");
//! # Ok::<(), seqspec::SeqSpecError>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    index_assay, index_for_primer, index_for_region, itx_read, load_spec,
    map_read_to_regions, project_regions_to_coordinates, Assay, Coordinate,
    CoordinateError, FormatError, IndexSelector, LoadError, MappingError, Read,
    Region, RegionCoordinate, RegionPatch, SeqSpecError, SequenceType, SpecError,
    Strand,
};
pub use formats::{format_index, IndexFormat};
