//! Core library-structure functionality
//!
//! This module contains the region tree, coordinate projection,
//! read mapping and spec loading.

mod assay;
mod coordinate;
pub mod dna;
mod error;
pub mod io;
mod mapper;
mod read;
mod region;

pub use assay::Assay;
pub use coordinate::{
    intersect_intervals, itx_read, project_regions_to_coordinates, Location,
    RegionCoordinate, RegionCoordinateDifference,
};
pub use error::{
    CoordinateError, CoordinateResult, FormatError, FormatResult, LoadError, LoadResult,
    MappingError, MappingResult, Result, SeqSpecError, SpecError, SpecResult,
};
pub use io::{detect_compression, load_spec, load_spec_reader, load_spec_str, CompressionFormat};
pub use mapper::{
    filter_index_no_overlap, get_coordinate_by_read_id, get_coordinate_by_region_id,
    get_coordinates_by_file_ids, index_assay, index_for_primer, index_for_region,
    map_read_to_regions, Coordinate, IndexSelector, QueryType,
};
pub use read::{File, Read, ReadPatch, Strand};
pub use region::{Onlist, Region, RegionPatch, SequenceType};
