//! STARsolo barcode and UMI arguments
//!
//! `--soloType CB_UMI_Simple --soloCBstart <s> --soloCBlen <l> --soloUMIstart <s> --soloUMIlen <l>`
//! built from the first barcode and the first UMI across all reads. A missing
//! barcode or UMI is an error.

use super::Bucket;
use crate::core::{Coordinate, FormatError, FormatResult, RegionCoordinate};

fn first_of(indices: &[Coordinate], bucket: Bucket) -> Option<&RegionCoordinate> {
    indices
        .iter()
        .flat_map(|c| c.rcv.iter())
        .find(|cut| Bucket::of(cut) == bucket)
}

/// Starts are 1-based. `--soloCBlen` is the barcode stop, which equals its
/// length when the barcode sits at the start of the read.
pub fn format_starsolo(indices: &[Coordinate]) -> FormatResult<String> {
    let bc = first_of(indices, Bucket::Barcode).ok_or(FormatError::MissingRegion {
        tool: "starsolo",
        region_type: "barcode".to_string(),
    })?;
    let umi = first_of(indices, Bucket::Umi).ok_or(FormatError::MissingRegion {
        tool: "starsolo",
        region_type: "umi".to_string(),
    })?;
    Ok(format!(
        "--soloType CB_UMI_Simple --soloCBstart {} --soloCBlen {} --soloUMIstart {} --soloUMIlen {}",
        bc.start + 1,
        bc.stop,
        umi.start + 1,
        umi.stop - umi.start
    ))
}
