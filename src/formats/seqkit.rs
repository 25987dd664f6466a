//! seqkit subseq range
//!
//! `start:stop`, 1-based and inclusive, of the first element whose region
//! type matches the requested subregion type. No trailing newline.

use crate::core::{Coordinate, FormatError, FormatResult};

/// seqkit subseq range `start:stop` (1-based, inclusive) of the first
/// coordinate whose region type is `subregion_type`
pub fn format_seqkit_subseq(indices: &[Coordinate], subregion_type: Option<&str>) -> FormatResult<String> {
    let target = subregion_type.ok_or(FormatError::MissingSubregionType("seqkit"))?;
    indices
        .iter()
        .flat_map(|c| c.rcv.iter())
        .find(|cut| cut.region_type == target)
        .map(|cut| format!("{}:{}", cut.start + 1, cut.stop))
        .ok_or_else(|| FormatError::MissingRegion {
            tool: "seqkit",
            region_type: target.to_string(),
        })
}
