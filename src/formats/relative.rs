//! Element offsets relative to linkers
//!
//! For every non-linker element of a read, the gap to each linker of the
//! same read and whether the element lies upstream (`-`) or downstream (`+`)
//! of it: `<obj_id>\t<linker_id>\t<gap_start>\t<gap_stop>\t<loc>`. Every
//! line, the last included, ends with `\n`.

use crate::core::{Coordinate, CoordinateResult, FormatResult, RegionCoordinate, RegionCoordinateDifference};

pub(crate) const ANCHOR_TYPE: &str = "linker";

/// Differences of every `obj` against every `fixed` in `rcs`, for the pairs
/// where `keep(obj, fixed)` holds
pub fn compute_relative<F>(rcs: &[RegionCoordinate], keep: F) -> CoordinateResult<Vec<RegionCoordinateDifference>>
where
    F: Fn(&RegionCoordinate, &RegionCoordinate) -> bool,
{
    let mut out = Vec::new();
    for obj in rcs {
        for fixed in rcs {
            if keep(obj, fixed) {
                out.push(RegionCoordinateDifference::new(obj.clone(), fixed.clone())?);
            }
        }
    }
    Ok(out)
}

/// Differences of every non-linker element against every linker of `rcs`
pub(crate) fn linker_differences(rcs: &[RegionCoordinate]) -> CoordinateResult<Vec<RegionCoordinateDifference>> {
    compute_relative(rcs, |obj, fixed| {
        obj.region_type != ANCHOR_TYPE && fixed.region_type == ANCHOR_TYPE
    })
}

pub fn format_relative(indices: &[Coordinate]) -> FormatResult<String> {
    let mut out = String::new();
    for coord in indices {
        let mut diffs = linker_differences(&coord.rcv)?;
        diffs.sort_by(|a, b| a.obj.region_type.cmp(&b.obj.region_type));
        for d in &diffs {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                d.obj.region_id, d.fixed.region_id, d.diff.start, d.diff.stop, d.loc
            ));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{project_regions_to_coordinates, Region, Strand};

    #[test]
    fn test_relative_split_pool() {
        // umi - bc2 - linker - bc1
        let regions = [
            Region::random("umi", "umi", 10, 10),
            Region::random("bc2", "barcode", 8, 8),
            Region::fixed("linker1", "linker", "ATCCACGT"),
            Region::random("bc1", "barcode", 8, 8),
        ];
        let rcv = project_regions_to_coordinates(regions.iter());
        let out = format_relative(&[Coordinate::new("R2", rcv, Strand::Pos)]).unwrap();
        assert_eq!(
            out,
            "bc2\tlinker1\t18\t18\t-\nbc1\tlinker1\t26\t26\t+\numi\tlinker1\t10\t18\t-\n"
        );
    }

    #[test]
    fn test_relative_without_linker_is_empty() {
        let regions = [Region::random("bc", "barcode", 16, 16), Region::random("umi", "umi", 12, 12)];
        let rcv = project_regions_to_coordinates(regions.iter());
        assert_eq!(format_relative(&[Coordinate::new("R1", rcv, Strand::Pos)]).unwrap(), "");
    }
}
