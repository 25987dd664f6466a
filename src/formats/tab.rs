//! Tab-separated index table
//!
//! `<query_id>\t<name>\t<region_type>\t<start>\t<stop>` per coordinate,
//! 0-based half-open, no trailing newline.

use crate::core::Coordinate;

pub fn format_tab(indices: &[Coordinate]) -> String {
    indices
        .iter()
        .flat_map(|coord| {
            coord.rcv.iter().map(move |cut| {
                format!(
                    "{}\t{}\t{}\t{}\t{}",
                    coord.query_id, cut.name, cut.region_type, cut.start, cut.stop
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}
