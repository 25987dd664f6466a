//! zUMIs base definitions
//!
//! One block per read. Each line is `- BCS(<start>-<stop>)`, `- UMI(...)` or
//! `- cDNA(...)` with a 1-based start. Blocks are newline-joined and the
//! output has no trailing newline.

use super::Bucket;
use crate::core::Coordinate;

pub fn format_zumis(indices: &[Coordinate]) -> String {
    let blocks: Vec<String> = indices
        .iter()
        .map(|coord| {
            coord
                .rcv
                .iter()
                .filter_map(|cut| {
                    let label = match Bucket::of(cut) {
                        Bucket::Barcode => "BCS",
                        Bucket::Umi => "UMI",
                        Bucket::Cdna => "cDNA",
                        _ => return None,
                    };
                    Some(format!("- {}({}-{})\n", label, cut.start + 1, cut.stop))
                })
                .collect()
        })
        .collect();
    let mut out = blocks.join("\n");
    out.pop();
    out
}
