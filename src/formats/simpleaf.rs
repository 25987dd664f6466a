//! simpleaf fragment geometry
//!
//! Per read `i` (1-based): `i{` + `b[len]` / `u[len]` / `r[len]` tokens in
//! encounter order + `x:}`. Reads are concatenated without separator.

use super::Bucket;
use crate::core::Coordinate;

pub fn format_simpleaf(indices: &[Coordinate]) -> String {
    let mut out = String::new();
    for (idx, coord) in indices.iter().enumerate() {
        out.push_str(&format!("{}{{", idx + 1));
        for cut in &coord.rcv {
            let token = match Bucket::of(cut) {
                Bucket::Barcode => 'b',
                Bucket::Umi => 'u',
                Bucket::Cdna => 'r',
                _ => continue,
            };
            out.push_str(&format!("{}[{}]", token, cut.len()));
        }
        out.push_str("x:}");
    }
    out
}
