//! kallisto bus technology strings
//!
//! `bcs:umi:feature`, each group a comma-joined list of
//! `<read_index>,<start>,<stop>` triples. An absent barcode or UMI group is
//! written as the sentinel `-1,-1,-1`; an absent feature group is left empty.

use super::Bucket;
use crate::core::Coordinate;
use log::warn;

const MISSING: &str = "-1,-1,-1";

fn join_groups(mut bcs: Vec<String>, mut umi: Vec<String>, feature: Vec<String>) -> String {
    if umi.is_empty() {
        warn!("no UMI region in index, using {MISSING}");
        umi.push(MISSING.to_string());
    }
    if bcs.is_empty() {
        warn!("no barcode region in index, using {MISSING}");
        bcs.push(MISSING.to_string());
    }
    format!("{}:{}:{}", bcs.join(","), umi.join(","), feature.join(","))
}

pub fn format_kallisto_bus(indices: &[Coordinate]) -> String {
    let mut bcs = Vec::new();
    let mut umi = Vec::new();
    let mut feature = Vec::new();
    for (idx, coord) in indices.iter().enumerate() {
        for cut in &coord.rcv {
            let triple = format!("{},{},{}", idx, cut.start, cut.stop);
            match Bucket::of(cut) {
                Bucket::Barcode => bcs.push(triple),
                Bucket::Umi => umi.push(triple),
                b if b.is_feature() => feature.push(triple),
                _ => {}
            }
        }
    }
    join_groups(bcs, umi, feature)
}

/// Same as [`format_kallisto_bus`], but the feature group holds only the
/// longest feature (first one wins on ties)
pub fn format_kallisto_bus_force_single(indices: &[Coordinate]) -> String {
    let mut bcs = Vec::new();
    let mut umi = Vec::new();
    let mut longest: Option<(u64, String)> = None;
    for (idx, coord) in indices.iter().enumerate() {
        for cut in &coord.rcv {
            let triple = format!("{},{},{}", idx, cut.start, cut.stop);
            match Bucket::of(cut) {
                Bucket::Barcode => bcs.push(triple),
                Bucket::Umi => umi.push(triple),
                b if b.is_feature() => {
                    let len = cut.len();
                    if len > longest.as_ref().map_or(0, |(l, _)| *l) {
                        longest = Some((len, triple));
                    }
                }
                _ => {}
            }
        }
    }
    join_groups(bcs, umi, longest.into_iter().map(|(_, t)| t).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Region, RegionCoordinate, Strand};

    fn rc(id: &str, region_type: &str, start: u64, stop: u64) -> RegionCoordinate {
        RegionCoordinate::from_region(&Region::random(id, region_type, stop - start, stop - start), start, stop)
    }

    fn tenx_v3() -> Vec<Coordinate> {
        vec![
            Coordinate::new("R1", vec![rc("bc", "barcode", 0, 16), rc("umi", "umi", 16, 28)], Strand::Pos),
            Coordinate::new("R2", vec![rc("cdna", "cdna", 0, 90)], Strand::Neg),
        ]
    }

    #[test]
    fn test_kb_10x() {
        assert_eq!(format_kallisto_bus(&tenx_v3()), "0,0,16:0,16,28:1,0,90");
    }

    #[test]
    fn test_kb_sentinels() {
        let indices = vec![Coordinate::new("R1", vec![rc("gdna", "gDNA", 0, 50)], Strand::Pos)];
        assert_eq!(format_kallisto_bus(&indices), "-1,-1,-1:-1,-1,-1:0,0,50");
    }

    #[test]
    fn test_kb_single_keeps_longest() {
        let mut indices = tenx_v3();
        indices[0].rcv.push(rc("tag", "tag", 28, 38));
        assert_eq!(format_kallisto_bus(&indices), "0,0,16:0,16,28:0,28,38,1,0,90");
        assert_eq!(format_kallisto_bus_force_single(&indices), "0,0,16:0,16,28:1,0,90");
    }
}
