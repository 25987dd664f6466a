//! splitcode extraction config
//!
//! Two sections, every line ending with `\n`:
//!
//! 1. `@extract` lines. Each barcode, UMI or cDNA element becomes a pattern
//!    anchored on the nearest linker on either side. Patterns are emitted for
//!    four orientations (forward, complement, reverse, reverse complement),
//!    one line per region type within each orientation.
//! 2. A `groups\tids\ttags\tdistances\tlocations` table per read, listing
//!    every linker of the read in the same four orientations.

use super::relative::{linker_differences, ANCHOR_TYPE};
use crate::core::dna::{complement_sequence, revcomp};
use crate::core::{Coordinate, FormatResult, Location, RegionCoordinate, RegionCoordinateDifference};

const EXTRACTED_TYPES: [&str; 3] = ["umi", "barcode", "cdna"];
const CDNA_TYPE: &str = "cdna";
const TAG_DISTANCES: &str = "3:3:3";
const TAG_LOCATIONS: &str = "0:0:0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Forward,
    Complement,
    Reverse,
    ReverseComplement,
}

impl Orientation {
    const ALL: [Orientation; 4] = [
        Orientation::Forward,
        Orientation::Complement,
        Orientation::Reverse,
        Orientation::ReverseComplement,
    ];

    /// Prefix of an extracted element tag, `<prefix_...>`
    fn element_prefix(&self) -> &'static str {
        match self {
            Orientation::Forward => "f",
            Orientation::Complement => "~c",
            Orientation::Reverse => "r",
            Orientation::ReverseComplement => "~rc",
        }
    }

    /// Suffix appended to a linker id, `{<id><suffix>}`
    fn linker_suffix(&self) -> &'static str {
        match self {
            Orientation::Forward => "f",
            Orientation::Complement => "c",
            Orientation::Reverse => "r",
            Orientation::ReverseComplement => "rc",
        }
    }

    fn is_reverse(&self) -> bool {
        matches!(self, Orientation::Reverse | Orientation::ReverseComplement)
    }
}

/// Position of an element among the extracted elements of a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    First,
    Middle,
    Last,
}

impl Position {
    /// A read with a single element treats it as last
    fn of(idx: usize, len: usize) -> Self {
        if idx + 1 == len {
            Position::Last
        } else if idx == 0 {
            Position::First
        } else {
            Position::Middle
        }
    }
}

/// One element with its differences to every linker of the read
#[derive(Debug)]
pub struct ElementDifferences<'a> {
    pub obj: &'a RegionCoordinate,
    pub diffs: Vec<&'a RegionCoordinateDifference>,
}

/// Group differences by element id, in order of first appearance
pub fn groupby_region_id(diffs: &[RegionCoordinateDifference]) -> Vec<ElementDifferences<'_>> {
    let mut groups: Vec<ElementDifferences> = Vec::new();
    for d in diffs {
        match groups.iter_mut().find(|g| g.obj.region_id == d.obj.region_id) {
            Some(group) => group.diffs.push(d),
            None => groups.push(ElementDifferences { obj: &d.obj, diffs: vec![d] }),
        }
    }
    groups
}

/// Keep the groups whose element is a barcode, UMI or cDNA (any case)
pub fn filter_groupby_region_type(groups: Vec<ElementDifferences<'_>>) -> Vec<ElementDifferences<'_>> {
    groups
        .into_iter()
        .filter(|g| EXTRACTED_TYPES.contains(&g.obj.region_type.to_lowercase().as_str()))
        .collect()
}

/// Extraction pattern of one element, with at most one linker on each side
///
/// The nearest linker (smallest gap) wins on each side; a zero gap is
/// written as nothing. cDNA is anchored to the read start when it comes
/// first and to the read end when it comes last.
fn format_splitcode_row(group: &ElementDifferences<'_>, position: Position, orientation: Orientation) -> String {
    let obj = group.obj;
    let prefix = orientation.element_prefix();
    let mut e = if obj.region_type == CDNA_TYPE {
        let tag = format!("<{}_{}>", prefix, obj.region_id);
        match position {
            Position::First => format!("0:0{}", tag),
            Position::Last => format!("{}0:-1", tag),
            Position::Middle => tag,
        }
    } else {
        format!("<{}_{}[{}]>", prefix, obj.region_type, obj.min_len)
    };

    let mut sorted = group.diffs.clone();
    sorted.sort_by_key(|d| d.diff.min_len);

    let mut downstream_done = false;
    let mut upstream_done = false;
    for d in sorted {
        if d.fixed.region_type != ANCHOR_TYPE {
            continue;
        }
        let gap = match d.diff.min_len {
            0 => String::new(),
            n => n.to_string(),
        };
        let linker = format!("{{{}{}}}", d.fixed.region_id, orientation.linker_suffix());
        match d.loc {
            Location::Downstream if !downstream_done => {
                e = if orientation.is_reverse() {
                    format!("{}{}{}", e, gap, linker)
                } else {
                    format!("{}{}{}", linker, gap, e)
                };
                downstream_done = true;
            }
            Location::Upstream if !upstream_done => {
                e = if orientation.is_reverse() {
                    format!("{}{}{}", linker, gap, e)
                } else {
                    format!("{}{}{}", e, gap, linker)
                };
                upstream_done = true;
            }
            _ => {}
        }
    }
    e
}

/// `@extract` lines for one orientation, one per region type in order of
/// first appearance
fn extract_lines(groups: &[ElementDifferences<'_>], orientation: Orientation) -> String {
    let ordered: Vec<&ElementDifferences> = if orientation.is_reverse() {
        groups.iter().rev().collect()
    } else {
        groups.iter().collect()
    };

    let mut by_type: Vec<(&str, Vec<String>)> = Vec::new();
    for (idx, group) in ordered.iter().enumerate() {
        let row = format_splitcode_row(group, Position::of(idx, ordered.len()), orientation);
        let region_type = group.obj.region_type.as_str();
        match by_type.iter_mut().find(|(t, _)| *t == region_type) {
            Some((_, rows)) => rows.push(row),
            None => by_type.push((region_type, vec![row])),
        }
    }

    by_type
        .iter()
        .map(|(_, rows)| format!("@extract {}\n", rows.join(",")))
        .collect()
}

/// Tag table of the linkers of one read
fn tag_table(coord: &Coordinate) -> String {
    let mut out = String::from("groups\tids\ttags\tdistances\tlocations\n");
    let linkers = coord.rcv.iter().filter(|cut| cut.region_type == ANCHOR_TYPE);
    for (idx, cut) in linkers.enumerate() {
        let group = idx + 1;
        let reversed: String = cut.sequence.chars().rev().collect();
        let tags = [
            ("f", cut.sequence.clone()),
            ("c", complement_sequence(&cut.sequence)),
            ("r", reversed),
            ("rc", revcomp(&cut.sequence)),
        ];
        for (suffix, tag) in tags {
            out.push_str(&format!(
                "group{}\t{}{}\t{}\t{}\t{}\n",
                group, cut.name, suffix, tag, TAG_DISTANCES, TAG_LOCATIONS
            ));
        }
    }
    out
}

pub fn format_splitcode(indices: &[Coordinate]) -> FormatResult<String> {
    let mut out = String::new();
    for coord in indices {
        let diffs = linker_differences(&coord.rcv)?;
        let groups = filter_groupby_region_type(groupby_region_id(&diffs));
        for orientation in Orientation::ALL {
            out.push_str(&extract_lines(&groups, orientation));
        }
    }
    for coord in indices {
        out.push_str(&tag_table(coord));
    }
    Ok(out)
}
