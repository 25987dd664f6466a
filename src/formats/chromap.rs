//! chromap read-format arguments
//!
//! `-1 <r1> -2 <r2> --barcode <bc> --read-format bc:<s>:<e>[:-],r1:<s>:<e>,...`
//! where `<e>` is the inclusive end (`stop - 1`) and `:-` marks a barcode on
//! a negative-strand read. chromap takes barcodes from exactly one fastq and
//! genomic DNA from at most two.

use super::Bucket;
use crate::core::{Coordinate, FormatError, FormatResult, Strand};
use std::collections::HashSet;

const MAX_BARCODE_FASTQS: usize = 1;
const MAX_GDNA_FASTQS: usize = 2;

/// Drop repeated entries, keeping the first occurrence of each
///
/// # Examples
/// ```
/// use seqspec::formats::stable_deduplicate;
///
/// let fqs = vec!["R1".to_string(), "R2".to_string(), "R1".to_string()];
/// assert_eq!(stable_deduplicate(&fqs), vec!["R1", "R2"]);
/// ```
pub fn stable_deduplicate(items: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(String::as_str)
        .filter(|s| seen.insert(*s))
        .collect()
}

pub fn format_chromap(indices: &[Coordinate]) -> FormatResult<String> {
    let mut bc_fqs = Vec::new();
    let mut bc_str = Vec::new();
    let mut gdna_fqs = Vec::new();
    let mut gdna_str = Vec::new();
    for coord in indices {
        let strand = match coord.strand {
            Strand::Pos => "",
            Strand::Neg => ":-",
        };
        for cut in &coord.rcv {
            match Bucket::of(cut) {
                Bucket::Barcode => {
                    bc_fqs.push(coord.query_id.clone());
                    bc_str.push(format!("bc:{}:{}{}", cut.start, cut.stop.saturating_sub(1), strand));
                }
                Bucket::Gdna => {
                    gdna_fqs.push(coord.query_id.clone());
                    gdna_str.push(format!("{}:{}", cut.start, cut.stop.saturating_sub(1)));
                }
                _ => {}
            }
        }
    }

    let bc_sources = stable_deduplicate(&bc_fqs);
    if bc_sources.len() > MAX_BARCODE_FASTQS {
        return Err(FormatError::Capacity {
            tool: "chromap",
            what: "barcodes",
            max: MAX_BARCODE_FASTQS,
            got: bc_sources.len(),
        });
    }
    let gdna_sources = stable_deduplicate(&gdna_fqs);
    if gdna_sources.len() > MAX_GDNA_FASTQS {
        return Err(FormatError::Capacity {
            tool: "chromap",
            what: "genomic dna",
            max: MAX_GDNA_FASTQS,
            got: gdna_sources.len(),
        });
    }

    let barcode_fq = bc_sources.first().ok_or(FormatError::MissingRegion {
        tool: "chromap",
        region_type: "barcode".to_string(),
    })?;
    let read1_fq = gdna_sources.first().ok_or(FormatError::MissingRegion {
        tool: "chromap",
        region_type: "gdna".to_string(),
    })?;

    let mut fastqs = format!("-1 {}", read1_fq);
    if let Some(read2_fq) = gdna_sources.get(1) {
        fastqs.push_str(&format!(" -2 {}", read2_fq));
    }
    let read_str = gdna_str
        .iter()
        .enumerate()
        .map(|(idx, ele)| format!("r{}:{}", idx + 1, ele))
        .collect::<Vec<_>>()
        .join(",");

    Ok(format!(
        "{} --barcode {} --read-format {},{}",
        fastqs,
        barcode_fq,
        bc_str.join(","),
        read_str
    ))
}
