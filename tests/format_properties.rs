//! Index format tests
//!
//! Exact strings for a 10x-like assay indexed end to end, plus structural
//! properties that hold for any coordinate list.

use proptest::prelude::*;
use seqspec::core::{index_assay, Assay, Coordinate, FormatError, IndexSelector, Read, Region, RegionCoordinate, Strand};
use seqspec::formats::{format_index, IndexFormat};

// ============================================================================
// Fixtures
// ============================================================================

fn create_10x_indices() -> Vec<Coordinate> {
    let mut rna = Region::joined("rna", "rna", vec![
        Region::fixed("r1_primer", "custom_primer", "ACACTCTTTCCCTACACGACGCTCTTCCGATCT"),
        Region::random("barcode", "barcode", 16, 16),
        Region::random("umi", "umi", 12, 12),
        Region::random("cdna", "cdna", 1, 98),
        Region::fixed("r2_primer", "custom_primer", "AGATCGGAAGAGCACACGTCTGAACTCCAGTCAC"),
    ]);
    rna.update_attr();
    let reads = vec![
        Read::new("R1", "rna", "r1_primer", 28, 28, Strand::Pos),
        Read::new("R2", "rna", "r2_primer", 90, 90, Strand::Neg),
    ];
    let assay = Assay::new("10x", vec!["rna".to_string()], vec![rna], reads);
    index_assay(&assay, "rna", &[], IndexSelector::Read, false).unwrap()
}

fn region_type_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["barcode", "umi", "cdna", "gdna", "linker", "BARCODE"])
}

/// Coordinate lists of 1..4 reads, each 0..6 contiguous elements
fn indices_strategy() -> impl Strategy<Value = Vec<Coordinate>> {
    prop::collection::vec(prop::collection::vec((region_type_strategy(), 1u64..30), 0..6), 1..4).prop_map(|reads| {
        reads
            .into_iter()
            .enumerate()
            .map(|(i, elements)| {
                let mut offset = 0;
                let rcv: Vec<RegionCoordinate> = elements
                    .into_iter()
                    .enumerate()
                    .map(|(j, (region_type, len))| {
                        let region = Region::random(&format!("e{}_{}", i, j), region_type, len, len);
                        let rc = RegionCoordinate::from_region(&region, offset, offset + len);
                        offset += len;
                        rc
                    })
                    .collect();
                Coordinate::new(&format!("R{}", i + 1), rcv, Strand::Pos)
            })
            .collect()
    })
}

// ============================================================================
// End-to-end strings
// ============================================================================

#[test]
fn test_10x_all_formats() {
    let indices = create_10x_indices();
    let render = |f: IndexFormat| format_index(&indices, f, None).unwrap();

    assert_eq!(render(IndexFormat::Kb), "0,0,16:0,16,28:1,0,90");
    assert_eq!(render(IndexFormat::KbSingle), "0,0,16:0,16,28:1,0,90");
    assert_eq!(
        render(IndexFormat::Starsolo),
        "--soloType CB_UMI_Simple --soloCBstart 1 --soloCBlen 16 --soloUMIstart 17 --soloUMIlen 12"
    );
    assert_eq!(render(IndexFormat::Simpleaf), "1{b[16]u[12]x:}2{r[90]x:}");
    assert_eq!(render(IndexFormat::Zumis), "- BCS(1-16)\n- UMI(17-28)\n\n- cDNA(1-90)");
    assert_eq!(
        render(IndexFormat::Tab),
        "R1\tbarcode\tbarcode\t0\t16\nR1\tumi\tumi\t16\t28\nR2\tcdna\tcdna\t0\t90"
    );
    assert_eq!(render(IndexFormat::Relative), "");
    // no linkers: one empty tag table per read and nothing to extract
    assert_eq!(render(IndexFormat::Splitcode), "groups\tids\ttags\tdistances\tlocations\n".repeat(2));
    assert_eq!(format_index(&indices, IndexFormat::Seqkit, Some("umi")).unwrap(), "17:28");
}

#[test]
fn test_10x_format_errors() {
    let indices = create_10x_indices();
    assert!(matches!(
        format_index(&indices, IndexFormat::Chromap, None),
        Err(FormatError::MissingRegion { tool: "chromap", .. })
    ));
    assert!(matches!(
        format_index(&indices, IndexFormat::Seqkit, None),
        Err(FormatError::MissingSubregionType("seqkit"))
    ));
}

#[test]
fn test_kb_missing_groups_use_sentinel() {
    let cdna = RegionCoordinate::from_region(&Region::random("cdna", "cdna", 50, 50), 0, 50);
    let indices = vec![Coordinate::new("R1", vec![cdna], Strand::Pos)];
    assert_eq!(format_index(&indices, IndexFormat::Kb, None).unwrap(), "-1,-1,-1:-1,-1,-1:0,0,50");
}

#[test]
fn test_format_names() {
    for format in IndexFormat::ALL {
        assert_eq!(format.as_str().parse::<IndexFormat>().unwrap(), format);
    }
    assert_eq!("KB".parse::<IndexFormat>().unwrap(), IndexFormat::Kb);
    assert!(matches!("bam".parse::<IndexFormat>(), Err(FormatError::UnknownFormat(_))));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// kb output always has exactly three groups
    #[test]
    fn prop_kb_three_groups(indices in indices_strategy()) {
        let kb = format_index(&indices, IndexFormat::Kb, None).unwrap();
        prop_assert_eq!(kb.matches(':').count(), 2);
        let single = format_index(&indices, IndexFormat::KbSingle, None).unwrap();
        prop_assert_eq!(single.matches(':').count(), 2);
        let feature = single.rsplit(':').next().unwrap_or("");
        prop_assert!(feature.is_empty() || feature.split(',').count() == 3);
    }

    /// tab emits one line per coordinate
    #[test]
    fn prop_tab_line_count(indices in indices_strategy()) {
        let total: usize = indices.iter().map(|c| c.rcv.len()).sum();
        let tab = format_index(&indices, IndexFormat::Tab, None).unwrap();
        let lines = if tab.is_empty() { 0 } else { tab.lines().count() };
        prop_assert_eq!(lines, total);
    }

    /// Region types are matched case-insensitively
    #[test]
    fn prop_simpleaf_one_block_per_read(indices in indices_strategy()) {
        let s = format_index(&indices, IndexFormat::Simpleaf, None).unwrap();
        prop_assert_eq!(s.matches("x:}").count(), indices.len());
        let barcodes = indices
            .iter()
            .flat_map(|c| c.rcv.iter())
            .filter(|rc| rc.region_type.eq_ignore_ascii_case("barcode"))
            .count();
        prop_assert_eq!(s.matches("b[").count(), barcodes);
    }

    /// zUMIs writes one definition per barcode, UMI or cDNA element
    #[test]
    fn prop_zumis_definition_count(indices in indices_strategy()) {
        let z = format_index(&indices, IndexFormat::Zumis, None).unwrap();
        let expected = indices
            .iter()
            .flat_map(|c| c.rcv.iter())
            .filter(|rc| matches!(rc.region_type.to_uppercase().as_str(), "BARCODE" | "UMI" | "CDNA"))
            .count();
        prop_assert_eq!(z.matches("- ").count(), expected);
    }
}
