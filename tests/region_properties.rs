//! Property-based tests for region trees
//!
//! Derived attributes of internal nodes, leaf transforms and in-place patches.

use proptest::prelude::*;
use seqspec::core::{Region, RegionPatch, SequenceType};

// ============================================================================
// Strategies
// ============================================================================

fn dna_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['A', 'C', 'G', 'T']), 1..20)
        .prop_map(|chars| chars.into_iter().collect())
}

/// A single leaf: fixed, random or onlist
fn leaf_strategy() -> impl Strategy<Value = Region> {
    prop_oneof![
        dna_strategy().prop_map(|s| Region::fixed("leaf", "linker", &s)),
        (1u64..20, 0u64..20).prop_map(|(min, extra)| Region::random("leaf", "umi", min, min + extra)),
    ]
}

/// A tree of depth <= 3 with uniquely numbered region ids
fn tree_strategy() -> impl Strategy<Value = Region> {
    leaf_strategy()
        .prop_recursive(3, 24, 4, |inner| {
            prop::collection::vec(inner, 1..4).prop_map(|children| Region::joined("node", "meta", children))
        })
        .prop_map(|mut root| {
            let mut counter = 0;
            renumber(&mut root, &mut counter);
            root.update_attr();
            root
        })
}

fn renumber(region: &mut Region, counter: &mut usize) {
    region.region_id = format!("r{}", counter);
    region.name = region.region_id.clone();
    *counter += 1;
    for r in &mut region.regions {
        renumber(r, counter);
    }
}

fn create_10x_tree() -> Region {
    let mut rna = Region::joined("rna", "rna", vec![
        Region::fixed("r1_primer", "custom_primer", "ACACTCTTTCCCTACACGACGCTCTTCCGATCT"),
        Region::random("barcode", "barcode", 16, 16),
        Region::random("umi", "umi", 12, 12),
        Region::random("cdna", "cdna", 1, 98),
        Region::fixed("r2_primer", "custom_primer", "AGATCGGAAGAGCACACGTCTGAACTCCAGTCAC"),
    ]);
    rna.update_attr();
    rna
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Internal nodes hold the sum of their children's bounds
    #[test]
    fn prop_internal_len_is_sum_of_children(root in tree_strategy()) {
        fn check(r: &Region) -> Result<(), TestCaseError> {
            if !r.is_leaf() {
                let min: u64 = r.regions.iter().map(|c| c.min_len).sum();
                let max: u64 = r.regions.iter().map(|c| c.max_len).sum();
                prop_assert_eq!(r.min_len, min);
                prop_assert_eq!(r.max_len, max);
                let seq: String = r.regions.iter().map(|c| c.sequence.clone()).collect();
                prop_assert_eq!(&r.sequence, &seq);
            }
            for c in &r.regions {
                check(c)?;
            }
            Ok(())
        }
        check(&root)?;
        prop_assert!(root.min_len <= root.max_len);
    }

    /// Deriving twice changes nothing
    #[test]
    fn prop_update_attr_idempotent(root in tree_strategy()) {
        let mut again = root.clone();
        again.update_attr();
        prop_assert_eq!(again, root);
    }

    /// Leaves come back in left-to-right order and cover the root sequence
    #[test]
    fn prop_leaves_concatenate_to_root(root in tree_strategy()) {
        let seq: String = root.get_leaves().iter().map(|l| l.sequence.clone()).collect();
        prop_assert_eq!(seq, root.sequence.clone());
    }

    /// Reversing or complementing twice restores every leaf
    #[test]
    fn prop_reverse_and_complement_involution(root in tree_strategy()) {
        let mut r = root.clone();
        r.reverse();
        r.reverse();
        prop_assert_eq!(&r, &root);

        r.complement();
        r.complement();
        prop_assert_eq!(&r, &root);
    }

    /// Every non-root node resolves to a parent that lists it as a child
    #[test]
    fn prop_parent_lookup(root in tree_strategy()) {
        prop_assert!(root.get_parent(&root.region_id).is_none());
        for (child, parent) in root.parent_index() {
            let p = root.get_parent(&child);
            prop_assert!(p.is_some());
            let p = p.unwrap();
            prop_assert_eq!(&p.region_id, &parent);
            prop_assert!(p.regions.iter().any(|c| c.region_id == child));
        }
    }
}

// ============================================================================
// Unit tests
// ============================================================================

#[test]
fn test_10x_root_attributes() {
    let rna = create_10x_tree();
    assert_eq!(rna.min_len, 33 + 16 + 12 + 1 + 34);
    assert_eq!(rna.max_len, 33 + 16 + 12 + 98 + 34);
    assert!(rna.sequence.starts_with("ACACTCTTTCCCTACACGACGCTCTTCCGATCT"));
    assert!(rna.sequence.contains(&"X".repeat(28)));
    assert_eq!(rna.to_string(), "rna(96, 193)");
}

#[test]
fn test_onlist_and_random_leaf_sequences() {
    let bc = Region::onlist("bc", "barcode", 4, Default::default());
    assert_eq!(bc.get_sequence(), "NNNN");
    assert_eq!(bc.sequence_type, SequenceType::Onlist);
    assert!(bc.get_onlist().is_some());

    let umi = Region::random("umi", "umi", 3, 5);
    assert_eq!(umi.get_sequence(), "XXX");
}

#[test]
fn test_nested_newick() {
    let mut root = Region::joined("root", "meta", vec![
        Region::joined("left", "meta", vec![
            Region::fixed("a", "linker", "AC"),
            Region::random("b", "umi", 4, 4),
        ]),
        Region::fixed("c", "linker", "T"),
    ]);
    root.update_attr();
    assert_eq!(root.to_newick(), "(('a:2','b:4')left,'c:1')root");
}

#[test]
fn test_lookups() {
    let rna = create_10x_tree();
    assert_eq!(rna.get_region_by_region_type("custom_primer").len(), 2);
    assert_eq!(rna.get_region_by_id("umi")[0].max_len, 12);
    assert!(rna.get_region_by_id("missing").is_empty());
    let types: Vec<String> = rna.get_leaf_region_types().into_iter().collect();
    assert_eq!(types, vec!["barcode", "cdna", "custom_primer", "umi"]);
    assert_eq!(rna.get_leaves_with_region_id("rna").len(), 1);
    assert_eq!(rna.get_leaves_with_region_id("missing").len(), 5);
    assert_eq!(rna.get_parent("cdna").map(|p| p.region_id.as_str()), Some("rna"));
}

#[test]
fn test_stale_until_rederived() {
    let mut rna = create_10x_tree();
    let patch = RegionPatch::new().min_len(10).max_len(10);
    assert!(rna.update_region_by_id("umi", &patch));
    // parent keeps the old totals until re-derived
    assert_eq!(rna.max_len, 193);
    rna.update_attr();
    assert_eq!(rna.max_len, 191);
    assert_eq!(rna.min_len, 94);
}

#[test]
fn test_patch_missing_target_is_noop() {
    let mut rna = create_10x_tree();
    let before = rna.clone();
    assert!(!rna.update_region_by_id("nope", &RegionPatch::new().name("x")));
    assert_eq!(rna, before);
    assert!(RegionPatch::new().is_empty());
}

#[test]
fn test_complement_only_touches_leaves() {
    let mut root = Region::joined("root", "meta", vec![
        Region::fixed("a", "linker", "ACGT"),
        Region::fixed("b", "linker", "GGA"),
    ]);
    root.update_attr();
    root.complement();
    assert_eq!(root.regions[0].sequence, "TGCA");
    assert_eq!(root.regions[1].sequence, "CCT");
    assert_eq!(root.sequence, "ACGTGGA");
}
