//! Library structure tree
//!
//! A [`Region`] describes a named, typed span of a library molecule. Leaves
//! carry sequence content directly (`fixed`, `random`, `onlist`); internal
//! nodes are `joined` and derive their sequence and length bounds from their
//! children.
//!
//! # Derived attributes are not kept in sync automatically
//!
//! The stored `sequence`, `min_len` and `max_len` of a joined node are only
//! valid right after [`Region::update_attr`]. Any structural edit (inserting
//! children, patching a leaf, reversing, ...) leaves the stored values of its
//! ancestors stale until `update_attr` is called again on the root. The
//! on-the-fly accessors [`Region::get_sequence`] and [`Region::get_len`]
//! always walk the tree and are never stale.

use crate::core::dna::complement_sequence;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

/// How the nucleotides of a region are specified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceType {
    /// Literal sequence, authoritative
    #[default]
    Fixed,
    /// Any nucleotide at every position, rendered as `X`
    Random,
    /// Sequence drawn from an allow-list, rendered as `N`
    Onlist,
    /// Concatenation of child regions
    Joined,
}

impl SequenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceType::Fixed => "fixed",
            SequenceType::Random => "random",
            SequenceType::Onlist => "onlist",
            SequenceType::Joined => "joined",
        }
    }
}

impl std::fmt::Display for SequenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an allow-list file constraining the values of a region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Onlist {
    pub file_id: String,
    pub filename: String,
    pub filetype: String,
    #[serde(default)]
    pub filesize: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub urltype: String,
    #[serde(default)]
    pub md5: String,
}

/// A node in the library structure tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: String,
    pub region_type: String,
    pub name: String,
    pub sequence_type: SequenceType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequence: String,
    #[serde(default)]
    pub min_len: u64,
    #[serde(default)]
    pub max_len: u64,
    #[serde(default)]
    pub onlist: Option<Onlist>,
    /// Child regions in library order; empty for leaves
    #[serde(default, deserialize_with = "null_as_default")]
    pub regions: Vec<Region>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Region {
    /// Build a node from its fields
    ///
    /// Debug builds assert `min_len <= max_len`. Regions decoded from YAML do
    /// not pass through here and are taken as written.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region_id: impl Into<String>,
        region_type: impl Into<String>,
        name: impl Into<String>,
        sequence_type: SequenceType,
        sequence: impl Into<String>,
        min_len: u64,
        max_len: u64,
        onlist: Option<Onlist>,
        regions: Vec<Region>,
    ) -> Self {
        debug_assert!(min_len <= max_len, "min_len {} exceeds max_len {}", min_len, max_len);
        Self {
            region_id: region_id.into(),
            region_type: region_type.into(),
            name: name.into(),
            sequence_type,
            sequence: sequence.into(),
            min_len,
            max_len,
            onlist,
            regions,
        }
    }

    /// Leaf with a literal sequence; both length bounds equal its length
    pub fn fixed(region_id: &str, region_type: &str, sequence: &str) -> Self {
        let len = sequence.len() as u64;
        Self::new(region_id, region_type, region_id, SequenceType::Fixed, sequence, len, len, None, Vec::new())
    }

    /// Leaf of random nucleotides
    pub fn random(region_id: &str, region_type: &str, min_len: u64, max_len: u64) -> Self {
        let sequence = "X".repeat(min_len as usize);
        Self::new(region_id, region_type, region_id, SequenceType::Random, sequence, min_len, max_len, None, Vec::new())
    }

    /// Leaf whose values come from an allow-list
    pub fn onlist(region_id: &str, region_type: &str, len: u64, onlist: Onlist) -> Self {
        let sequence = "N".repeat(len as usize);
        Self::new(region_id, region_type, region_id, SequenceType::Onlist, sequence, len, len, Some(onlist), Vec::new())
    }

    /// Internal node; call [`Region::update_attr`] to derive its attributes
    pub fn joined(region_id: &str, region_type: &str, regions: Vec<Region>) -> Self {
        Self::new(region_id, region_type, region_id, SequenceType::Joined, "", 0, 0, None, regions)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sequence of this region, walking children for internal nodes
    ///
    /// Leaves follow their sequence type: `random` yields `X` and `onlist`
    /// yields `N` repeated `min_len` times, anything else returns the stored
    /// sequence.
    pub fn get_sequence(&self) -> String {
        if self.is_leaf() {
            return match self.sequence_type {
                SequenceType::Random => "X".repeat(self.min_len as usize),
                SequenceType::Onlist => "N".repeat(self.min_len as usize),
                SequenceType::Fixed | SequenceType::Joined => self.sequence.clone(),
            };
        }
        let mut s = String::new();
        for r in &self.regions {
            s.push_str(&r.get_sequence());
        }
        s
    }

    /// `(min_len, max_len)`, summed over children for internal nodes
    ///
    /// Sums saturate at `u64::MAX`.
    pub fn get_len(&self) -> (u64, u64) {
        if self.is_leaf() {
            return (self.min_len, self.max_len);
        }
        self.regions.iter().fold((0, 0), |(mn, mx), r| {
            let (c_min, c_max) = r.get_len();
            (mn.saturating_add(c_min), mx.saturating_add(c_max))
        })
    }

    /// Re-derive `sequence`, `min_len` and `max_len` for the whole subtree
    ///
    /// Post-order: children first, then self. Calling it twice in a row is a
    /// no-op the second time.
    pub fn update_attr(&mut self) {
        for r in &mut self.regions {
            r.update_attr();
        }
        let (mn, mx) = self.get_len();
        self.min_len = mn;
        self.max_len = mx;
        self.sequence = self.get_sequence();
    }

    /// Leaves in depth-first, left-to-right order
    pub fn get_leaves(&self) -> Vec<&Region> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Region>) {
        if self.is_leaf() {
            leaves.push(self);
        } else {
            for r in &self.regions {
                r.collect_leaves(leaves);
            }
        }
    }

    /// Leaves, except that a node with `region_id` is kept whole
    ///
    /// The matching node is collected and not descended into. With no match
    /// this is [`Region::get_leaves`].
    pub fn get_leaves_with_region_id(&self, region_id: &str) -> Vec<&Region> {
        let mut leaves = Vec::new();
        self.collect_leaves_with_region_id(region_id, &mut leaves);
        leaves
    }

    fn collect_leaves_with_region_id<'a>(&'a self, region_id: &str, leaves: &mut Vec<&'a Region>) {
        if self.region_id == region_id || self.is_leaf() {
            leaves.push(self);
        } else {
            for r in &self.regions {
                r.collect_leaves_with_region_id(region_id, leaves);
            }
        }
    }

    pub fn get_leaf_region_types(&self) -> BTreeSet<String> {
        self.get_leaves()
            .into_iter()
            .map(|r| r.region_type.clone())
            .collect()
    }

    /// Pre-order walk over self and all descendants
    fn preorder<'a>(&'a self, out: &mut Vec<&'a Region>, keep: &dyn Fn(&Region) -> bool) {
        if keep(self) {
            out.push(self);
        }
        for r in &self.regions {
            r.preorder(out, keep);
        }
    }

    /// Every node (leaf or internal) with this id, in pre-order
    pub fn get_region_by_id(&self, region_id: &str) -> Vec<&Region> {
        let mut found = Vec::new();
        self.preorder(&mut found, &|r| r.region_id == region_id);
        found
    }

    /// Every node with this region type, in pre-order
    pub fn get_region_by_region_type(&self, region_type: &str) -> Vec<&Region> {
        let mut found = Vec::new();
        self.preorder(&mut found, &|r| r.region_type == region_type);
        found
    }

    /// Every node carrying an onlist, in pre-order
    pub fn get_onlist_regions(&self) -> Vec<&Region> {
        let mut found = Vec::new();
        self.preorder(&mut found, &|r| r.onlist.is_some());
        found
    }

    /// This node's own onlist; no traversal
    pub fn get_onlist(&self) -> Option<&Onlist> {
        self.onlist.as_ref()
    }

    /// Child id -> parent id for the whole subtree
    ///
    /// Recomputed on every call; the tree itself never stores parent links.
    pub fn parent_index(&self) -> HashMap<String, String> {
        let mut index = HashMap::new();
        self.collect_parents(&mut index);
        index
    }

    fn collect_parents(&self, index: &mut HashMap<String, String>) {
        for r in &self.regions {
            index
                .entry(r.region_id.clone())
                .or_insert_with(|| self.region_id.clone());
            r.collect_parents(index);
        }
    }

    /// First node (pre-order) that has a direct child with `region_id`
    pub fn get_parent(&self, region_id: &str) -> Option<&Region> {
        if self.regions.iter().any(|r| r.region_id == region_id) {
            return Some(self);
        }
        self.regions.iter().find_map(|r| r.get_parent(region_id))
    }

    /// Newick rendering: leaves as `'<id>:<min_len>'`, internal nodes as
    /// `(<children>)<id>`
    ///
    /// # Examples
    /// ```
    /// use seqspec::core::Region;
    ///
    /// let mut root = Region::joined("root", "meta", vec![
    ///     Region::fixed("A", "linker", "AAA"),
    ///     Region::fixed("B", "linker", "TT"),
    /// ]);
    /// root.update_attr();
    /// assert_eq!(root.to_newick(), "('A:3','B:2')root");
    /// ```
    pub fn to_newick(&self) -> String {
        if self.is_leaf() {
            return format!("'{}:{}'", self.region_id, self.min_len);
        }
        let inner: Vec<String> = self.regions.iter().map(|r| r.to_newick()).collect();
        format!("({}){}", inner.join(","), self.region_id)
    }

    /// Reverse the characters of every leaf sequence; child order is kept
    pub fn reverse(&mut self) {
        if self.is_leaf() {
            self.sequence = self.sequence.chars().rev().collect();
        } else {
            for r in &mut self.regions {
                r.reverse();
            }
        }
    }

    /// Complement every leaf sequence; child order is kept
    pub fn complement(&mut self) {
        if self.is_leaf() {
            self.sequence = complement_sequence(&self.sequence);
        } else {
            for r in &mut self.regions {
                r.complement();
            }
        }
    }

    /// Overwrite every scalar field of this node; children are untouched
    #[allow(clippy::too_many_arguments)]
    pub fn update_region(
        &mut self,
        region_id: String,
        region_type: String,
        name: String,
        sequence_type: SequenceType,
        sequence: String,
        min_len: u64,
        max_len: u64,
        onlist: Option<Onlist>,
    ) {
        self.region_id = region_id;
        self.region_type = region_type;
        self.name = name;
        self.sequence_type = sequence_type;
        self.sequence = sequence;
        self.min_len = min_len;
        self.max_len = max_len;
        self.onlist = onlist;
    }

    /// First node (pre-order) with this id, mutably
    pub fn get_region_by_id_mut(&mut self, region_id: &str) -> Option<&mut Region> {
        if self.region_id == region_id {
            return Some(self);
        }
        self.regions
            .iter_mut()
            .find_map(|r| r.get_region_by_id_mut(region_id))
    }

    /// Apply `patch` to the first node (pre-order) whose id is `target_region_id`
    ///
    /// Returns whether a node was found. A missing target is not an error and
    /// leaves the tree untouched.
    pub fn update_region_by_id(&mut self, target_region_id: &str, patch: &RegionPatch) -> bool {
        match self.get_region_by_id_mut(target_region_id) {
            Some(region) => {
                patch.apply(region);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", self.region_type, self.min_len, self.max_len)
    }
}

/// Field-level update for a [`Region`]
///
/// Only fields that are set are written; unset fields keep the current
/// value of the target node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionPatch {
    pub region_id: Option<String>,
    pub region_type: Option<String>,
    pub name: Option<String>,
    pub sequence_type: Option<SequenceType>,
    pub sequence: Option<String>,
    pub min_len: Option<u64>,
    pub max_len: Option<u64>,
    pub onlist: Option<Onlist>,
}

impl RegionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region_id(mut self, v: impl Into<String>) -> Self {
        self.region_id = Some(v.into());
        self
    }

    pub fn region_type(mut self, v: impl Into<String>) -> Self {
        self.region_type = Some(v.into());
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = Some(v.into());
        self
    }

    pub fn sequence_type(mut self, v: SequenceType) -> Self {
        self.sequence_type = Some(v);
        self
    }

    pub fn sequence(mut self, v: impl Into<String>) -> Self {
        self.sequence = Some(v.into());
        self
    }

    pub fn min_len(mut self, v: u64) -> Self {
        self.min_len = Some(v);
        self
    }

    pub fn max_len(mut self, v: u64) -> Self {
        self.max_len = Some(v);
        self
    }

    pub fn onlist(mut self, v: Onlist) -> Self {
        self.onlist = Some(v);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `region`
    pub fn apply(&self, region: &mut Region) {
        if let Some(v) = &self.region_id {
            region.region_id = v.clone();
        }
        if let Some(v) = &self.region_type {
            region.region_type = v.clone();
        }
        if let Some(v) = &self.name {
            region.name = v.clone();
        }
        if let Some(v) = self.sequence_type {
            region.sequence_type = v;
        }
        if let Some(v) = &self.sequence {
            region.sequence = v.clone();
        }
        if let Some(v) = self.min_len {
            region.min_len = v;
        }
        if let Some(v) = self.max_len {
            region.max_len = v;
        }
        if let Some(v) = &self.onlist {
            region.onlist = Some(v.clone());
        }
    }
}
