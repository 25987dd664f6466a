//! Region coordinates
//!
//! Projects an ordered list of leaf regions onto half-open nucleotide
//! intervals and clips them against the span a read actually covers.
//!
//! Projection reserves `max_len` for every region, so the coordinate space
//! of a region list is independent of any particular read.

use crate::core::error::{CoordinateError, CoordinateResult};
use crate::core::region::{Region, SequenceType};
use std::ops::Sub;

/// Compute the intersection of two half-open intervals
///
/// Returns None if the intervals don't overlap.
///
/// # Examples
/// ```
/// use seqspec::core::intersect_intervals;
///
/// assert_eq!(intersect_intervals(0, 100, 50, 150), Some((50, 100)));
/// assert_eq!(intersect_intervals(0, 50, 50, 100), None);
/// ```
#[inline]
pub fn intersect_intervals(start1: u64, end1: u64, start2: u64, end2: u64) -> Option<(u64, u64)> {
    if start1 >= end2 || end1 <= start2 {
        return None;
    }
    Some((start1.max(start2), end1.min(end2)))
}

/// A region placed on `[start, stop)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCoordinate {
    pub region_id: String,
    pub region_type: String,
    pub name: String,
    pub sequence_type: SequenceType,
    /// Sequence covered by `[start, stop)`
    pub sequence: String,
    pub min_len: u64,
    pub max_len: u64,
    pub start: u64,
    pub stop: u64,
}

impl RegionCoordinate {
    /// Place `region` on `[start, stop)`
    pub fn from_region(region: &Region, start: u64, stop: u64) -> Self {
        Self {
            region_id: region.region_id.clone(),
            region_type: region.region_type.clone(),
            name: region.name.clone(),
            sequence_type: region.sequence_type,
            sequence: region.sequence.clone(),
            min_len: region.min_len,
            max_len: region.max_len,
            start,
            stop,
        }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unclaimed gap between two placed elements
    ///
    /// Order does not matter: whichever interval comes first contributes its
    /// stop, the other its start. Identical spans reproduce that span.
    /// Overlapping, non-identical spans have no defined gap.
    ///
    /// # Examples
    /// ```
    /// use seqspec::core::{Region, RegionCoordinate};
    ///
    /// let a = RegionCoordinate::from_region(&Region::fixed("a", "linker", "ACGT"), 0, 4);
    /// let b = RegionCoordinate::from_region(&Region::fixed("b", "linker", "GG"), 6, 8);
    /// let gap = a.difference(&b).unwrap();
    /// assert_eq!((gap.start, gap.stop), (4, 6));
    /// assert_eq!(gap.region_type, "difference");
    /// assert_eq!(gap.sequence, "XX");
    /// ```
    pub fn difference(&self, other: &RegionCoordinate) -> CoordinateResult<RegionCoordinate> {
        let (start, stop) = if self.stop <= other.start {
            (self.stop, other.start)
        } else if other.stop <= self.start {
            (other.stop, self.start)
        } else if self.start == other.start && self.stop == other.stop {
            (self.start, self.stop)
        } else {
            return Err(CoordinateError::Overlapping {
                a: self.region_id.clone(),
                a_start: self.start,
                a_stop: self.stop,
                b: other.region_id.clone(),
                b_start: other.start,
                b_stop: other.stop,
            });
        };
        let len = stop - start;
        Ok(RegionCoordinate {
            region_id: format!("{} - {}", self.region_id, other.region_id),
            region_type: "difference".to_string(),
            name: format!("{} - {}", self.name, other.name),
            sequence_type: SequenceType::Random,
            sequence: "X".repeat(len as usize),
            min_len: len,
            max_len: len,
            start,
            stop,
        })
    }
}

impl Sub for &RegionCoordinate {
    type Output = CoordinateResult<RegionCoordinate>;

    fn sub(self, other: Self) -> Self::Output {
        self.difference(other)
    }
}

impl std::fmt::Display for RegionCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RegionCoordinate {} [{}]: [{}, {})",
            self.name, self.region_type, self.start, self.stop
        )
    }
}

/// Where an element lies relative to a reference element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Before the reference (`-`)
    Upstream,
    /// At or after the reference (`+`)
    Downstream,
}

impl Location {
    pub fn to_char(&self) -> char {
        match self {
            Location::Upstream => '-',
            Location::Downstream => '+',
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Gap between `obj` and a reference (`fixed`) coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCoordinateDifference {
    pub obj: RegionCoordinate,
    pub fixed: RegionCoordinate,
    pub diff: RegionCoordinate,
    pub loc: Location,
}

impl RegionCoordinateDifference {
    pub fn new(obj: RegionCoordinate, fixed: RegionCoordinate) -> CoordinateResult<Self> {
        let diff = obj.difference(&fixed)?;
        let loc = if obj.start < fixed.start {
            Location::Upstream
        } else {
            Location::Downstream
        };
        Ok(Self { obj, fixed, diff, loc })
    }
}

/// Lay regions end to end starting at 0, each reserving `max_len`
///
/// Offsets saturate at `u64::MAX`, so coordinates past that point are empty.
pub fn project_regions_to_coordinates<'a, I>(regions: I) -> Vec<RegionCoordinate>
where
    I: IntoIterator<Item = &'a Region>,
{
    let mut offset = 0u64;
    regions
        .into_iter()
        .map(|r| {
            let next = offset.saturating_add(r.max_len);
            let rc = RegionCoordinate::from_region(r, offset, next);
            offset = next;
            rc
        })
        .collect()
}

/// Keep the coordinates overlapping `[read_start, read_stop)`, clipped to it
///
/// Input order is preserved and each kept sequence is trimmed to the
/// clipped range.
pub fn itx_read(
    region_coordinates: &[RegionCoordinate],
    read_start: u64,
    read_stop: u64,
) -> Vec<RegionCoordinate> {
    region_coordinates
        .iter()
        .filter_map(|rc| {
            let (start, stop) = intersect_intervals(rc.start, rc.stop, read_start, read_stop)?;
            let mut clipped = rc.clone();
            clipped.sequence = slice_sequence(&rc.sequence, start - rc.start, stop - rc.start);
            clipped.start = start;
            clipped.stop = stop;
            Some(clipped)
        })
        .collect()
}

/// `sequence[from..to]`, clamped to the sequence length
fn slice_sequence(sequence: &str, from: u64, to: u64) -> String {
    sequence
        .chars()
        .skip(from as usize)
        .take(to.saturating_sub(from) as usize)
        .collect()
}
