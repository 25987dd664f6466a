//! Read-to-region mapping
//!
//! Locates the elements a read is expected to cover:
//! 1. Find the read's primer among the leaves of the modality tree
//! 2. Take the leaves after it (`pos`) or before it, walking outward (`neg`)
//! 3. Project those leaves onto coordinates starting at the primer
//! 4. Clip to the read length

use crate::core::assay::Assay;
use crate::core::coordinate::{itx_read, project_regions_to_coordinates, RegionCoordinate};
use crate::core::error::{MappingError, MappingResult};
use crate::core::read::{Read, Strand};
use crate::core::region::Region;
use log::{debug, warn};
use std::collections::HashSet;

/// Leaves the read covers, ordered from the primer outward
pub fn map_read_to_regions<'a>(root: &'a Region, read: &Read) -> MappingResult<Vec<&'a Region>> {
    let leaves = root.get_leaves();
    let primer_idx = leaves
        .iter()
        .position(|r| r.region_id == read.primer_id)
        .ok_or_else(|| MappingError::PrimerNotFound {
            read_id: read.read_id.clone(),
            primer_id: read.primer_id.clone(),
            modality: root.region_id.clone(),
        })?;

    let regions = match read.strand {
        Strand::Pos => leaves[primer_idx + 1..].to_vec(),
        Strand::Neg => leaves[..primer_idx].iter().rev().copied().collect(),
    };
    debug!(
        "read {} ({}) covers {} region(s) from primer {}",
        read.read_id,
        read.strand,
        regions.len(),
        read.primer_id
    );
    Ok(regions)
}

/// Read-relative coordinates of the elements sequenced by `read`
pub fn index_for_primer(root: &Region, read: &Read) -> MappingResult<(Vec<RegionCoordinate>, Strand)> {
    let regions = map_read_to_regions(root, read)?;
    let coords = project_regions_to_coordinates(regions);
    let clipped = itx_read(&coords, 0, read.max_len);
    if clipped.is_empty() {
        warn!("read {} covers no region of {}", read.read_id, root.region_id);
    }
    Ok((clipped, read.strand))
}

/// Coordinates of the leaves under `region_id`, optionally in reverse order
pub fn index_for_region(root: &Region, region_id: &str, reverse: bool) -> MappingResult<Vec<RegionCoordinate>> {
    let region = root
        .get_region_by_id(region_id)
        .into_iter()
        .next()
        .ok_or_else(|| MappingError::RegionNotFound {
            region_id: region_id.to_string(),
            modality: root.region_id.clone(),
        })?;
    let mut leaves = region.get_leaves();
    if reverse {
        leaves.reverse();
    }
    Ok(project_regions_to_coordinates(leaves))
}

/// What an index entry was requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Read,
    Region,
    File,
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QueryType::Read => "Read",
            QueryType::Region => "Region",
            QueryType::File => "File",
        };
        f.write_str(s)
    }
}

/// How the ids passed to [`index_assay`] are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexSelector {
    #[default]
    Read,
    Region,
    File,
}

/// Coordinate list for one requested read, region or file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub query_id: String,
    pub query_name: String,
    pub query_type: QueryType,
    /// Region coordinates in read order
    pub rcv: Vec<RegionCoordinate>,
    pub strand: Strand,
}

impl Coordinate {
    pub fn new(query_id: &str, rcv: Vec<RegionCoordinate>, strand: Strand) -> Self {
        Self {
            query_id: query_id.to_string(),
            query_name: query_id.to_string(),
            query_type: QueryType::Read,
            rcv,
            strand,
        }
    }
}

/// Index entry for one read of `modality`
pub fn get_coordinate_by_read_id(assay: &Assay, modality: &str, read_id: &str) -> MappingResult<Coordinate> {
    let root = assay.get_libspec(modality)?;
    let read = assay.get_read(read_id)?;
    let (rcv, strand) = index_for_primer(root, read)?;
    Ok(Coordinate {
        query_id: read.read_id.clone(),
        query_name: read.name.clone(),
        query_type: QueryType::Read,
        rcv,
        strand,
    })
}

/// Index entry for one region of `modality`
pub fn get_coordinate_by_region_id(
    assay: &Assay,
    modality: &str,
    region_id: &str,
    reverse: bool,
) -> MappingResult<Coordinate> {
    let root = assay.get_libspec(modality)?;
    let rcv = index_for_region(root, region_id, reverse)?;
    // index_for_region succeeded, so the region exists
    let name = root
        .get_region_by_id(region_id)
        .first()
        .map(|r| r.name.clone())
        .unwrap_or_default();
    Ok(Coordinate {
        query_id: region_id.to_string(),
        query_name: name,
        query_type: QueryType::Region,
        rcv,
        strand: Strand::Pos,
    })
}

/// Index entries for the reads owning files named in `filenames`
///
/// One entry per read, in spec order, labelled with the first matching file.
pub fn get_coordinates_by_file_ids(
    assay: &Assay,
    modality: &str,
    filenames: &[String],
) -> MappingResult<Vec<Coordinate>> {
    let wanted: HashSet<&str> = filenames.iter().map(String::as_str).collect();
    let mut indices = Vec::new();
    for read in assay.get_seqspec(modality) {
        let Some(file) = read.files.iter().find(|f| wanted.contains(f.filename.as_str())) else {
            continue;
        };
        let mut coord = get_coordinate_by_read_id(assay, modality, &read.read_id)?;
        coord.query_id = file.file_id.clone();
        coord.query_name = file.filename.clone();
        coord.query_type = QueryType::File;
        indices.push(coord);
    }
    Ok(indices)
}

/// Index a modality by read, region or file ids
///
/// With no ids: every read of the modality, the modality root region, or
/// every file of the modality's reads.
pub fn index_assay(
    assay: &Assay,
    modality: &str,
    ids: &[String],
    selector: IndexSelector,
    reverse: bool,
) -> MappingResult<Vec<Coordinate>> {
    match selector {
        IndexSelector::Read => {
            let read_ids: Vec<String> = if ids.is_empty() {
                assay.get_seqspec(modality).iter().map(|r| r.read_id.clone()).collect()
            } else {
                ids.to_vec()
            };
            read_ids
                .iter()
                .map(|id| get_coordinate_by_read_id(assay, modality, id))
                .collect()
        }
        IndexSelector::Region => {
            let region_ids: Vec<String> = if ids.is_empty() {
                vec![assay.get_libspec(modality)?.region_id.clone()]
            } else {
                ids.to_vec()
            };
            region_ids
                .iter()
                .map(|id| get_coordinate_by_region_id(assay, modality, id, reverse))
                .collect()
        }
        IndexSelector::File => {
            let filenames: Vec<String> = if ids.is_empty() {
                assay
                    .get_seqspec(modality)
                    .iter()
                    .flat_map(|r| r.files.iter().map(|f| f.filename.clone()))
                    .collect()
            } else {
                ids.to_vec()
            };
            get_coordinates_by_file_ids(assay, modality, &filenames)
        }
    }
}

/// Drop every region already claimed by an earlier entry
pub fn filter_index_no_overlap(mut indices: Vec<Coordinate>) -> Vec<Coordinate> {
    let mut seen: HashSet<String> = HashSet::new();
    for idx in &mut indices {
        idx.rcv.retain(|rc| seen.insert(rc.region_id.clone()));
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    /// p5 - bc(4) - umi(2) - polyT(3) - cdna(10) - p7
    fn create_test_tree() -> Region {
        let mut root = Region::joined("rna", "rna", vec![
            Region::fixed("p5", "illumina_p5", "AATGATACGG"),
            Region::random("bc", "barcode", 4, 4),
            Region::random("umi", "umi", 2, 2),
            Region::fixed("polyT", "poly_T", "TTT"),
            Region::random("cdna", "cdna", 1, 10),
            Region::fixed("p7", "illumina_p7", "ATCTCGTATG"),
        ]);
        root.update_attr();
        root
    }

    #[test]
    fn test_map_pos_strand() {
        let root = create_test_tree();
        let read = Read::new("R1", "rna", "p5", 6, 6, Strand::Pos);
        let ids: Vec<&str> = map_read_to_regions(&root, &read)
            .unwrap()
            .iter()
            .map(|r| r.region_id.as_str())
            .collect();
        assert_eq!(ids, ["bc", "umi", "polyT", "cdna", "p7"]);
    }

    #[test]
    fn test_map_neg_strand_walks_outward() {
        let root = create_test_tree();
        let read = Read::new("R2", "rna", "p7", 10, 10, Strand::Neg);
        let ids: Vec<&str> = map_read_to_regions(&root, &read)
            .unwrap()
            .iter()
            .map(|r| r.region_id.as_str())
            .collect();
        assert_eq!(ids, ["cdna", "polyT", "umi", "bc", "p5"]);
    }

    #[test]
    fn test_map_unknown_primer() {
        let root = create_test_tree();
        let read = Read::new("R1", "rna", "nope", 6, 6, Strand::Pos);
        assert!(matches!(
            map_read_to_regions(&root, &read),
            Err(MappingError::PrimerNotFound { .. })
        ));
    }

    #[test]
    fn test_index_for_primer_clips_to_read() {
        let root = create_test_tree();
        let read = Read::new("R1", "rna", "p5", 6, 6, Strand::Pos);
        let (coords, strand) = index_for_primer(&root, &read).unwrap();
        assert_eq!(strand, Strand::Pos);
        assert_eq!(coords.len(), 2);
        assert_eq!((coords[0].region_id.as_str(), coords[0].start, coords[0].stop), ("bc", 0, 4));
        assert_eq!((coords[1].region_id.as_str(), coords[1].start, coords[1].stop), ("umi", 4, 6));
    }

    #[test]
    fn test_index_for_region() {
        let root = create_test_tree();
        let coords = index_for_region(&root, "rna", false).unwrap();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords.last().map(|c| c.stop), Some(39));

        let rev = index_for_region(&root, "rna", true).unwrap();
        assert_eq!(rev[0].region_id, "p7");
        assert_eq!((rev[0].start, rev[0].stop), (0, 10));

        assert!(matches!(
            index_for_region(&root, "missing", false),
            Err(MappingError::RegionNotFound { .. })
        ));
    }

    #[test]
    fn test_filter_no_overlap() {
        let root = create_test_tree();
        let a = Coordinate::new("a", index_for_region(&root, "rna", false).unwrap(), Strand::Pos);
        let b = Coordinate::new("b", index_for_region(&root, "bc", false).unwrap(), Strand::Pos);
        let out = filter_index_no_overlap(vec![a, b]);
        assert_eq!(out[0].rcv.len(), 6);
        assert!(out[1].rcv.is_empty());
    }
}
