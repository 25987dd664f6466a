//! Spec file loading
//!
//! Reads a seqspec YAML document, optionally gzip or bzip2 compressed, into
//! an [`Assay`]. YAML type tags (`!Assay`, `!Region`, `!Read`, ...) are
//! dropped before decoding.

use crate::core::assay::Assay;
use crate::core::error::{LoadError, LoadResult};
use log::debug;
use serde_yaml::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format for spec files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> LoadResult<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    // First check by extension
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    // Then check by magic bytes
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    // BZ2 magic: "BZh"
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Load a spec file and derive the attributes of every modality tree
pub fn load_spec(path: &Path) -> LoadResult<Assay> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let format = detect_compression(path)?;
    debug!("loading spec {:?} ({:?})", path, format);

    let file = File::open(path)?;
    let reader: Box<dyn Read> = match format {
        CompressionFormat::Gzip => Box::new(flate2::read::MultiGzDecoder::new(file)),
        CompressionFormat::Bzip2 => Box::new(bzip2::read::BzDecoder::new(file)),
        CompressionFormat::Plain => Box::new(file),
    };
    load_spec_reader(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, reader))
}

/// Load a spec from any reader of (uncompressed) YAML
pub fn load_spec_reader<R: Read>(reader: R) -> LoadResult<Assay> {
    let value: Value = serde_yaml::from_reader(reader)?;
    let mut assay: Assay = serde_yaml::from_value(strip_tags(value))?;
    assay.update_spec();
    Ok(assay)
}

/// Load a spec from a YAML string
pub fn load_spec_str(yaml: &str) -> LoadResult<Assay> {
    load_spec_reader(yaml.as_bytes())
}

/// Replace every tagged node by its untagged value, recursively
fn strip_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => strip_tags(tagged.value),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(strip_tags).collect()),
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (strip_tags(k), strip_tags(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAGGED: &str = r#"
!Assay
seqspec_version: 0.3.0
assay_id: demo
name: demo
modalities:
- rna
library_spec:
- !Region
  region_id: rna
  region_type: rna
  name: rna
  sequence_type: joined
  regions:
  - !Region
    region_id: bc
    region_type: barcode
    name: bc
    sequence_type: random
    min_len: 4
    max_len: 4
    regions: null
sequence_spec:
- !Read
  read_id: R1
  name: R1
  modality: rna
  primer_id: bc
  min_len: 4
  max_len: 4
  strand: pos
"#;

    #[test]
    fn test_load_tagged_yaml() {
        let assay = load_spec_str(TAGGED).unwrap();
        let root = assay.get_libspec("rna").unwrap();
        assert_eq!(root.regions.len(), 1);
        // update_spec ran
        assert_eq!(root.sequence, "XXXX");
        assert_eq!(root.max_len, 4);
        assert_eq!(assay.sequence_spec[0].primer_id, "bc");
    }

    #[test]
    fn test_missing_file() {
        let err = load_spec(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }
}
