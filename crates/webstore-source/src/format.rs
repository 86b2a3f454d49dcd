// Dataset file format and encoding/decoding
//
// File format (binary):
// [magic: u32 LE] [version: u16 LE] [payload length: u32 LE] [crc32: u32 LE] [payload bytes]
//
// The payload is a bincode-encoded `Dataset`; the checksum covers the payload.

use crc32fast::Hasher;
use tracing::warn;
use webstore_core::{Dataset, Error, Result};

/// Dataset file magic: the bytes "WSDS" (WebStore DataSet) read as a LE u32
pub const DATASET_MAGIC: u32 = u32::from_le_bytes(*b"WSDS");

/// Dataset file format version
pub const DATASET_FORMAT_VERSION: u16 = 1;

/// Header size in bytes
pub const HEADER_LEN: usize = 4 + 2 + 4 + 4;

/// Version compatibility information
pub struct FormatVersion {
    /// Current version of this format
    pub current: u16,
    /// Minimum supported version for reading
    pub min_read: u16,
}

impl FormatVersion {
    /// Check if a version can be read
    pub fn can_read(&self, version: u16) -> bool {
        version >= self.min_read && version <= self.current
    }
}

/// Dataset format version info
pub fn dataset_version() -> FormatVersion {
    FormatVersion {
        current: DATASET_FORMAT_VERSION,
        min_read: 1,
    }
}

/// Encode a dataset with header and checksum
pub fn encode_dataset(dataset: &Dataset) -> Result<Vec<u8>> {
    let payload =
        bincode::serialize(dataset).map_err(|e| Error::Serialization(e.to_string()))?;

    let length = u32::try_from(payload.len()).map_err(|_| {
        Error::Serialization(format!("dataset payload too large: {} bytes", payload.len()))
    })?;

    let mut hasher = Hasher::new();
    hasher.update(&payload);
    let crc = hasher.finalize();

    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(&DATASET_MAGIC.to_le_bytes());
    buf.extend_from_slice(&DATASET_FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&length.to_le_bytes());
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&payload);

    Ok(buf)
}

/// Decode a dataset, verifying header and checksum
pub fn decode_dataset(data: &[u8]) -> Result<Dataset> {
    if data.len() < HEADER_LEN {
        return Err(mismatch(format!(
            "dataset file too short: {} bytes",
            data.len()
        )));
    }

    let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    if magic != DATASET_MAGIC {
        return Err(mismatch(format!("bad dataset magic: {:#010x}", magic)));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if !dataset_version().can_read(version) {
        return Err(mismatch(format!(
            "unsupported dataset format version: {}",
            version
        )));
    }

    let length = u32::from_le_bytes([data[6], data[7], data[8], data[9]]) as usize;
    let stored_crc = u32::from_le_bytes([data[10], data[11], data[12], data[13]]);

    let payload = &data[HEADER_LEN..];
    if payload.len() != length {
        return Err(mismatch(format!(
            "payload length mismatch: header says {}, found {}",
            length,
            payload.len()
        )));
    }

    let mut hasher = Hasher::new();
    hasher.update(payload);
    let computed_crc = hasher.finalize();
    if computed_crc != stored_crc {
        return Err(mismatch(format!(
            "CRC mismatch: expected {:#x}, got {:#x}",
            stored_crc, computed_crc
        )));
    }

    bincode::deserialize(payload).map_err(|e| mismatch(format!("undecodable payload: {}", e)))
}

fn mismatch(msg: String) -> Error {
    warn!(reason = %msg, "dataset rejected");
    Error::SchemaMismatch(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use webstore_core::{Customer, Store};

    fn sample() -> Dataset {
        Dataset {
            customers: vec![Customer {
                id: 1,
                first_name: "Linus".to_string(),
                last_name: "Torvalds".to_string(),
                email: "linus@example.com".to_string(),
            }],
            stores: vec![Store {
                id: 3,
                name: "Harbor".to_string(),
            }],
            ..Dataset::default()
        }
    }

    #[test]
    fn test_encode_decode() {
        let encoded = encode_dataset(&sample()).unwrap();
        assert_eq!(&encoded[..4], b"WSDS");
        assert_eq!(decode_dataset(&encoded).unwrap(), sample());
    }

    #[test]
    fn test_detects_corruption() {
        let mut encoded = encode_dataset(&sample()).unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let err = decode_dataset(&encoded).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(ref msg) if msg.contains("CRC mismatch")));
    }

    #[test]
    fn test_rejects_bad_header() {
        assert!(matches!(
            decode_dataset(&[1, 2, 3]),
            Err(Error::SchemaMismatch(_))
        ));

        let mut encoded = encode_dataset(&sample()).unwrap();
        encoded[0] = b'X';
        assert!(matches!(
            decode_dataset(&encoded),
            Err(Error::SchemaMismatch(ref msg)) if msg.contains("magic")
        ));

        let mut encoded = encode_dataset(&sample()).unwrap();
        encoded[4..6].copy_from_slice(&9u16.to_le_bytes());
        assert!(matches!(
            decode_dataset(&encoded),
            Err(Error::SchemaMismatch(ref msg)) if msg.contains("version")
        ));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let encoded = encode_dataset(&sample()).unwrap();
        let truncated = &encoded[..encoded.len() - 2];
        assert!(matches!(
            decode_dataset(truncated),
            Err(Error::SchemaMismatch(ref msg)) if msg.contains("length mismatch")
        ));
    }

    #[test]
    fn test_version_compatibility() {
        let v = dataset_version();
        assert!(v.can_read(1));
        assert!(!v.can_read(0));
        assert!(!v.can_read(999));
    }
}
