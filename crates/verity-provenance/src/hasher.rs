use std::path::Path;

use sha2::{Digest, Sha256};

use verity_core::error::Result;

/// Read `path` fully into memory and return the lowercase hex SHA-256 of
/// its bytes. Unreadable files are an I/O error; existence filtering is the
/// caller's job.
pub fn hash_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hash_bytes(&bytes))
}

/// SHA-256 of a byte slice, hex-encoded.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
