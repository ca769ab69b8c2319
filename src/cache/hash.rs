//! Content hashing for statement fingerprints.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::sql::Statement;

/// Compute the SHA-256 of a serializable value.
///
/// The value is serialized to JSON before hashing. Every AST type
/// serializes its fields in declaration order and named binds live in a
/// `BTreeMap`, so equal trees always hash equally.
/// Returns a 64-character lowercase hexadecimal string.
///
/// # Errors
/// Returns an error if the value cannot be serialized to JSON.
pub fn compute_hash<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

impl Statement {
    /// Stable content hash of this statement, usable as a cache key
    /// outside the process.
    pub fn fingerprint(&self) -> Result<String> {
        compute_hash(self)
    }
}
