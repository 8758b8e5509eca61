//! SHA-256 helpers
//!
//! Every digest in the keychain is a plain, stateless SHA-256.

use sha2::{Digest, Sha256};

/// SHA-256 of `data`
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 of `left || right` without allocating the concatenation
pub fn sha256_concat(left: &[u8], right: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}
