//! Cryptographic primitives for the keychain
//!
//! This module wraps the collaborators the key and signature layers rely on:
//! - secp256k1 scalar / point arithmetic and ECDSA sign / recover
//! - SHA-256 digests
//! - OS randomness

pub mod curve;
pub mod hash;
#[cfg(test)]
pub(crate) mod mock;
pub mod random;
pub mod traits;

pub use hash::{sha256, sha256_concat};
pub use random::random_bytes;
pub use curve::Secp256k1Curve;
pub use traits::CurvePrimitives;

use serde::{Deserialize, Serialize};

// MARK: - Curve Errors

/// Errors reported by the curve engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveError {
    InvalidSecretKey(String),
    InvalidPublicKey(String),
    InvalidSignature(String),
    SigningFailed(String),
    RecoveryFailed(String),
    MultiplyFailed(String),
}

impl std::fmt::Display for CurveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSecretKey(s) => write!(f, "Invalid secret key: {}", s),
            Self::InvalidPublicKey(s) => write!(f, "Invalid public key: {}", s),
            Self::InvalidSignature(s) => write!(f, "Invalid signature: {}", s),
            Self::SigningFailed(s) => write!(f, "Signing failed: {}", s),
            Self::RecoveryFailed(s) => write!(f, "Recovery failed: {}", s),
            Self::MultiplyFailed(s) => write!(f, "Point multiplication failed: {}", s),
        }
    }
}

impl std::error::Error for CurveError {}
