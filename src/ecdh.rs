//! Elliptic-Curve Diffie-Hellman
//!
//! The shared point is `public_key * secret_key`, returned compressed.
//! Public keys here usually come from the outside world, so an unusable key
//! is reported rather than treated as an invariant violation.

use crate::crypto::{CurvePrimitives, Secp256k1Curve};
use crate::error::invariant_violation;
use crate::keys::validation::{validate_public_key, PublicKeyValidity};
use crate::log_debug;
use crate::types::{PublicKeyBytes, SECRET_KEY_LEN};

const MODULE: &str = "ecdh";

/// Reportable ECDH failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EcdhError {
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(PublicKeyValidity),

    #[error("Point multiplication did not produce a valid point")]
    MultiplyFailed,
}

/// Derive the shared point between `public_key` and `secret_key`
///
/// # Panics
///
/// When `secret_key` is not 32 bytes.
pub fn shared_secret(public_key: &[u8], secret_key: &[u8]) -> Result<PublicKeyBytes, EcdhError> {
    if secret_key.len() != SECRET_KEY_LEN {
        invariant_violation(
            MODULE,
            format!("secret key must be 32 bytes, got {}", secret_key.len()),
        );
    }

    let validity = validate_public_key(public_key);
    if !validity.is_valid() {
        log_debug!(MODULE, "rejecting ECDH with invalid public key", code = validity.code());
        return Err(EcdhError::InvalidPublicKey(validity));
    }

    Secp256k1Curve::point_multiply(public_key, secret_key).map_err(|e| {
        log_debug!(MODULE, "point multiplication failed", error = e);
        EcdhError::MultiplyFailed
    })
}
