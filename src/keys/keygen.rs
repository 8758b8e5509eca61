//! Key Generation
//!
//! Creates key pairs from OS entropy and derives public keys from secret keys.
//!
//! SECURITY: candidate secret scalars are zeroized on drop.

use crate::crypto::{random_bytes, CurvePrimitives, Secp256k1Curve};
use crate::error::invariant_violation;
use crate::types::{KeyPair, PublicKeyBytes, UncompressedPublicKeyBytes, SECRET_KEY_LEN};
use crate::log_debug;

use super::validation::{validate_public_key, validate_public_key_with, validate_secret_key_with};

const MODULE: &str = "keys::keygen";

/// Create a new key pair from random entropy
///
/// Draws 32 bytes until they form a valid scalar. Rejection is astronomically
/// unlikely, but every retry draws fresh entropy.
pub fn generate_key_pair() -> KeyPair {
    generate_key_pair_with::<Secp256k1Curve>()
}

pub(crate) fn generate_key_pair_with<C: CurvePrimitives>() -> KeyPair {
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let candidate = random_bytes::<SECRET_KEY_LEN>();
        if !validate_secret_key_with::<C>(candidate.as_ref()) {
            log_debug!(MODULE, "random scalar rejected, redrawing", attempt = attempts);
            continue;
        }

        let public_key = public_key_from_secret_key_with::<C>(candidate.as_ref());
        return KeyPair::new(public_key, *candidate);
    }
}

/// Derive the compressed public key for `secret_key`
///
/// # Panics
///
/// When `secret_key` is not a valid 32-byte scalar, or when the curve engine
/// produces an invalid point for it. Both are invariant violations.
pub fn public_key_from_secret_key(secret_key: &[u8]) -> PublicKeyBytes {
    public_key_from_secret_key_with::<Secp256k1Curve>(secret_key)
}

pub(crate) fn public_key_from_secret_key_with<C: CurvePrimitives>(
    secret_key: &[u8],
) -> PublicKeyBytes {
    if secret_key.len() != SECRET_KEY_LEN {
        invariant_violation(
            MODULE,
            format!("secret key must be 32 bytes, got {}", secret_key.len()),
        );
    }
    if !validate_secret_key_with::<C>(secret_key) {
        invariant_violation(MODULE, "secret key is not a valid scalar");
    }

    let public_key = match C::base_multiply(secret_key) {
        Ok(pk) => pk,
        Err(e) => invariant_violation(
            MODULE,
            format!("base multiply failed for valid scalar: {}", e),
        ),
    };

    let validity = validate_public_key_with::<C>(&public_key);
    if !validity.is_valid() {
        invariant_violation(
            MODULE,
            format!("derived public key invalid (code {}): {}", validity.code(), validity),
        );
    }

    public_key
}

/// Expand a compressed public key into `0x04 || x || y`
///
/// Not a tolerant check: call [`validate_public_key`] first for untrusted keys.
///
/// # Panics
///
/// When `public_key` is not a valid compressed key.
pub fn uncompress_public_key(public_key: &[u8]) -> UncompressedPublicKeyBytes {
    let validity = validate_public_key(public_key);
    if !validity.is_valid() {
        invariant_violation(MODULE, format!("cannot uncompress invalid public key: {}", validity));
    }

    let Some(point) = Secp256k1Curve::parse_public_key(public_key) else {
        invariant_violation(MODULE, "validated public key failed to parse");
    };

    Secp256k1Curve::serialize_uncompressed(&point)
}

/// Uncompressed public key for `secret_key`
pub fn uncompressed_public_key_from_secret_key(secret_key: &[u8]) -> UncompressedPublicKeyBytes {
    let public_key = public_key_from_secret_key(secret_key);
    uncompress_public_key(&public_key)
}
