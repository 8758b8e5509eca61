//! Signature Creation
//!
//! Both variants feed a 32-byte nonce seed to the curve engine, which mixes it
//! into RFC 6979 nonce generation. `sign` draws that seed from the OS RNG;
//! `sign_deterministic` hashes a caller-supplied one, so equal inputs always
//! produce equal signatures.
//!
//! The engine only emits low-S signatures, so every signature returned here is
//! canonical. A high-S result is treated as a broken engine.

use zeroize::Zeroizing;

use crate::crypto::{random_bytes, sha256, CurvePrimitives, Secp256k1Curve};
use crate::error::invariant_violation;
use crate::keys::validation::validate_secret_key;
use crate::types::{Digest, SignatureBytes, SECRET_KEY_LEN, SIGNATURE_LEN};

const MODULE: &str = "signing::signer";

/// Sign a 32-byte digest with a fresh random nonce seed
///
/// # Panics
///
/// When `secret_key` is not a valid 32-byte scalar, or when the curve engine
/// fails to sign with it.
pub fn sign(message: &Digest, secret_key: &[u8]) -> SignatureBytes {
    let nonce = random_bytes::<32>();
    sign_with_nonce(message, secret_key, &nonce)
}

/// Sign a 32-byte digest with the nonce seed `sha256(nonce_seed)`
///
/// # Panics
///
/// Same conditions as [`sign`].
pub fn sign_deterministic(
    message: &Digest,
    secret_key: &[u8],
    nonce_seed: &[u8],
) -> SignatureBytes {
    let nonce = Zeroizing::new(sha256(nonce_seed));
    sign_with_nonce(message, secret_key, &nonce)
}

fn sign_with_nonce(message: &Digest, secret_key: &[u8], nonce: &[u8; 32]) -> SignatureBytes {
    if secret_key.len() != SECRET_KEY_LEN {
        invariant_violation(
            MODULE,
            format!("secret key must be 32 bytes, got {}", secret_key.len()),
        );
    }
    if !validate_secret_key(secret_key) {
        invariant_violation(MODULE, "attempting to sign with an invalid secret key");
    }

    let (compact, recovery_id) =
        match Secp256k1Curve::sign_recoverable(secret_key, message, nonce) {
            Ok(result) => result,
            Err(e) => invariant_violation(MODULE, format!("signature operation failed: {}", e)),
        };

    if recovery_id >= 4 {
        invariant_violation(MODULE, format!("recovery id {} out of range", recovery_id));
    }

    let mut signature = [0u8; SIGNATURE_LEN];
    signature[..64].copy_from_slice(&compact);
    signature[64] = recovery_id;

    if signature[32] & 0x80 != 0 {
        invariant_violation(MODULE, "curve engine produced a high-S signature");
    }

    signature
}
