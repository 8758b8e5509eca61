//! secp256k1 Curve Engine
//!
//! Adapter over the `secp256k1` crate (libsecp256k1 bindings).
//!
//! Features:
//! - Scalar validity checks
//! - Base-point and arbitrary-point multiplication (compressed output)
//! - Compressed point parsing and uncompressed serialization
//! - Recoverable ECDSA signing with caller-supplied nonce data
//! - Public key recovery

use std::sync::OnceLock;

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};

use super::{CurveError, CurvePrimitives};

/// Shared signing + verification context
static CONTEXT: OnceLock<Secp256k1<All>> = OnceLock::new();

fn context() -> &'static Secp256k1<All> {
    CONTEXT.get_or_init(Secp256k1::new)
}

/// secp256k1 curve engine
pub struct Secp256k1Curve;

impl CurvePrimitives for Secp256k1Curve {
    type Point = PublicKey;

    fn secret_key_is_valid(secret_key: &[u8]) -> bool {
        secret_key.len() == 32 && SecretKey::from_slice(secret_key).is_ok()
    }

    fn base_multiply(secret_key: &[u8]) -> Result<[u8; 33], CurveError> {
        let sk = SecretKey::from_slice(secret_key)
            .map_err(|e| CurveError::InvalidSecretKey(e.to_string()))?;

        let pk = PublicKey::from_secret_key(context(), &sk);
        Ok(pk.serialize())
    }

    fn point_multiply(public_key: &[u8], secret_key: &[u8]) -> Result<[u8; 33], CurveError> {
        let sk = SecretKey::from_slice(secret_key)
            .map_err(|e| CurveError::InvalidSecretKey(e.to_string()))?;

        let pk = PublicKey::from_slice(public_key)
            .map_err(|e| CurveError::InvalidPublicKey(e.to_string()))?;

        // x || y of pk * sk
        let shared_point = secp256k1::ecdh::shared_secret_point(&pk, &sk);

        let mut compressed = [0u8; 33];
        compressed[0] = 0x02 | (shared_point[63] & 1);
        compressed[1..].copy_from_slice(&shared_point[..32]);

        // Round-trip through the parser so a malformed product never escapes
        PublicKey::from_slice(&compressed)
            .map(|p| p.serialize())
            .map_err(|e| CurveError::MultiplyFailed(e.to_string()))
    }

    fn public_key_is_valid(public_key: &[u8]) -> bool {
        public_key.len() == 33 && matches!(public_key[0], 0x02 | 0x03)
    }

    fn parse_public_key(public_key: &[u8]) -> Option<PublicKey> {
        PublicKey::from_slice(public_key).ok()
    }

    fn point_is_valid(point: &PublicKey) -> bool {
        PublicKey::from_slice(&point.serialize())
            .map(|reparsed| reparsed == *point)
            .unwrap_or(false)
    }

    fn serialize_uncompressed(point: &PublicKey) -> [u8; 65] {
        point.serialize_uncompressed()
    }

    fn sign_recoverable(
        secret_key: &[u8],
        digest: &[u8; 32],
        nonce: &[u8; 32],
    ) -> Result<([u8; 64], u8), CurveError> {
        let sk = SecretKey::from_slice(secret_key)
            .map_err(|e| CurveError::InvalidSecretKey(e.to_string()))?;

        let msg = Message::from_digest(*digest);

        // The nonce seed is mixed into RFC 6979 nonce generation as extra data,
        // so equal (key, digest, nonce) always give the same signature.
        let sig = context().sign_ecdsa_recoverable_with_noncedata(&msg, &sk, nonce);

        let (recovery_id, serialized) = sig.serialize_compact();
        let recovery_id = u8::try_from(recovery_id.to_i32())
            .map_err(|e| CurveError::SigningFailed(format!("Recovery id out of range: {}", e)))?;

        Ok((serialized, recovery_id))
    }

    fn recover_public_key(
        signature: &[u8],
        digest: &[u8; 32],
        recovery_id: u8,
    ) -> Result<[u8; 33], CurveError> {
        if signature.len() != 64 {
            return Err(CurveError::InvalidSignature(format!(
                "Signature must be 64 bytes, got {}",
                signature.len()
            )));
        }

        let rec_id = RecoveryId::from_i32(i32::from(recovery_id))
            .map_err(|e| CurveError::InvalidSignature(format!("Invalid recovery ID: {}", e)))?;

        let sig = RecoverableSignature::from_compact(signature, rec_id)
            .map_err(|e| CurveError::InvalidSignature(e.to_string()))?;

        let msg = Message::from_digest(*digest);

        let pk = context()
            .recover_ecdsa(&msg, &sig)
            .map_err(|e| CurveError::RecoveryFailed(e.to_string()))?;

        Ok(pk.serialize())
    }
}

// MARK: - Tests
