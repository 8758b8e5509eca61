//! Signing Module
//!
//! Recoverable ECDSA signatures in a fixed 65-byte layout:
//!
//! ```text
//! [r: 32][s: 32][recovery id: 1]
//! ```
//!
//! A signature is canonical when the top bit of `s` (byte 32) is clear and
//! the recovery id is in `0..=3`. Verification recovers the signer's public
//! key and compares it byte for byte with the expected one.

pub mod signer;
pub mod verify;

pub use signer::{sign, sign_deterministic};
pub use verify::{
    check_signature, explain_signature_failure, recover_public_key, verify_signature,
    verify_signature_detailed, NO_ERROR,
};

/// Reportable signature failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Signature must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Signature fails malleability requirement")]
    Malleable,

    #[error("Signature recovery byte is invalid, must be 0 to 3 (got {0})")]
    InvalidRecoveryId(u8),

    #[error("Public key recovery from signature failed")]
    RecoveryFailed,

    #[error("Input public key and recovered public key do not match")]
    PublicKeyMismatch,
}

pub type SignatureResult<T> = Result<T, SignatureError>;
