//! Unified error types for the keychain
//!
//! Only the reportable class of failures flows through here: malformed
//! caller input, invalid or malleable signatures, failed recovery and ECDH
//! against an untrusted key. Broken invariants abort instead.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ecdh::EcdhError;
use crate::signing::SignatureError;

/// Main error type for keychain operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeychainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl KeychainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_secret_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSecretKey, msg)
    }

    pub fn invalid_public_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPublicKey, msg)
    }

}

impl fmt::Display for KeychainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for KeychainError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    InvalidLength,
    InvalidSecretKey,
    InvalidPublicKey,

    // Signature errors
    MalleableSignature,
    InvalidRecoveryId,
    RecoveryFailed,
    VerificationFailed,

    // Key exchange
    KeyExchangeFailed,

    // Parse errors
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Result type alias for keychain operations
pub type KeychainResult<T> = Result<T, KeychainError>;

/// Abort on a broken internal invariant.
///
/// These never happen for well-formed input; reaching one means the curve
/// engine or a caller precondition is broken, so there is nothing to retry.
#[track_caller]
pub(crate) fn invariant_violation(module: &'static str, message: impl Into<String>) -> ! {
    let message = message.into();
    crate::log_error!(module, format!("invariant violated: {}", message));
    panic!("{}: {}", module, message);
}

// Conversions from module and library errors

impl From<SignatureError> for KeychainError {
    fn from(e: SignatureError) -> Self {
        let code = match e {
            SignatureError::InvalidLength { .. } => ErrorCode::InvalidLength,
            SignatureError::Malleable => ErrorCode::MalleableSignature,
            SignatureError::InvalidRecoveryId(_) => ErrorCode::InvalidRecoveryId,
            SignatureError::RecoveryFailed => ErrorCode::RecoveryFailed,
            SignatureError::PublicKeyMismatch => ErrorCode::VerificationFailed,
        };
        KeychainError::new(code, e.to_string())
    }
}

impl From<EcdhError> for KeychainError {
    fn from(e: EcdhError) -> Self {
        let code = match e {
            EcdhError::InvalidPublicKey(_) => ErrorCode::InvalidPublicKey,
            EcdhError::MultiplyFailed => ErrorCode::KeyExchangeFailed,
        };
        KeychainError::new(code, e.to_string())
    }
}

impl From<serde_json::Error> for KeychainError {
    fn from(e: serde_json::Error) -> Self {
        KeychainError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for KeychainError {
    fn from(e: hex::FromHexError) -> Self {
        KeychainError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<std::io::Error> for KeychainError {
    fn from(e: std::io::Error) -> Self {
        KeychainError::new(ErrorCode::Internal, e.to_string())
    }
}
