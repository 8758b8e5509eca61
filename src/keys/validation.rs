//! Key Validation
//!
//! Well-formedness checks for secret scalars and compressed public keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::{CurvePrimitives, Secp256k1Curve};
use crate::types::{PUBLIC_KEY_LEN, SECRET_KEY_LEN};

/// Outcome of validating a compressed public key
///
/// Anything other than [`PublicKeyValidity::Valid`] means the key is unusable;
/// the variant only tells which check rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicKeyValidity {
    Valid,
    /// Not 33 bytes
    InvalidLength,
    /// Rejected by the curve engine's encoding check
    Rejected,
    /// Does not decode to a curve point
    ParseFailed,
    /// Decoded but failed point validation
    ValidationFailed,
}

impl PublicKeyValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Numeric status code: 1 on success, negative per failed check
    pub fn code(&self) -> i32 {
        match self {
            Self::Valid => 1,
            Self::InvalidLength => -1,
            Self::ParseFailed => -2,
            Self::Rejected => -3,
            Self::ValidationFailed => -4,
        }
    }
}

impl fmt::Display for PublicKeyValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Valid => "valid public key",
            Self::InvalidLength => "public key must be 33 bytes",
            Self::Rejected => "public key encoding rejected",
            Self::ParseFailed => "public key does not decode to a curve point",
            Self::ValidationFailed => "public key point validation failed",
        };
        write!(f, "{}", reason)
    }
}

/// Check that `secret_key` is a 32-byte nonzero scalar below the group order
pub fn validate_secret_key(secret_key: &[u8]) -> bool {
    validate_secret_key_with::<Secp256k1Curve>(secret_key)
}

pub(crate) fn validate_secret_key_with<C: CurvePrimitives>(secret_key: &[u8]) -> bool {
    secret_key.len() == SECRET_KEY_LEN && C::secret_key_is_valid(secret_key)
}

/// Validate a compressed public key, reporting which check failed
pub fn validate_public_key(public_key: &[u8]) -> PublicKeyValidity {
    validate_public_key_with::<Secp256k1Curve>(public_key)
}

pub(crate) fn validate_public_key_with<C: CurvePrimitives>(
    public_key: &[u8],
) -> PublicKeyValidity {
    if public_key.len() != PUBLIC_KEY_LEN {
        return PublicKeyValidity::InvalidLength;
    }

    if !C::public_key_is_valid(public_key) {
        return PublicKeyValidity::Rejected;
    }

    let Some(point) = C::parse_public_key(public_key) else {
        return PublicKeyValidity::ParseFailed;
    };

    if !C::point_is_valid(&point) {
        return PublicKeyValidity::ValidationFailed;
    }

    PublicKeyValidity::Valid
}
