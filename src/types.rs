//! Shared types for the keychain
//!
//! Byte layouts are fixed for interoperability:
//! - secret key: 32-byte big-endian scalar
//! - public key: 33-byte compressed point (parity prefix || x)
//! - uncompressed public key: 65 bytes (0x04 || x || y)
//! - signature: 65 bytes (r || s || recovery id)

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ErrorCode, KeychainError, KeychainResult};

pub const SECRET_KEY_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = 33;
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;
pub const SIGNATURE_LEN: usize = 65;
pub const DIGEST_LEN: usize = 32;
pub const SEED_LEN: usize = 32;

pub type SecretKeyBytes = [u8; SECRET_KEY_LEN];
pub type PublicKeyBytes = [u8; PUBLIC_KEY_LEN];
pub type UncompressedPublicKeyBytes = [u8; UNCOMPRESSED_PUBLIC_KEY_LEN];
pub type SignatureBytes = [u8; SIGNATURE_LEN];
pub type Digest = [u8; DIGEST_LEN];

// =============================================================================
// Key Pair
// =============================================================================

/// A compressed public key and the secret scalar it was derived from
///
/// SECURITY: the secret key is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    public_key: PublicKeyBytes,
    secret_key: SecretKeyBytes,
}

impl KeyPair {
    /// Pair up already validated key material
    pub(crate) fn new(public_key: PublicKeyBytes, secret_key: SecretKeyBytes) -> Self {
        Self {
            public_key,
            secret_key,
        }
    }

    pub fn public_key(&self) -> &PublicKeyBytes {
        &self.public_key
    }

    pub fn secret_key(&self) -> &SecretKeyBytes {
        &self.secret_key
    }

    /// Hex view for display and JSON output
    pub fn to_hex(&self) -> KeyPairHex {
        KeyPairHex {
            public_key_hex: hex::encode(self.public_key),
            secret_key_hex: hex::encode(self.secret_key),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Serializable hex form of a [`KeyPair`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPairHex {
    pub public_key_hex: String,
    pub secret_key_hex: String,
}

impl Drop for KeyPairHex {
    fn drop(&mut self) {
        self.secret_key_hex.zeroize();
    }
}

// =============================================================================
// Hex Decoding
// =============================================================================

/// Decode a hex string (optional `0x` prefix) into exactly `N` bytes
pub fn decode_hex_array<const N: usize>(input: &str) -> KeychainResult<[u8; N]> {
    let bytes = decode_hex(input)?;
    let actual = bytes.len();
    <[u8; N]>::try_from(bytes).map_err(|_| {
        KeychainError::new(
            ErrorCode::InvalidLength,
            format!("Expected {} bytes, got {}", N, actual),
        )
    })
}

/// Decode a hex string of any length (optional `0x` prefix)
pub fn decode_hex(input: &str) -> KeychainResult<Vec<u8>> {
    let trimmed = input.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    Ok(hex::decode(stripped)?)
}
