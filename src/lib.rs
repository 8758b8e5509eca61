//! secp-keychain
//!
//! Key management and recoverable signatures on secp256k1.
//!
//! # Architecture
//!
//! This crate provides:
//! - **crypto**: the curve engine adapter, SHA-256 and OS randomness
//! - **keys**: key validation, random and deterministic key generation,
//!   and the hash-chained deterministic key sequence
//! - **signing**: recoverable signatures, canonical-form checks, recovery
//!   and verification
//! - **ecdh**: shared points between key pairs
//! - **utils**: structured logging and runtime settings
//!
//! All operations are synchronous functions over independently owned byte
//! buffers and are safe to call from many threads at once.
//!
//! # Failure model
//!
//! Malformed or untrusted input (signatures, public keys for ECDH) yields a
//! reportable error. Violated invariants, such as a valid scalar without a
//! public key, abort with a panic.
//!
//! # Security
//!
//! Secret keys, seeds and nonces are held in `zeroize` wrappers and cleared
//! when dropped.
//!
//! # Example
//!
//! ```rust
//! use secp_keychain::{keys, signing, crypto};
//!
//! let pair = keys::generate_key_pair();
//! let digest = crypto::sha256(b"hello");
//! let signature = signing::sign(&digest, pair.secret_key());
//! assert!(signing::verify_signature(&digest, &signature, pair.public_key()));
//! ```

pub mod crypto;
pub mod ecdh;
pub mod error;
pub mod keys;
pub mod signing;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use error::{ErrorCode, KeychainError, KeychainResult};
pub use types::*;

pub use ecdh::{shared_secret, EcdhError};
pub use keys::{
    derivation_step, deterministic_key_pair_from_seed, generate_deterministic_key_pair,
    generate_deterministic_key_pairs, generate_key_pair, public_key_from_secret_key,
    secp256k1_hash, uncompress_public_key, uncompressed_public_key_from_secret_key,
    validate_public_key, validate_secret_key, KeyChain, PublicKeyValidity,
};
pub use signing::{
    check_signature, explain_signature_failure, recover_public_key, sign, sign_deterministic,
    verify_signature, verify_signature_detailed, SignatureError,
};
