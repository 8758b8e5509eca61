//! Key Module
//!
//! Validation, generation and deterministic derivation of secp256k1 keys.
//!
//! # Example
//!
//! ```rust
//! use secp_keychain::keys::{generate_key_pair, public_key_from_secret_key};
//!
//! let pair = generate_key_pair();
//! assert_eq!(&public_key_from_secret_key(pair.secret_key()), pair.public_key());
//! ```

pub mod derivation;
pub mod keygen;
pub mod validation;

pub use derivation::{
    derivation_step, deterministic_key_pair_from_seed, generate_deterministic_key_pair,
    generate_deterministic_key_pairs, secp256k1_hash, KeyChain,
};
pub use keygen::{
    generate_key_pair, public_key_from_secret_key, uncompress_public_key,
    uncompressed_public_key_from_secret_key,
};
pub use validation::{validate_public_key, validate_secret_key, PublicKeyValidity};
