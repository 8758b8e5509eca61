//! Deterministic Key Derivation
//!
//! Turns seeds into key pairs, and chains those derivations into a sequence.
//!
//! Each step of the chain feeds the seed through [`secp256k1_hash`], a SHA-256
//! salted with an ECDH product, so that predicting neighbouring secrets from a
//! disclosed one requires breaking the curve and not only the digest:
//!
//! ```text
//! next_seed = secp256k1_hash(seed)
//! secret    = rehash_until_valid(sha256(seed || next_seed))
//! ```
//!
//! SECURITY: intermediate seeds are held in `Zeroizing` buffers.

use zeroize::Zeroizing;

use crate::crypto::{sha256, sha256_concat, CurvePrimitives, Secp256k1Curve};
use crate::ecdh::shared_secret;
use crate::error::invariant_violation;
use crate::log_debug;
use crate::types::{KeyPair, SEED_LEN};

use super::validation::{validate_public_key_with, validate_secret_key_with};

const MODULE: &str = "keys::derivation";

/// Derive a key pair from a 32-byte seed
///
/// The seed is re-hashed until the digest is a valid scalar with a valid
/// public key. Every retry hashes the previous digest, never the original
/// seed, so the sequence of candidates is deterministic and never repeats.
///
/// # Panics
///
/// When `seed` is not 32 bytes.
pub fn deterministic_key_pair_from_seed(seed: &[u8]) -> KeyPair {
    deterministic_key_pair_from_seed_with::<Secp256k1Curve>(seed)
}

pub(crate) fn deterministic_key_pair_from_seed_with<C: CurvePrimitives>(seed: &[u8]) -> KeyPair {
    if seed.len() != SEED_LEN {
        invariant_violation(
            MODULE,
            format!("seed must be 32 bytes, got {}", seed.len()),
        );
    }

    let mut current = Zeroizing::new([0u8; SEED_LEN]);
    current.copy_from_slice(seed);

    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let next = sha256(current.as_ref());
        *current = next;

        if !validate_secret_key_with::<C>(current.as_ref()) {
            log_debug!(MODULE, "hashed seed is not a valid scalar, rehashing", attempt = attempts);
            continue;
        }

        let public_key = match C::base_multiply(current.as_ref()) {
            Ok(pk) => pk,
            Err(e) => {
                log_debug!(
                    MODULE,
                    "base multiply failed, rehashing",
                    attempt = attempts,
                    error = e
                );
                continue;
            }
        };

        let validity = validate_public_key_with::<C>(&public_key);
        if !validity.is_valid() {
            log_debug!(
                MODULE,
                "derived public key invalid, rehashing",
                attempt = attempts,
                code = validity.code()
            );
            continue;
        }

        return KeyPair::new(public_key, *current);
    }
}

/// SHA-256 salted with an ECDH computation on the curve
///
/// ```text
/// h      = sha256(input)
/// first  = deterministic_key_pair_from_seed(h)
/// second = deterministic_key_pair_from_seed(sha256(h))
/// output = sha256(h || ecdh(second.public, first.secret))
/// ```
pub fn secp256k1_hash(input: &[u8]) -> [u8; 32] {
    let digest = Zeroizing::new(sha256(input));
    let first = deterministic_key_pair_from_seed(digest.as_ref());

    let rehashed = Zeroizing::new(sha256(digest.as_ref()));
    let second = deterministic_key_pair_from_seed(rehashed.as_ref());

    let shared = match shared_secret(second.public_key(), first.secret_key()) {
        Ok(point) => point,
        Err(e) => invariant_violation(
            MODULE,
            format!("ECDH between derived key pairs failed: {}", e),
        ),
    };

    sha256_concat(digest.as_ref(), &shared)
}

/// One step of the deterministic chain
///
/// Returns the seed for the next step together with this step's key pair.
/// The seed may be any length.
pub fn derivation_step(seed: &[u8]) -> (Zeroizing<[u8; 32]>, KeyPair) {
    let next_seed = Zeroizing::new(secp256k1_hash(seed));
    let combined = Zeroizing::new(sha256_concat(seed, next_seed.as_ref()));
    let key_pair = deterministic_key_pair_from_seed(combined.as_ref());
    (next_seed, key_pair)
}

/// Key pair for an arbitrary-length seed (the first pair of its chain)
pub fn generate_deterministic_key_pair(seed: &[u8]) -> KeyPair {
    let (_, key_pair) = derivation_step(seed);
    key_pair
}

/// The first `count` key pairs of the chain rooted at `seed`
pub fn generate_deterministic_key_pairs(seed: &[u8], count: usize) -> Vec<KeyPair> {
    KeyChain::new(seed).take(count).collect()
}

/// Iterator over the deterministic chain rooted at a seed
///
/// Holds the running chain seed; each call to `next` consumes it and
/// replaces it with the following one.
pub struct KeyChain {
    seed: Zeroizing<Vec<u8>>,
}

impl KeyChain {
    pub fn new(seed: &[u8]) -> Self {
        Self {
            seed: Zeroizing::new(seed.to_vec()),
        }
    }

    /// Seed the next call to `next` will consume
    pub fn chain_seed(&self) -> &[u8] {
        &self.seed
    }
}

impl Iterator for KeyChain {
    type Item = KeyPair;

    fn next(&mut self) -> Option<KeyPair> {
        let (next_seed, key_pair) = derivation_step(&self.seed);
        self.seed = Zeroizing::new(next_seed.to_vec());
        Some(key_pair)
    }
}
