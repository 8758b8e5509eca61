//! Curve engine that fails on demand
//!
//! Delegates to [`Secp256k1Curve`] but rejects a configured number of
//! scalars, base multiplications and derived points first. Counters are
//! per thread, so each test configures its own.

use std::cell::{Cell, RefCell};

use secp256k1::PublicKey;

use super::{CurveError, CurvePrimitives, Secp256k1Curve};

thread_local! {
    static REJECT_SCALARS: Cell<usize> = const { Cell::new(0) };
    static FAIL_MULTIPLIES: Cell<usize> = const { Cell::new(0) };
    static REJECT_POINTS: Cell<usize> = const { Cell::new(0) };
    static SCALARS_SEEN: RefCell<Vec<[u8; 32]>> = const { RefCell::new(Vec::new()) };
}

/// Take one failure from `counter`, true when one was left
fn take(counter: &'static std::thread::LocalKey<Cell<usize>>) -> bool {
    counter.with(|left| {
        let n = left.get();
        if n > 0 {
            left.set(n - 1);
        }
        n > 0
    })
}

pub(crate) struct FlakyCurve;

impl FlakyCurve {
    /// Arm the failure counters and clear the scalar log
    pub(crate) fn arm(reject_scalars: usize, fail_multiplies: usize, reject_points: usize) {
        REJECT_SCALARS.with(|c| c.set(reject_scalars));
        FAIL_MULTIPLIES.with(|c| c.set(fail_multiplies));
        REJECT_POINTS.with(|c| c.set(reject_points));
        SCALARS_SEEN.with(|seen| seen.borrow_mut().clear());
    }

    /// Failures not yet consumed, as (scalars, multiplies, points)
    pub(crate) fn remaining() -> (usize, usize, usize) {
        (
            REJECT_SCALARS.with(Cell::get),
            FAIL_MULTIPLIES.with(Cell::get),
            REJECT_POINTS.with(Cell::get),
        )
    }

    /// Every scalar the engine was asked to check, in order
    pub(crate) fn scalars_seen() -> Vec<[u8; 32]> {
        SCALARS_SEEN.with(|seen| seen.borrow().clone())
    }
}

impl CurvePrimitives for FlakyCurve {
    type Point = PublicKey;

    fn secret_key_is_valid(secret_key: &[u8]) -> bool {
        if let Ok(scalar) = <[u8; 32]>::try_from(secret_key) {
            SCALARS_SEEN.with(|seen| seen.borrow_mut().push(scalar));
        }
        if take(&REJECT_SCALARS) {
            return false;
        }
        Secp256k1Curve::secret_key_is_valid(secret_key)
    }

    fn base_multiply(secret_key: &[u8]) -> Result<[u8; 33], CurveError> {
        if take(&FAIL_MULTIPLIES) {
            return Err(CurveError::MultiplyFailed("injected failure".to_string()));
        }
        Secp256k1Curve::base_multiply(secret_key)
    }

    fn point_multiply(public_key: &[u8], secret_key: &[u8]) -> Result<[u8; 33], CurveError> {
        Secp256k1Curve::point_multiply(public_key, secret_key)
    }

    fn public_key_is_valid(public_key: &[u8]) -> bool {
        if take(&REJECT_POINTS) {
            return false;
        }
        Secp256k1Curve::public_key_is_valid(public_key)
    }

    fn parse_public_key(public_key: &[u8]) -> Option<PublicKey> {
        Secp256k1Curve::parse_public_key(public_key)
    }

    fn point_is_valid(point: &PublicKey) -> bool {
        Secp256k1Curve::point_is_valid(point)
    }

    fn serialize_uncompressed(point: &PublicKey) -> [u8; 65] {
        Secp256k1Curve::serialize_uncompressed(point)
    }

    fn sign_recoverable(
        secret_key: &[u8],
        digest: &[u8; 32],
        nonce: &[u8; 32],
    ) -> Result<([u8; 64], u8), CurveError> {
        Secp256k1Curve::sign_recoverable(secret_key, digest, nonce)
    }

    fn recover_public_key(
        signature: &[u8],
        digest: &[u8; 32],
        recovery_id: u8,
    ) -> Result<[u8; 33], CurveError> {
        Secp256k1Curve::recover_public_key(signature, digest, recovery_id)
    }
}
