//! Curve Engine Contract
//!
//! Defines the operations the key, signing and ECDH layers need from an
//! elliptic-curve engine. Callers treat these as opaque and already correct.

use super::CurveError;

/// Scalar, point and ECDSA primitives over a compressed-point curve
pub trait CurvePrimitives {
    /// A parsed curve point
    type Point;

    /// True when `secret_key` is a nonzero scalar strictly below the group order
    fn secret_key_is_valid(secret_key: &[u8]) -> bool;

    /// Multiply the base point by `secret_key`, returning the compressed point
    fn base_multiply(secret_key: &[u8]) -> Result<[u8; 33], CurveError>;

    /// Multiply an arbitrary compressed point by `secret_key`
    fn point_multiply(public_key: &[u8], secret_key: &[u8]) -> Result<[u8; 33], CurveError>;

    /// Cheap structural check on a compressed point encoding
    fn public_key_is_valid(public_key: &[u8]) -> bool;

    /// Decode a compressed point; `None` when it is not on the curve
    fn parse_public_key(public_key: &[u8]) -> Option<Self::Point>;

    /// Validate a decoded point
    fn point_is_valid(point: &Self::Point) -> bool;

    /// Serialize a decoded point as `0x04 || x || y`
    fn serialize_uncompressed(point: &Self::Point) -> [u8; 65];

    /// ECDSA sign `digest` with an explicit 32-byte nonce seed.
    /// Returns the compact `r || s` signature and its recovery id.
    fn sign_recoverable(
        secret_key: &[u8],
        digest: &[u8; 32],
        nonce: &[u8; 32],
    ) -> Result<([u8; 64], u8), CurveError>;

    /// Recover the compressed public key that produced `signature` over `digest`
    fn recover_public_key(
        signature: &[u8],
        digest: &[u8; 32],
        recovery_id: u8,
    ) -> Result<[u8; 33], CurveError>;
}
