//! Secure randomness

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// Draw `N` bytes from the operating system RNG
///
/// The buffer is zeroized on drop since it usually becomes a secret key or nonce.
pub fn random_bytes<const N: usize>() -> Zeroizing<[u8; N]> {
    let mut bytes = Zeroizing::new([0u8; N]);
    OsRng.fill_bytes(bytes.as_mut());
    bytes
}
