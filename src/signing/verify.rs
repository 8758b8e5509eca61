//! Signature Verification & Public Key Recovery
//!
//! Signatures are verified by recovery: a signature is valid for a key when
//! it is canonical and recovers exactly that key. None of the failures here
//! are fatal, since validating third-party signatures is routine.

use crate::crypto::{CurvePrimitives, Secp256k1Curve};
use crate::error::invariant_violation;
use crate::keys::validation::validate_public_key;
use crate::log_debug;
use crate::types::{Digest, PublicKeyBytes, SignatureBytes, SIGNATURE_LEN};

use super::{SignatureError, SignatureResult};

const MODULE: &str = "signing::verify";

/// Reason reported by [`explain_signature_failure`] for a valid signature
pub const NO_ERROR: &str = "No error";

/// Check the signature layout: length, low-S form and recovery id range
pub fn check_signature(signature: &[u8]) -> SignatureResult<()> {
    if signature.len() != SIGNATURE_LEN {
        return Err(SignatureError::InvalidLength {
            expected: SIGNATURE_LEN,
            actual: signature.len(),
        });
    }

    // Top bit of s must be clear
    if signature[32] >> 7 == 1 {
        return Err(SignatureError::Malleable);
    }

    if signature[64] >= 4 {
        return Err(SignatureError::InvalidRecoveryId(signature[64]));
    }

    Ok(())
}

/// Recover the public key that signed `message`
///
/// Does not check the low-S form; use [`verify_signature`] for that.
pub fn recover_public_key(message: &Digest, signature: &[u8]) -> SignatureResult<PublicKeyBytes> {
    if signature.len() != SIGNATURE_LEN {
        return Err(SignatureError::InvalidLength {
            expected: SIGNATURE_LEN,
            actual: signature.len(),
        });
    }

    let recovery_id = signature[64];
    let public_key = Secp256k1Curve::recover_public_key(&signature[..64], message, recovery_id)
        .map_err(|e| {
            log_debug!(MODULE, "public key recovery failed", error = e, recovery_id = recovery_id);
            SignatureError::RecoveryFailed
        })?;

    let validity = validate_public_key(&public_key);
    if !validity.is_valid() {
        invariant_violation(MODULE, format!("recovered public key is invalid: {}", validity));
    }

    Ok(public_key)
}

/// Verify `signature` over `message` against `public_key`, reporting why it failed
pub fn verify_signature_detailed(
    message: &Digest,
    signature: &[u8],
    public_key: &[u8],
) -> SignatureResult<()> {
    check_signature(signature)?;

    let recovered = recover_public_key(message, signature)?;
    if recovered.as_slice() != public_key {
        return Err(SignatureError::PublicKeyMismatch);
    }

    Ok(())
}

/// True when `signature` is a canonical signature by `public_key` over `message`
pub fn verify_signature(message: &Digest, signature: &[u8], public_key: &[u8]) -> bool {
    verify_signature_detailed(message, signature, public_key).is_ok()
}

/// Human-readable verification outcome
///
/// One of: malleability violation, invalid recovery id, recovery failure,
/// key mismatch, or [`NO_ERROR`].
pub fn explain_signature_failure(
    message: &Digest,
    signature: &SignatureBytes,
    public_key: &PublicKeyBytes,
) -> String {
    match verify_signature_detailed(message, signature, public_key) {
        Ok(()) => NO_ERROR.to_string(),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha256;
    use crate::keys::{deterministic_key_pair_from_seed, generate_key_pair};
    use crate::signing::{sign, sign_deterministic};

    fn signed_fixture() -> (Digest, SignatureBytes, PublicKeyBytes) {
        let pair = deterministic_key_pair_from_seed(&[9u8; 32]);
        let message = sha256(b"fixture message");
        let signature = sign_deterministic(&message, pair.secret_key(), b"fixture nonce");
        (message, signature, *pair.public_key())
    }

    #[test]
    fn test_verify_valid_signature() {
        let (message, signature, public_key) = signed_fixture();
        assert!(verify_signature(&message, &signature, &public_key));
        assert_eq!(explain_signature_failure(&message, &signature, &public_key), NO_ERROR);
    }

    #[test]
    fn test_check_signature_length() {
        assert_eq!(
            check_signature(&[0u8; 64]),
            Err(SignatureError::InvalidLength { expected: 65, actual: 64 })
        );
        assert!(!verify_signature(&[0u8; 32], &[0u8; 64], &[0u8; 33]));
    }

    #[test]
    fn test_malleable_signature_rejected() {
        let (message, mut signature, public_key) = signed_fixture();
        signature[32] |= 0x80;

        assert_eq!(check_signature(&signature), Err(SignatureError::Malleable));
        assert!(!verify_signature(&message, &signature, &public_key));
        assert_eq!(
            explain_signature_failure(&message, &signature, &public_key),
            "Signature fails malleability requirement"
        );
    }

    #[test]
    fn test_bad_recovery_id_rejected() {
        let (message, mut signature, public_key) = signed_fixture();
        signature[64] = 4;

        assert_eq!(check_signature(&signature), Err(SignatureError::InvalidRecoveryId(4)));
        assert!(!verify_signature(&message, &signature, &public_key));
        assert!(explain_signature_failure(&message, &signature, &public_key)
            .starts_with("Signature recovery byte is invalid"));
    }

    #[test]
    fn test_recovery_failure_reported() {
        let (message, _, public_key) = signed_fixture();
        // r = 0 can never be recovered
        let signature = [0u8; 65];

        assert_eq!(
            recover_public_key(&message, &signature),
            Err(SignatureError::RecoveryFailed)
        );
        assert!(!verify_signature(&message, &signature, &public_key));
        assert_eq!(
            explain_signature_failure(&message, &signature, &public_key),
            "Public key recovery from signature failed"
        );
    }

    #[test]
    fn test_key_mismatch_reported() {
        let (message, signature, _) = signed_fixture();
        let stranger = generate_key_pair();

        assert!(!verify_signature(&message, &signature, stranger.public_key()));
        assert_eq!(
            explain_signature_failure(&message, &signature, stranger.public_key()),
            "Input public key and recovered public key do not match"
        );
    }

    #[test]
    fn test_wrong_message_does_not_verify() {
        let (_, signature, public_key) = signed_fixture();
        let other = sha256(b"another message");
        assert!(!verify_signature(&other, &signature, &public_key));
    }

    #[test]
    fn test_recover_matches_signer() {
        let pair = generate_key_pair();
        let message = sha256(b"recover me");
        let signature = sign(&message, pair.secret_key());

        assert_eq!(&recover_public_key(&message, &signature).unwrap(), pair.public_key());
        assert_eq!(
            recover_public_key(&message, &signature[..10]),
            Err(SignatureError::InvalidLength { expected: 65, actual: 10 })
        );
    }
}
