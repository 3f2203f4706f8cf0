//! EdDSA family (Ed25519)

use crate::error::{JwtError, JwtResult};
use ed25519_dalek::{Signature, SigningKey, VerifyingKey};
use signature::Signer;

/// Sign with Ed25519
pub(crate) fn sign(message: &[u8], key: &SigningKey) -> JwtResult<Vec<u8>> {
    let signature: Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::signing(format!("Ed25519 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify with Ed25519, rejecting small-order keys and non-canonical signatures
pub(crate) fn verify(message: &[u8], signature: &[u8], key: &VerifyingKey) -> bool {
    Signature::from_slice(signature)
        .map(|signature| key.verify_strict(message, &signature).is_ok())
        .unwrap_or(false)
}
