//! ECDSA family (ES256, ES384, ES512)
//!
//! Signatures are the fixed-width `r || s` concatenation JWS requires, not DER. The curve fixes
//! the hash: P-256/SHA-256, P-384/SHA-384, P-521/SHA-512.

use crate::error::{JwtError, JwtResult};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use signature::{Signer, Verifier};

fn invalid_key(curve: &str) -> JwtError {
    JwtError::key_mismatch(format!("invalid {curve} key"))
}

fn signing_failed(e: signature::Error) -> JwtError {
    JwtError::signing(format!("ECDSA signing failed: {e}"))
}

/// Sign with P-256 / SHA-256
pub(crate) fn sign_p256(message: &[u8], key: &p256::SecretKey) -> JwtResult<Vec<u8>> {
    let signing_key = p256::ecdsa::SigningKey::from_bytes(&key.to_bytes())
        .map_err(|_| invalid_key("P-256"))?;
    let signature: p256::ecdsa::Signature = signing_key.try_sign(message).map_err(signing_failed)?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify P-256 / SHA-256
pub(crate) fn verify_p256(message: &[u8], signature: &[u8], key: &p256::PublicKey) -> JwtResult<bool> {
    let Ok(signature) = p256::ecdsa::Signature::from_slice(signature) else {
        return Ok(false);
    };
    let verifying_key =
        p256::ecdsa::VerifyingKey::from_sec1_bytes(key.to_encoded_point(false).as_bytes())
            .map_err(|_| invalid_key("P-256"))?;
    Ok(verifying_key.verify(message, &signature).is_ok())
}

/// Sign with P-384 / SHA-384
pub(crate) fn sign_p384(message: &[u8], key: &p384::SecretKey) -> JwtResult<Vec<u8>> {
    let signing_key = p384::ecdsa::SigningKey::from_bytes(&key.to_bytes())
        .map_err(|_| invalid_key("P-384"))?;
    let signature: p384::ecdsa::Signature = signing_key.try_sign(message).map_err(signing_failed)?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify P-384 / SHA-384
pub(crate) fn verify_p384(message: &[u8], signature: &[u8], key: &p384::PublicKey) -> JwtResult<bool> {
    let Ok(signature) = p384::ecdsa::Signature::from_slice(signature) else {
        return Ok(false);
    };
    let verifying_key =
        p384::ecdsa::VerifyingKey::from_sec1_bytes(key.to_encoded_point(false).as_bytes())
            .map_err(|_| invalid_key("P-384"))?;
    Ok(verifying_key.verify(message, &signature).is_ok())
}

/// Sign with P-521 / SHA-512
pub(crate) fn sign_p521(message: &[u8], key: &p521::SecretKey) -> JwtResult<Vec<u8>> {
    let signing_key = p521::ecdsa::SigningKey::from_bytes(&key.to_bytes())
        .map_err(|_| invalid_key("P-521"))?;
    let signature: p521::ecdsa::Signature = signing_key.try_sign(message).map_err(signing_failed)?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify P-521 / SHA-512
pub(crate) fn verify_p521(message: &[u8], signature: &[u8], key: &p521::PublicKey) -> JwtResult<bool> {
    let Ok(signature) = p521::ecdsa::Signature::from_slice(signature) else {
        return Ok(false);
    };
    let verifying_key =
        p521::ecdsa::VerifyingKey::from_sec1_bytes(key.to_encoded_point(false).as_bytes())
            .map_err(|_| invalid_key("P-521"))?;
    Ok(verifying_key.verify(message, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::elliptic_curve::rand_core::OsRng;

    #[test]
    fn signatures_are_fixed_width() {
        let k256 = p256::SecretKey::random(&mut OsRng);
        let k384 = p384::SecretKey::random(&mut OsRng);
        let k521 = p521::SecretKey::random(&mut OsRng);

        assert_eq!(sign_p256(b"m", &k256).unwrap().len(), 64);
        assert_eq!(sign_p384(b"m", &k384).unwrap().len(), 96);
        assert_eq!(sign_p521(b"m", &k521).unwrap().len(), 132);
    }

    #[test]
    fn der_and_wrong_width_signatures_do_not_verify() {
        let key = p256::SecretKey::random(&mut OsRng);
        let raw = sign_p256(b"m", &key).unwrap();
        let der = p256::ecdsa::Signature::from_slice(&raw).unwrap().to_der();

        assert!(verify_p256(b"m", &raw, &key.public_key()).unwrap());
        assert!(!verify_p256(b"m", der.as_bytes(), &key.public_key()).unwrap());
        assert!(!verify_p256(b"m", &raw[..63], &key.public_key()).unwrap());
        assert!(!verify_p256(b"other", &raw, &key.public_key()).unwrap());
    }
}
