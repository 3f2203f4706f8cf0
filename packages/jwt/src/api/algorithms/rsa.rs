//! RSA families: RSASSA-PKCS1-v1_5 (RS*) and RSASSA-PSS (PS*)
//!
//! PSS uses MGF1 with the same hash and a salt as long as the digest (RFC 7518 §3.5).

use super::registry::HashAlgorithm;
use crate::error::{JwtError, JwtResult};
use p256::elliptic_curve::rand_core::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey, pkcs1v15, pss};
use sha2::{Sha256, Sha384, Sha512};
use signature::{RandomizedSigner, SignatureEncoding, Signer, Verifier};

fn signing_failed(e: signature::Error) -> JwtError {
    JwtError::signing(format!("RSA signing failed: {e}"))
}

fn no_intrinsic_hash() -> JwtError {
    JwtError::unsupported_algorithm("RSA needs an explicit hash")
}

/// Sign with RSASSA-PKCS1-v1_5
pub(crate) fn sign_pkcs1(
    hash: HashAlgorithm,
    message: &[u8],
    key: &RsaPrivateKey,
) -> JwtResult<Vec<u8>> {
    let key = key.clone();
    let signature = match hash {
        HashAlgorithm::Sha256 => pkcs1v15::SigningKey::<Sha256>::new(key).try_sign(message),
        HashAlgorithm::Sha384 => pkcs1v15::SigningKey::<Sha384>::new(key).try_sign(message),
        HashAlgorithm::Sha512 => pkcs1v15::SigningKey::<Sha512>::new(key).try_sign(message),
        HashAlgorithm::Intrinsic => return Err(no_intrinsic_hash()),
    };
    signature.map(|sig| sig.to_vec()).map_err(signing_failed)
}

/// Verify RSASSA-PKCS1-v1_5
pub(crate) fn verify_pkcs1(
    hash: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
    key: &RsaPublicKey,
) -> JwtResult<bool> {
    let Ok(signature) = pkcs1v15::Signature::try_from(signature) else {
        return Ok(false);
    };
    let key = key.clone();
    let verified = match hash {
        HashAlgorithm::Sha256 => pkcs1v15::VerifyingKey::<Sha256>::new(key).verify(message, &signature),
        HashAlgorithm::Sha384 => pkcs1v15::VerifyingKey::<Sha384>::new(key).verify(message, &signature),
        HashAlgorithm::Sha512 => pkcs1v15::VerifyingKey::<Sha512>::new(key).verify(message, &signature),
        HashAlgorithm::Intrinsic => return Err(no_intrinsic_hash()),
    };
    Ok(verified.is_ok())
}

/// Sign with RSASSA-PSS; every call draws a fresh salt
pub(crate) fn sign_pss(
    hash: HashAlgorithm,
    message: &[u8],
    key: &RsaPrivateKey,
) -> JwtResult<Vec<u8>> {
    let key = key.clone();
    let signature = match hash {
        HashAlgorithm::Sha256 => {
            pss::SigningKey::<Sha256>::new(key).try_sign_with_rng(&mut OsRng, message)
        }
        HashAlgorithm::Sha384 => {
            pss::SigningKey::<Sha384>::new(key).try_sign_with_rng(&mut OsRng, message)
        }
        HashAlgorithm::Sha512 => {
            pss::SigningKey::<Sha512>::new(key).try_sign_with_rng(&mut OsRng, message)
        }
        HashAlgorithm::Intrinsic => return Err(no_intrinsic_hash()),
    };
    signature.map(|sig| sig.to_vec()).map_err(signing_failed)
}

/// Verify RSASSA-PSS
pub(crate) fn verify_pss(
    hash: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
    key: &RsaPublicKey,
) -> JwtResult<bool> {
    let Ok(signature) = pss::Signature::try_from(signature) else {
        return Ok(false);
    };
    let key = key.clone();
    let verified = match hash {
        HashAlgorithm::Sha256 => pss::VerifyingKey::<Sha256>::new(key).verify(message, &signature),
        HashAlgorithm::Sha384 => pss::VerifyingKey::<Sha384>::new(key).verify(message, &signature),
        HashAlgorithm::Sha512 => pss::VerifyingKey::<Sha512>::new(key).verify(message, &signature),
        HashAlgorithm::Intrinsic => return Err(no_intrinsic_hash()),
    };
    Ok(verified.is_ok())
}
