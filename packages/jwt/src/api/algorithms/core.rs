//! Registry-driven dispatch to the family primitives
//!
//! Resolves key material for the requested operation, checks it fits the algorithm, then
//! calls the primitive selected by the registry row's family and hash.

use super::registry::{Algorithm, AlgorithmFamily};
use super::{ecdsa, eddsa, hmac, rsa};
use crate::api::keys::{KeyHandle, KeyInner, KeyMaterial, KeyPart};
use crate::error::{JwtError, JwtResult};

fn secret_for(algorithm: Algorithm, key: &KeyMaterial) -> JwtResult<&[u8]> {
    let KeyMaterial::Secret(secret) = key else {
        return Err(JwtError::key_mismatch(format!(
            "{algorithm} requires a shared secret, got a {}",
            key.describe()
        )));
    };
    if secret.is_empty() {
        return Err(JwtError::key_mismatch("HMAC secret must not be empty"));
    }
    let recommended = algorithm.hash().output_len();
    if secret.len() < recommended {
        tracing::warn!(
            %algorithm,
            secret_len = secret.len(),
            recommended,
            "HMAC secret is shorter than the hash output"
        );
    }
    Ok(secret.as_bytes())
}

fn asymmetric_mismatch(algorithm: Algorithm) -> JwtError {
    JwtError::key_mismatch(format!("{algorithm} requires a key pair, got a secret"))
}

fn signing_handle(algorithm: Algorithm, key: &KeyMaterial) -> JwtResult<&KeyHandle> {
    let handle = match key {
        KeyMaterial::Secret(_) => return Err(asymmetric_mismatch(algorithm)),
        KeyMaterial::KeyPair(pair) => pair.private(),
        KeyMaterial::Handle(handle) if handle.part() == KeyPart::Private => handle,
        KeyMaterial::Handle(_) => {
            return Err(JwtError::key_mismatch(format!(
                "{algorithm} signing needs a private key, got a public key"
            )));
        }
    };
    handle.ensure_fits(algorithm)?;
    Ok(handle)
}

fn verifying_handle(algorithm: Algorithm, key: &KeyMaterial) -> JwtResult<KeyHandle> {
    let handle = match key {
        KeyMaterial::Secret(_) => return Err(asymmetric_mismatch(algorithm)),
        KeyMaterial::KeyPair(pair) => pair.public().clone(),
        KeyMaterial::Handle(handle) => handle.to_public(),
    };
    handle.ensure_fits(algorithm)?;
    Ok(handle)
}

/// Sign `input` with `algorithm`
///
/// # Errors
/// `JwtError::KeyMismatch` when the key does not fit the algorithm, `JwtError::Signing` when
/// the primitive fails.
pub(crate) fn sign_bytes(
    algorithm: Algorithm,
    input: &[u8],
    key: &KeyMaterial,
) -> JwtResult<Vec<u8>> {
    let family = algorithm.family();
    let hash = algorithm.hash();
    tracing::debug!(%algorithm, ?family, key = key.describe(), "signing");

    if family == AlgorithmFamily::Hmac {
        return hmac::sign(hash, input, secret_for(algorithm, key)?);
    }

    let handle = signing_handle(algorithm, key)?;
    match (family, &handle.inner) {
        (AlgorithmFamily::RsaPkcs1, KeyInner::RsaPrivate(k)) => rsa::sign_pkcs1(hash, input, k),
        (AlgorithmFamily::RsaPss, KeyInner::RsaPrivate(k)) => rsa::sign_pss(hash, input, k),
        (AlgorithmFamily::Ecdsa, KeyInner::P256Private(k)) => ecdsa::sign_p256(input, k),
        (AlgorithmFamily::Ecdsa, KeyInner::P384Private(k)) => ecdsa::sign_p384(input, k),
        (AlgorithmFamily::Ecdsa, KeyInner::P521Private(k)) => ecdsa::sign_p521(input, k),
        (AlgorithmFamily::EdDsa, KeyInner::Ed25519Private(k)) => eddsa::sign(input, k),
        _ => Err(JwtError::key_mismatch(format!(
            "{} cannot sign {algorithm}",
            key.describe()
        ))),
    }
}

/// Check `signature` over `input` with `algorithm`
///
/// A signature of the wrong length or encoding is reported as `Ok(false)`.
///
/// # Errors
/// `JwtError::KeyMismatch` when the key does not fit the algorithm.
pub(crate) fn verify_bytes(
    algorithm: Algorithm,
    input: &[u8],
    signature: &[u8],
    key: &KeyMaterial,
) -> JwtResult<bool> {
    let family = algorithm.family();
    let hash = algorithm.hash();
    tracing::debug!(%algorithm, ?family, key = key.describe(), "verifying");

    if family == AlgorithmFamily::Hmac {
        return hmac::verify(hash, input, signature, secret_for(algorithm, key)?);
    }

    let handle = verifying_handle(algorithm, key)?;
    match (family, &handle.inner) {
        (AlgorithmFamily::RsaPkcs1, KeyInner::RsaPublic(k)) => {
            rsa::verify_pkcs1(hash, input, signature, k)
        }
        (AlgorithmFamily::RsaPss, KeyInner::RsaPublic(k)) => {
            rsa::verify_pss(hash, input, signature, k)
        }
        (AlgorithmFamily::Ecdsa, KeyInner::P256Public(k)) => ecdsa::verify_p256(input, signature, k),
        (AlgorithmFamily::Ecdsa, KeyInner::P384Public(k)) => ecdsa::verify_p384(input, signature, k),
        (AlgorithmFamily::Ecdsa, KeyInner::P521Public(k)) => ecdsa::verify_p521(input, signature, k),
        (AlgorithmFamily::EdDsa, KeyInner::Ed25519Public(k)) => {
            Ok(eddsa::verify(input, signature, k))
        }
        _ => Err(JwtError::key_mismatch(format!(
            "{} cannot verify {algorithm}",
            key.describe()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::keys::{SecretKey, generate_key_pair};

    #[test]
    fn secrets_only_serve_hmac() {
        let secret = KeyMaterial::secret("k");
        assert!(sign_bytes(Algorithm::HS256, b"m", &secret).is_ok());
        assert!(matches!(
            sign_bytes(Algorithm::RS256, b"m", &secret),
            Err(JwtError::KeyMismatch(_))
        ));
        assert!(matches!(
            sign_bytes(Algorithm::HS256, b"m", &KeyMaterial::Secret(SecretKey::from_bytes(vec![]))),
            Err(JwtError::KeyMismatch(_))
        ));
    }

    #[test]
    fn public_handles_verify_but_do_not_sign() {
        let pair = generate_key_pair(Algorithm::EdDSA, None).unwrap();
        let signature = sign_bytes(Algorithm::EdDSA, b"m", &pair.clone().into()).unwrap();
        let public = KeyMaterial::Handle(pair.public().clone());

        assert!(verify_bytes(Algorithm::EdDSA, b"m", &signature, &public).unwrap());
        assert!(matches!(
            sign_bytes(Algorithm::EdDSA, b"m", &public),
            Err(JwtError::KeyMismatch(_))
        ));
    }

    #[test]
    fn curve_must_match_algorithm() {
        let pair: KeyMaterial = generate_key_pair(Algorithm::ES256, None).unwrap().into();
        assert!(matches!(
            sign_bytes(Algorithm::ES384, b"m", &pair),
            Err(JwtError::KeyMismatch(_))
        ));
        assert!(matches!(
            verify_bytes(Algorithm::EdDSA, b"m", &[0; 64], &pair),
            Err(JwtError::KeyMismatch(_))
        ));
    }
}
