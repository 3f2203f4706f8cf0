//! Key pair and secret generation

use super::material::{AsymmetricKeyPair, KeyHandle, KeyInner};
use crate::api::algorithms::{Algorithm, KeyParams, NamedCurve};
use crate::error::{JwtError, JwtResult};
use p256::elliptic_curve::rand_core::OsRng;
use rand::RngCore;
use rsa::{BigUint, RsaPrivateKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Default secret length for `generate_secret`, in bytes
pub const DEFAULT_SECRET_LEN: usize = 32;

/// RSA modulus lengths accepted by `generate_key_pair`
pub const SUPPORTED_RSA_MODULUS_BITS: [usize; 3] = [2048, 3072, 4096];

/// Overrides for `generate_key_pair`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenerationOptions {
    /// RSA modulus length in bits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_size: Option<usize>,
    /// ECDSA curve name (`P-256`, `P-384`, `P-521`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_curve: Option<String>,
}

impl KeyGenerationOptions {
    /// No overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RSA modulus length
    #[must_use]
    pub fn with_key_size(mut self, bits: usize) -> Self {
        self.key_size = Some(bits);
        self
    }

    /// Set the ECDSA curve
    #[must_use]
    pub fn with_named_curve(mut self, curve: impl Into<String>) -> Self {
        self.named_curve = Some(curve.into());
        self
    }
}

/// Generate a key pair for an asymmetric algorithm
///
/// # Errors
/// Returns `JwtError::UnsupportedAlgorithm` for `HS*` (use [`generate_secret`]) or an
/// unknown curve override, and `JwtError::KeyGeneration` for a rejected modulus length or
/// a failing primitive.
pub fn generate_key_pair(
    algorithm: Algorithm,
    options: Option<&KeyGenerationOptions>,
) -> JwtResult<AsymmetricKeyPair> {
    let options = options.cloned().unwrap_or_default();

    let inner = match algorithm.spec().key_params {
        KeyParams::Secret { .. } => {
            return Err(JwtError::unsupported_algorithm(format!(
                "{algorithm} is symmetric; generate a secret instead of a key pair"
            )));
        }
        KeyParams::Rsa {
            modulus_bits,
            public_exponent,
        } => {
            let bits = options.key_size.unwrap_or(modulus_bits);
            generate_rsa(bits, public_exponent)?
        }
        KeyParams::Curve(NamedCurve::Ed25519) => {
            KeyInner::Ed25519Private(ed25519_dalek::SigningKey::generate(&mut OsRng))
        }
        KeyParams::Curve(default_curve) => {
            let curve = match options.named_curve.as_deref() {
                Some(name) => name.parse::<NamedCurve>()?,
                None => default_curve,
            };
            generate_ec(curve)?
        }
    };

    let private = KeyHandle::new(inner, algorithm);
    tracing::debug!(%algorithm, parameters = ?private.parameters(), "generated key pair");
    AsymmetricKeyPair::from_private(private)
}

fn generate_rsa(bits: usize, public_exponent: u32) -> JwtResult<KeyInner> {
    if !SUPPORTED_RSA_MODULUS_BITS.contains(&bits) {
        return Err(JwtError::key_generation(format!(
            "RSA modulus length must be one of {SUPPORTED_RSA_MODULUS_BITS:?}, got {bits}"
        )));
    }

    let exponent = BigUint::from(public_exponent);
    let key = RsaPrivateKey::new_with_exp(&mut OsRng, bits, &exponent)
        .map_err(|e| JwtError::key_generation(format!("RSA key generation failed: {e}")))?;
    Ok(KeyInner::RsaPrivate(key))
}

fn generate_ec(curve: NamedCurve) -> JwtResult<KeyInner> {
    match curve {
        NamedCurve::P256 => Ok(KeyInner::P256Private(p256::SecretKey::random(&mut OsRng))),
        NamedCurve::P384 => Ok(KeyInner::P384Private(p384::SecretKey::random(&mut OsRng))),
        NamedCurve::P521 => Ok(KeyInner::P521Private(p521::SecretKey::random(&mut OsRng))),
        NamedCurve::Ed25519 => Err(JwtError::unsupported_algorithm(
            "Ed25519 is not an ECDSA curve",
        )),
    }
}

/// Generate an HMAC secret and render it as lowercase hex
///
/// # Errors
/// Returns `JwtError::KeyGeneration` when `len` is zero.
pub fn generate_secret(len: usize) -> JwtResult<String> {
    if len == 0 {
        return Err(JwtError::key_generation("secret length must be positive"));
    }

    let mut bytes = Zeroizing::new(vec![0u8; len]);
    rand::rng().fill_bytes(&mut bytes);
    Ok(hex::encode(bytes.as_slice()))
}
