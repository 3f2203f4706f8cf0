//! Key material: HMAC secrets and opaque asymmetric key handles

use crate::api::algorithms::{Algorithm, AlgorithmFamily, NamedCurve};
use crate::error::{JwtError, JwtResult};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Which half of a key pair a handle holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPart {
    /// Public key (SPKI)
    Public,
    /// Private key (PKCS8)
    Private,
}

/// What a handle may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUsage {
    /// Produce signatures
    Sign,
    /// Check signatures
    Verify,
}

/// Size parameter of an asymmetric key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyParameters {
    /// RSA modulus length in bits
    RsaModulus(usize),
    /// Named curve
    Curve(NamedCurve),
}

/// HMAC secret, zeroized on drop
#[derive(Clone)]
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    /// Secret from raw bytes
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Secret from text, using its UTF-8 bytes as the key
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED; {}])", self.0.len())
    }
}

#[derive(Clone)]
pub(crate) enum KeyInner {
    RsaPrivate(RsaPrivateKey),
    RsaPublic(RsaPublicKey),
    P256Private(p256::SecretKey),
    P256Public(p256::PublicKey),
    P384Private(p384::SecretKey),
    P384Public(p384::PublicKey),
    P521Private(p521::SecretKey),
    P521Public(p521::PublicKey),
    Ed25519Private(ed25519_dalek::SigningKey),
    Ed25519Public(ed25519_dalek::VerifyingKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyShape {
    Rsa,
    Ec(NamedCurve),
    Ed25519,
}

impl KeyInner {
    pub(crate) fn part(&self) -> KeyPart {
        match self {
            KeyInner::RsaPrivate(_)
            | KeyInner::P256Private(_)
            | KeyInner::P384Private(_)
            | KeyInner::P521Private(_)
            | KeyInner::Ed25519Private(_) => KeyPart::Private,
            KeyInner::RsaPublic(_)
            | KeyInner::P256Public(_)
            | KeyInner::P384Public(_)
            | KeyInner::P521Public(_)
            | KeyInner::Ed25519Public(_) => KeyPart::Public,
        }
    }

    pub(crate) fn shape(&self) -> KeyShape {
        match self {
            KeyInner::RsaPrivate(_) | KeyInner::RsaPublic(_) => KeyShape::Rsa,
            KeyInner::P256Private(_) | KeyInner::P256Public(_) => KeyShape::Ec(NamedCurve::P256),
            KeyInner::P384Private(_) | KeyInner::P384Public(_) => KeyShape::Ec(NamedCurve::P384),
            KeyInner::P521Private(_) | KeyInner::P521Public(_) => KeyShape::Ec(NamedCurve::P521),
            KeyInner::Ed25519Private(_) | KeyInner::Ed25519Public(_) => KeyShape::Ed25519,
        }
    }

    fn parameters(&self) -> KeyParameters {
        match self {
            KeyInner::RsaPrivate(key) => KeyParameters::RsaModulus(key.size() * 8),
            KeyInner::RsaPublic(key) => KeyParameters::RsaModulus(key.size() * 8),
            other => match other.shape() {
                KeyShape::Ec(curve) => KeyParameters::Curve(curve),
                _ => KeyParameters::Curve(NamedCurve::Ed25519),
            },
        }
    }

    pub(crate) fn to_public(&self) -> KeyInner {
        match self {
            KeyInner::RsaPrivate(key) => KeyInner::RsaPublic(key.to_public_key()),
            KeyInner::P256Private(key) => KeyInner::P256Public(key.public_key()),
            KeyInner::P384Private(key) => KeyInner::P384Public(key.public_key()),
            KeyInner::P521Private(key) => KeyInner::P521Public(key.public_key()),
            KeyInner::Ed25519Private(key) => KeyInner::Ed25519Public(key.verifying_key()),
            public => public.clone(),
        }
    }
}

/// Opaque asymmetric key
///
/// A handle is a capability: it can be passed to signing, verification and export, but its
/// key material is never exposed through `Debug` or accessors.
#[derive(Clone)]
pub struct KeyHandle {
    pub(crate) inner: KeyInner,
    algorithm: Algorithm,
}

impl KeyHandle {
    pub(crate) fn new(inner: KeyInner, algorithm: Algorithm) -> Self {
        Self { inner, algorithm }
    }

    /// Algorithm the handle was created or imported for
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Public or private half
    #[must_use]
    pub fn part(&self) -> KeyPart {
        self.inner.part()
    }

    /// `sign` for private keys, `verify` for public keys
    #[must_use]
    pub fn usage(&self) -> KeyUsage {
        match self.part() {
            KeyPart::Private => KeyUsage::Sign,
            KeyPart::Public => KeyUsage::Verify,
        }
    }

    /// Modulus length or curve
    #[must_use]
    pub fn parameters(&self) -> KeyParameters {
        self.inner.parameters()
    }

    /// Public counterpart; a public handle returns a copy of itself
    #[must_use]
    pub fn to_public(&self) -> KeyHandle {
        KeyHandle::new(self.inner.to_public(), self.algorithm)
    }

    /// Whether this key's shape can serve `algorithm`
    ///
    /// RSA keys serve both PKCS1-v1_5 and PSS; EC keys only the algorithm bound to their curve.
    #[must_use]
    pub fn fits(&self, algorithm: Algorithm) -> bool {
        match self.inner.shape() {
            KeyShape::Rsa => algorithm.family().is_rsa(),
            KeyShape::Ec(curve) => {
                algorithm.family() == AlgorithmFamily::Ecdsa && algorithm.curve() == Some(curve)
            }
            KeyShape::Ed25519 => algorithm.family() == AlgorithmFamily::EdDsa,
        }
    }

    pub(crate) fn ensure_fits(&self, algorithm: Algorithm) -> JwtResult<()> {
        if self.fits(algorithm) {
            Ok(())
        } else {
            Err(JwtError::key_mismatch(format!(
                "{} {:?} key cannot be used with {algorithm}",
                describe_parameters(self.parameters()),
                self.part(),
            )))
        }
    }
}

fn describe_parameters(parameters: KeyParameters) -> String {
    match parameters {
        KeyParameters::RsaModulus(bits) => format!("RSA-{bits}"),
        KeyParameters::Curve(curve) => curve.to_string(),
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("algorithm", &self.algorithm)
            .field("part", &self.part())
            .field("parameters", &self.parameters())
            .finish_non_exhaustive()
    }
}

/// Generated or assembled key pair
#[derive(Debug, Clone)]
pub struct AsymmetricKeyPair {
    public: KeyHandle,
    private: KeyHandle,
    algorithm: Algorithm,
    parameters: KeyParameters,
}

impl AsymmetricKeyPair {
    /// Build a pair from a private handle, deriving its public half
    ///
    /// # Errors
    /// Returns `JwtError::KeyMismatch` when the handle holds a public key.
    pub fn from_private(private: KeyHandle) -> JwtResult<Self> {
        if private.part() != KeyPart::Private {
            return Err(JwtError::key_mismatch(
                "a key pair needs a private key to derive from",
            ));
        }
        Ok(Self {
            public: private.to_public(),
            algorithm: private.algorithm(),
            parameters: private.parameters(),
            private,
        })
    }

    /// Public half
    #[must_use]
    pub fn public(&self) -> &KeyHandle {
        &self.public
    }

    /// Private half
    #[must_use]
    pub fn private(&self) -> &KeyHandle {
        &self.private
    }

    /// Algorithm the pair was generated for
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Modulus length or curve
    #[must_use]
    pub fn parameters(&self) -> KeyParameters {
        self.parameters
    }
}

/// Key material accepted by `sign` and `verify`
#[derive(Debug, Clone)]
pub enum KeyMaterial {
    /// Shared secret for `HS*`
    Secret(SecretKey),
    /// Key pair: signs with the private half, verifies with the public half
    KeyPair(AsymmetricKeyPair),
    /// A single imported key; private keys sign and verify, public keys only verify
    Handle(KeyHandle),
}

impl KeyMaterial {
    /// Shared secret from text
    #[must_use]
    pub fn secret(text: &str) -> Self {
        KeyMaterial::Secret(SecretKey::from_text(text))
    }

    /// Short description for diagnostics
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            KeyMaterial::Secret(_) => "secret",
            KeyMaterial::KeyPair(_) => "key pair",
            KeyMaterial::Handle(handle) => match handle.part() {
                KeyPart::Private => "private key",
                KeyPart::Public => "public key",
            },
        }
    }
}

impl From<SecretKey> for KeyMaterial {
    fn from(secret: SecretKey) -> Self {
        KeyMaterial::Secret(secret)
    }
}

impl From<AsymmetricKeyPair> for KeyMaterial {
    fn from(pair: AsymmetricKeyPair) -> Self {
        KeyMaterial::KeyPair(pair)
    }
}

impl From<KeyHandle> for KeyMaterial {
    fn from(handle: KeyHandle) -> Self {
        KeyMaterial::Handle(handle)
    }
}
