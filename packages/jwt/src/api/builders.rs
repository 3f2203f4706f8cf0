//! Fluent builder over the signer, verifier and key manager

use super::algorithms::Algorithm;
use super::keys::{self, AsymmetricKeyPair, KeyMaterial, SecretKey};
use super::signer;
use super::validation::AsyncJwtResult;
use crate::config::JwtConfig;
use crate::error::{JwtError, JwtResult};
use crate::types::{JwtClaims, JwtHeader, JwtToken, ValidationResult};
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;

/// Direct builder entry point, equivalent to `Jwtsmith::jwt()`
pub struct Jwt;

impl Jwt {
    /// Create new JWT builder
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::new()
    }
}

/// JWT builder
///
/// Holds an algorithm, key material and header customizations. When an algorithm is set,
/// verification is pinned to it; otherwise it is inferred from the key for signing and taken
/// from the token header for verification.
#[derive(Debug, Clone, Default)]
pub struct JwtBuilder {
    algorithm: Option<Algorithm>,
    key: Option<KeyMaterial>,
    key_id: Option<String>,
    header_params: BTreeMap<String, Value>,
    config: JwtConfig,
}

impl JwtBuilder {
    /// Create new JWT builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set algorithm
    #[inline]
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set a shared secret for `HS*`
    #[inline]
    #[must_use]
    pub fn with_secret(mut self, secret: impl AsRef<[u8]>) -> Self {
        self.key = Some(KeyMaterial::Secret(SecretKey::from_bytes(secret.as_ref())));
        self
    }

    /// Set key material: a secret, a key pair or a single key handle
    #[inline]
    #[must_use]
    pub fn with_key(mut self, key: impl Into<KeyMaterial>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the `kid` header
    #[inline]
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    /// Add an unregistered header parameter
    #[inline]
    #[must_use]
    pub fn with_header_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.header_params.insert(name.into(), value);
        self
    }

    /// Replace the configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: JwtConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Algorithm used for signing: the configured one, else the one the key was made for
    ///
    /// # Errors
    /// Returns `JwtError::KeyMismatch` when neither an algorithm nor a key is set.
    pub fn signing_algorithm(&self) -> JwtResult<Algorithm> {
        if let Some(algorithm) = self.algorithm {
            return Ok(algorithm);
        }
        match &self.key {
            Some(KeyMaterial::Secret(_)) => Ok(Algorithm::HS256),
            Some(KeyMaterial::KeyPair(pair)) => Ok(pair.algorithm()),
            Some(KeyMaterial::Handle(handle)) => Ok(handle.algorithm()),
            None => Err(no_key()),
        }
    }

    /// Header that `sign` would use
    ///
    /// # Errors
    /// Same as [`signing_algorithm`](Self::signing_algorithm).
    pub fn header(&self) -> JwtResult<JwtHeader> {
        let mut header = self.config.header(self.signing_algorithm()?);
        header.kid.clone_from(&self.key_id);
        header.extra.extend(self.header_params.clone());
        Ok(header)
    }

    fn key(&self) -> JwtResult<&KeyMaterial> {
        self.key.as_ref().ok_or_else(no_key)
    }

    /// Sign synchronously, applying configured time defaults first
    ///
    /// # Errors
    /// Any error of [`signer::sign`], or `JwtError::KeyMismatch` when no key is set.
    pub fn sign_now(&self, claims: JwtClaims) -> JwtResult<JwtToken> {
        let header = self.header()?;
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let claims = self.config.prepare_claims(claims, now);
        signer::sign(&header, &claims, self.key()?)
    }

    /// Verify synchronously
    ///
    /// # Errors
    /// `JwtError::Format` for structurally broken tokens, `JwtError::KeyMismatch` when no key
    /// is set.
    pub fn verify_now(&self, token: &str) -> JwtResult<ValidationResult> {
        signer::verify(token, self.key()?, self.algorithm)
    }

    /// Sign on the blocking pool
    pub fn sign(&self, claims: JwtClaims) -> AsyncJwtResult<JwtToken> {
        let builder = self.clone();
        AsyncJwtResult::spawn_blocking(move || builder.sign_now(claims))
    }

    /// Verify on the blocking pool
    pub fn verify(&self, token: impl Into<String>) -> AsyncJwtResult<ValidationResult> {
        let builder = self.clone();
        let token = token.into();
        AsyncJwtResult::spawn_blocking(move || builder.verify_now(&token))
    }

    /// Generate a key pair for the configured algorithm and use it as this builder's key
    ///
    /// # Errors
    /// `JwtError::KeyMismatch` without an algorithm, otherwise any error of
    /// [`keys::generate_key_pair`].
    pub fn with_generated_key_pair(self) -> JwtResult<(Self, AsymmetricKeyPair)> {
        let algorithm = self
            .algorithm
            .ok_or_else(|| JwtError::key_mismatch("set an algorithm before generating a key"))?;
        let options = self.config.key_generation_options(algorithm);
        let pair = keys::generate_key_pair(algorithm, Some(&options))?;
        Ok((self.with_key(pair.clone()), pair))
    }

    /// Generate a secret of the configured length and use it as this builder's key
    ///
    /// Returns the hex text; its ASCII bytes are the HMAC key, as with any text secret.
    ///
    /// # Errors
    /// Any error of [`keys::generate_secret`].
    pub fn with_generated_secret(self) -> JwtResult<(Self, String)> {
        let secret = keys::generate_secret(self.config.secret_len)?;
        Ok((self.with_secret(&secret), secret))
    }
}

fn no_key() -> JwtError {
    JwtError::key_mismatch("no key material configured")
}
