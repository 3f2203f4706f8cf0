//! JWT error types

use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// JWT error types
///
/// Signature failures are not represented here: `verify` reports them as data in a
/// [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Token, segment, base64url or JSON structure is malformed
    #[error("{0}")]
    Format(String),

    /// Algorithm identifier is not in the registry, or not usable for the requested operation
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key material does not fit the algorithm's required key kind, family or curve
    #[error("Key mismatch: {0}")]
    KeyMismatch(String),

    /// PEM or JWK text could not be turned into a key
    #[error("Key import failed: {0}")]
    KeyImport(String),

    /// Key could not be rendered in the requested format
    #[error("Key export failed: {0}")]
    KeyExport(String),

    /// Key pair or secret generation failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Header or claims could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The signature primitive itself failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Background task failed before producing a result
    #[error("Background task failed")]
    TaskFailed,
}

impl JwtError {
    /// Create a format error
    #[inline]
    #[must_use]
    pub fn format(msg: impl Into<String>) -> Self {
        JwtError::Format(msg.into())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: impl Into<String>) -> Self {
        JwtError::UnsupportedAlgorithm(alg.into())
    }

    /// Create a key mismatch error
    #[inline]
    #[must_use]
    pub fn key_mismatch(msg: impl Into<String>) -> Self {
        JwtError::KeyMismatch(msg.into())
    }

    /// Create a key import error
    #[inline]
    #[must_use]
    pub fn key_import(msg: impl Into<String>) -> Self {
        JwtError::KeyImport(msg.into())
    }

    /// Create a key export error
    #[inline]
    #[must_use]
    pub fn key_export(msg: impl Into<String>) -> Self {
        JwtError::KeyExport(msg.into())
    }

    /// Create a key generation error
    #[inline]
    #[must_use]
    pub fn key_generation(msg: impl Into<String>) -> Self {
        JwtError::KeyGeneration(msg.into())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        JwtError::Serialization(msg.into())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: impl Into<String>) -> Self {
        JwtError::Signing(msg.into())
    }

    /// True for structural problems with the token text itself
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, JwtError::Format(_))
    }
}

impl From<serde_json::Error> for JwtError {
    fn from(err: serde_json::Error) -> Self {
        JwtError::Serialization(err.to_string())
    }
}
