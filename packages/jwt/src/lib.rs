//! Compact JSON Web Tokens (RFC 7519 over JWS, RFC 7515)
//!
//! This crate provides:
//! - A base64url codec and compact serializer
//! - A static algorithm registry covering HS, RS, PS and ES 256/384/512 plus EdDSA
//! - Signing and verification dispatched through the registry
//! - Key generation and PEM/JWK import/export behind opaque key handles
//! - Time-claim defaulting and expiry evaluation
//! - Awaitable forms of every operation on the tokio runtime
//!
//! ```no_run
//! use jwtsmith_jwt::{Algorithm, JwtClaims, JwtHeader, KeyMaterial, sign, verify};
//!
//! # fn main() -> jwtsmith_jwt::JwtResult<()> {
//! let key = KeyMaterial::secret("your-256-bit-secret");
//! let claims = JwtClaims { sub: Some("1234567890".into()), ..JwtClaims::default() };
//! let token = sign(&JwtHeader::new(Algorithm::HS256), &claims, &key)?;
//!
//! let result = verify(token.as_str(), &key, Some(Algorithm::HS256))?;
//! assert!(result.is_valid);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
mod error;
pub mod scanner;
mod types;

pub use api::algorithms::{
    Algorithm, AlgorithmFamily, AlgorithmSpec, HashAlgorithm, KeyKind, NamedCurve, REGISTRY,
    base64_url_decode, base64_url_encode, lookup,
};
pub use api::claims::{
    ClaimsBuilder, ExpiryInfo, RegisteredClaim, apply_defaults, apply_defaults_at, expiry,
    expiry_at, is_expired, is_expired_at,
};
pub use api::compact::{decode, encode, signing_input};
pub use api::keys::{
    AsymmetricKeyPair, Jwk, KeyGenerationOptions, KeyHandle, KeyMaterial, KeyParameters, KeyPart,
    KeyUsage, SecretKey, export_key_to_jwk, export_key_to_pem, export_secret_to_jwk,
    generate_key_pair, generate_secret, import_key_from_jwk, import_key_from_pem,
    import_secret_from_jwk,
};
pub use api::signer::{sign, sign_with, verify};
pub use api::{AsyncJwtResult, AsyncJwtResultWithError, Jwt, JwtBuilder, operations};
pub use config::JwtConfig;
pub use error::*;
pub use scanner::{extract_tokens, is_jwt};
pub use types::*;

/// Main entry point
pub struct Jwtsmith;

impl Jwtsmith {
    /// JWT builder
    #[must_use]
    pub fn jwt() -> JwtBuilder {
        JwtBuilder::new()
    }
}
