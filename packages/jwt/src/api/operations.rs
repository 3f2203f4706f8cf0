//! Awaitable forms of every collaborator operation
//!
//! Each function moves its inputs onto the blocking pool, runs the synchronous operation there
//! and returns an [`AsyncJwtResult`]. One suspension point per call; no shared state.
//! Must be called from within a tokio runtime.

use super::algorithms::Algorithm;
use super::claims;
use super::compact;
use super::keys::{self, AsymmetricKeyPair, Jwk, KeyGenerationOptions, KeyHandle, KeyMaterial, KeyPart};
use super::signer;
use super::validation::AsyncJwtResult;
use crate::types::{DecodedToken, JwtClaims, JwtHeader, JwtToken, ValidationResult};

/// Awaitable [`signer::sign`]
pub fn sign(header: JwtHeader, claims: JwtClaims, key: KeyMaterial) -> AsyncJwtResult<JwtToken> {
    AsyncJwtResult::spawn_blocking(move || signer::sign(&header, &claims, &key))
}

/// Awaitable [`signer::sign_with`]
pub fn sign_with(
    algorithm: Algorithm,
    header: JwtHeader,
    claims: JwtClaims,
    key: KeyMaterial,
) -> AsyncJwtResult<JwtToken> {
    AsyncJwtResult::spawn_blocking(move || signer::sign_with(algorithm, &header, &claims, &key))
}

/// Awaitable [`compact::decode`]
pub fn decode(token: impl Into<String>) -> AsyncJwtResult<DecodedToken> {
    let token = token.into();
    AsyncJwtResult::spawn_blocking(move || compact::decode(&token))
}

/// Awaitable [`signer::verify`]
pub fn verify(
    token: impl Into<String>,
    key: KeyMaterial,
    expected: Option<Algorithm>,
) -> AsyncJwtResult<ValidationResult> {
    let token = token.into();
    AsyncJwtResult::spawn_blocking(move || signer::verify(&token, &key, expected))
}

/// Awaitable [`keys::generate_key_pair`]
pub fn generate_key_pair(
    algorithm: Algorithm,
    options: Option<KeyGenerationOptions>,
) -> AsyncJwtResult<AsymmetricKeyPair> {
    AsyncJwtResult::spawn_blocking(move || keys::generate_key_pair(algorithm, options.as_ref()))
}

/// Awaitable [`keys::generate_secret`]
pub fn generate_secret(len: Option<usize>) -> AsyncJwtResult<String> {
    AsyncJwtResult::spawn_blocking(move || {
        keys::generate_secret(len.unwrap_or(keys::DEFAULT_SECRET_LEN))
    })
}

/// Awaitable [`keys::export_key_to_pem`]
pub fn export_key_to_pem(handle: KeyHandle, part: KeyPart) -> AsyncJwtResult<String> {
    AsyncJwtResult::spawn_blocking(move || keys::export_key_to_pem(&handle, part))
}

/// Awaitable [`keys::import_key_from_pem`]
pub fn import_key_from_pem(pem: impl Into<String>, algorithm: Algorithm) -> AsyncJwtResult<KeyHandle> {
    let pem = pem.into();
    AsyncJwtResult::spawn_blocking(move || keys::import_key_from_pem(&pem, algorithm))
}

/// Awaitable [`keys::export_key_to_jwk`]
pub fn export_key_to_jwk(handle: KeyHandle) -> AsyncJwtResult<Jwk> {
    AsyncJwtResult::spawn_blocking(move || keys::export_key_to_jwk(&handle))
}

/// Awaitable [`keys::import_key_from_jwk`]
pub fn import_key_from_jwk(jwk: Jwk, algorithm: Algorithm) -> AsyncJwtResult<KeyHandle> {
    AsyncJwtResult::spawn_blocking(move || keys::import_key_from_jwk(&jwk, algorithm))
}

/// Awaitable [`claims::apply_defaults`]
pub fn apply_defaults(payload: JwtClaims) -> AsyncJwtResult<JwtClaims> {
    AsyncJwtResult::spawn_blocking(move || Ok(claims::apply_defaults(payload)))
}

/// Awaitable [`claims::is_expired`]
pub fn is_expired(payload: JwtClaims) -> AsyncJwtResult<bool> {
    AsyncJwtResult::spawn_blocking(move || Ok(claims::is_expired(&payload)))
}
