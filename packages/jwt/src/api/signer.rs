//! Token signing and signature verification

use super::algorithms::{Algorithm, base64_url_decode, sign_bytes, verify_bytes};
use super::compact::{Segments, assemble, decode, signing_input};
use super::keys::KeyMaterial;
use crate::error::JwtResult;
use crate::types::{JwtClaims, JwtHeader, JwtToken, ValidationResult};

/// Sign `claims` under `header`
///
/// The algorithm is taken from `header.alg`.
///
/// # Errors
/// `JwtError::UnsupportedAlgorithm` when `header.alg` is not registered, `JwtError::KeyMismatch`
/// when the key does not fit the algorithm, `JwtError::Serialization` or `JwtError::Signing`
/// when encoding or the primitive fails.
pub fn sign(header: &JwtHeader, claims: &JwtClaims, key: &KeyMaterial) -> JwtResult<JwtToken> {
    let algorithm = header.algorithm()?;
    let input = signing_input(header, claims)?;
    let signature = sign_bytes(algorithm, input.as_bytes(), key)?;
    Ok(assemble(&input, &signature))
}

/// Sign with `algorithm`, overriding whatever `header.alg` says
///
/// # Errors
/// Same as [`sign`].
pub fn sign_with(
    algorithm: Algorithm,
    header: &JwtHeader,
    claims: &JwtClaims,
    key: &KeyMaterial,
) -> JwtResult<JwtToken> {
    let mut header = header.clone();
    header.alg = algorithm.as_str().to_string();
    sign(&header, claims, key)
}

/// Verify a token's signature
///
/// With `expected` set, the token must declare exactly that algorithm. Without it the token's
/// own `alg` is trusted, which lets whoever crafted the token choose how it is checked; pass
/// `expected` whenever the algorithm is known.
///
/// Signature problems are reported in the returned [`ValidationResult`], never as errors.
/// Time claims are not evaluated.
///
/// # Errors
/// Returns `JwtError::Format` only when the token cannot be decoded structurally.
pub fn verify(
    token: &str,
    key: &KeyMaterial,
    expected: Option<Algorithm>,
) -> JwtResult<ValidationResult> {
    let decoded = decode(token)?;
    let segments = Segments::split(token)?;

    let algorithm = match expected {
        Some(expected) if decoded.header.alg != expected.as_str() => {
            let error = format!(
                "Algorithm mismatch: token declares {}, expected {expected}",
                decoded.header.alg
            );
            return Ok(ValidationResult::invalid(decoded, error));
        }
        Some(expected) => expected,
        None => {
            tracing::warn!(
                alg = %decoded.header.alg,
                "verifying without an expected algorithm; trusting the token header"
            );
            match decoded.header.algorithm() {
                Ok(algorithm) => algorithm,
                Err(e) => return Ok(ValidationResult::invalid(decoded, e.to_string())),
            }
        }
    };

    if segments.signature.is_empty() {
        return Ok(ValidationResult::invalid(decoded, "Token is not signed"));
    }
    let Ok(signature) = base64_url_decode(segments.signature) else {
        return Ok(ValidationResult::invalid(decoded, "Invalid signature encoding"));
    };

    let input = segments.signing_input(token);
    let result = match verify_bytes(algorithm, input.as_bytes(), &signature, key) {
        Ok(true) => ValidationResult::valid(decoded),
        Ok(false) => ValidationResult::invalid(decoded, "Invalid signature"),
        Err(e) => ValidationResult::invalid(decoded, e.to_string()),
    };
    tracing::debug!(%algorithm, is_valid = result.is_valid, "verified token");
    Ok(result)
}
