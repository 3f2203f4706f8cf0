//! JWS compact serialization: `b64u(header) "." b64u(payload) "." b64u(signature)`

use super::algorithms::{base64_url_decode, base64_url_encode};
use super::claims::RegisteredClaim;
use crate::error::{JwtError, JwtResult};
use crate::types::{DecodedToken, JwtClaims, JwtHeader, JwtToken};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The three raw segments of a compact token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segments<'a> {
    pub(crate) header: &'a str,
    pub(crate) payload: &'a str,
    pub(crate) signature: &'a str,
}

impl<'a> Segments<'a> {
    /// Split on `.`; anything other than exactly three segments is malformed
    pub(crate) fn split(token: &'a str) -> JwtResult<Self> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature), None) => Ok(Self {
                header,
                payload,
                signature,
            }),
            _ => Err(JwtError::format("Invalid JWT format")),
        }
    }

    /// The literal `header.payload` prefix
    pub(crate) fn signing_input(&self, token: &'a str) -> &'a str {
        &token[..self.header.len() + 1 + self.payload.len()]
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str, name: &str) -> JwtResult<T> {
    let bytes = base64_url_decode(segment)
        .map_err(|_| JwtError::format(format!("Invalid {name} encoding")))?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|_| JwtError::format(format!("Invalid {name} JSON")))?;
    if !value.is_object() {
        return Err(JwtError::format(format!("Invalid {name}: expected a JSON object")));
    }
    serde_json::from_value(value).map_err(|e| JwtError::format(format!("Invalid {name}: {e}")))
}

/// Decode a token without checking its signature
///
/// The result is untrusted: anyone can produce a token that decodes.
///
/// # Errors
/// Returns `JwtError::Format` when the token does not have three segments, a segment is not
/// base64url, the header or payload is not a JSON object, the header has no `alg`, or a
/// registered claim has the wrong type.
pub fn decode(token: &str) -> JwtResult<DecodedToken> {
    let segments = Segments::split(token)?;
    Ok(DecodedToken {
        header: decode_segment(segments.header, "header")?,
        payload: decode_segment(segments.payload, "payload")?,
        signature: segments.signature.to_string(),
    })
}

/// Header parameters with a dedicated field on `JwtHeader`
const REGISTERED_HEADER_PARAMS: [&str; 11] = [
    "alg", "typ", "kid", "jku", "jwk", "x5u", "x5c", "x5t", "x5t#S256", "cty", "crit",
];

// Flattened maps serialize beside the named fields, so a shared key would be emitted twice.
fn check_side_maps(header: &JwtHeader, claims: &JwtClaims) -> JwtResult<()> {
    if let Some(name) = header
        .extra
        .keys()
        .find(|name| REGISTERED_HEADER_PARAMS.contains(&name.as_str()))
    {
        return Err(JwtError::serialization(format!(
            "header parameter `{name}` must be set through its own field"
        )));
    }
    if let Some(name) = claims
        .custom
        .keys()
        .find(|name| RegisteredClaim::ALL.iter().any(|claim| claim.name() == name.as_str()))
    {
        return Err(JwtError::serialization(format!(
            "claim `{name}` is registered and cannot be set as a custom claim"
        )));
    }
    Ok(())
}

/// `b64u(header) "." b64u(payload)`: the exact bytes that get signed
///
/// # Errors
/// Returns `JwtError::Serialization` when a custom value cannot be serialized, or when a
/// header extra or custom claim reuses a registered name.
pub fn signing_input(header: &JwtHeader, claims: &JwtClaims) -> JwtResult<String> {
    check_side_maps(header, claims)?;
    let header_json = serde_json::to_vec(header)?;
    let payload_json = serde_json::to_vec(claims)?;

    let header_b64 = base64_url_encode(&header_json);
    let payload_b64 = base64_url_encode(&payload_json);

    let mut input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
    input.push_str(&header_b64);
    input.push('.');
    input.push_str(&payload_b64);
    Ok(input)
}

/// Append a signature to a signing input
#[must_use]
pub fn assemble(signing_input: &str, signature: &[u8]) -> JwtToken {
    let signature_b64 = base64_url_encode(signature);
    let mut token = String::with_capacity(signing_input.len() + 1 + signature_b64.len());
    token.push_str(signing_input);
    token.push('.');
    token.push_str(&signature_b64);
    JwtToken(token)
}

/// Serialize header and claims and append `signature`
///
/// # Errors
/// Returns `JwtError::Serialization` under the same conditions as [`signing_input`].
pub fn encode(header: &JwtHeader, claims: &JwtClaims, signature: &[u8]) -> JwtResult<JwtToken> {
    Ok(assemble(&signing_input(header, claims)?, signature))
}
