//! JWT type definitions: header, claim set, token and validation outcome

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::algorithms::Algorithm;

/// Default value of the `typ` header parameter
pub const DEFAULT_TYP: &str = "JWT";

fn default_typ() -> String {
    DEFAULT_TYP.to_string()
}

/// JWT header (JOSE header)
///
/// `alg` holds the literal text found in the token so that headers naming an
/// algorithm outside the registry can still be decoded and shown. It is resolved
/// against the registry when signing or verifying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtHeader {
    /// Signing algorithm
    pub alg: String,
    /// Token type
    #[serde(default = "default_typ")]
    pub typ: String,
    /// Key ID hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// JWK Set URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jku: Option<String>,
    /// Embedded JSON Web Key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwk: Option<Value>,
    /// X.509 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x5u: Option<String>,
    /// X.509 certificate chain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x5c: Option<Vec<String>>,
    /// X.509 certificate SHA-1 thumbprint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x5t: Option<String>,
    /// X.509 certificate SHA-256 thumbprint
    #[serde(rename = "x5t#S256", skip_serializing_if = "Option::is_none")]
    pub x5t_s256: Option<String>,
    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cty: Option<String>,
    /// Critical extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crit: Option<Vec<String>>,
    /// Unregistered header parameters, re-emitted unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JwtHeader {
    /// Header for `alg` with `typ: "JWT"` and nothing else
    #[must_use]
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg: alg.as_str().to_string(),
            typ: default_typ(),
            kid: None,
            jku: None,
            jwk: None,
            x5u: None,
            x5c: None,
            x5t: None,
            x5t_s256: None,
            cty: None,
            crit: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the key ID
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// Set the content type
    #[must_use]
    pub fn with_content_type(mut self, cty: impl Into<String>) -> Self {
        self.cty = Some(cty.into());
        self
    }

    /// Add an unregistered header parameter
    ///
    /// Registered names such as `alg` are refused when the header is serialized.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Resolve `alg` against the algorithm registry
    ///
    /// # Errors
    /// Returns `JwtError::UnsupportedAlgorithm` when `alg` is not a registered algorithm.
    pub fn algorithm(&self) -> crate::JwtResult<Algorithm> {
        self.alg.parse()
    }
}

/// `aud` claim: a single audience or an ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// One audience string
    Single(String),
    /// Several audiences, order preserved
    Multiple(Vec<String>),
}

impl Audience {
    /// Whether `audience` is named by this claim
    #[must_use]
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Multiple(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

impl From<&str> for Audience {
    fn from(aud: &str) -> Self {
        Audience::Single(aud.to_string())
    }
}

impl From<String> for Audience {
    fn from(aud: String) -> Self {
        Audience::Single(aud)
    }
}

impl From<Vec<String>> for Audience {
    fn from(auds: Vec<String>) -> Self {
        Audience::Multiple(auds)
    }
}

/// JWT claim set
///
/// Time claims are whole UNIX seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Expiration time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    /// Not before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<u64>,
    /// Issued at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    /// JWT ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Custom claims (flattened into root)
    #[serde(flatten)]
    pub custom: BTreeMap<String, Value>,
}

impl JwtClaims {
    /// Empty claim set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a custom claim
    #[must_use]
    pub fn custom_claim(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }
}

/// Compact token string wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JwtToken(pub String);

impl JwtToken {
    /// Borrow the compact serialization
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `header.payload` prefix that was signed
    #[must_use]
    pub fn signing_input(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(input, _)| input)
    }
}

impl From<String> for JwtToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<JwtToken> for String {
    fn from(token: JwtToken) -> Self {
        token.0
    }
}

impl AsRef<str> for JwtToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JwtToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Untrusted structural view of a token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedToken {
    /// Decoded header
    pub header: JwtHeader,
    /// Decoded claim set
    pub payload: JwtClaims,
    /// Signature segment, still base64url text
    pub signature: String,
}

/// Outcome of signature verification
///
/// Header and payload are present whenever the token decoded structurally, including
/// when the signature did not verify, so callers can show why a token was rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the signature verified with the given key and algorithm
    pub is_valid: bool,
    /// Decoded (unauthenticated when invalid) header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<JwtHeader>,
    /// Decoded (unauthenticated when invalid) claim set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<JwtClaims>,
    /// Raw signature segment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Reason verification failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub(crate) fn valid(decoded: DecodedToken) -> Self {
        Self {
            is_valid: true,
            header: Some(decoded.header),
            payload: Some(decoded.payload),
            signature: Some(decoded.signature),
            error: None,
        }
    }

    pub(crate) fn invalid(decoded: DecodedToken, error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            header: Some(decoded.header),
            payload: Some(decoded.payload),
            signature: Some(decoded.signature),
            error: Some(error.into()),
        }
    }
}
