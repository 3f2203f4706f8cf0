//! Host-supplied defaults for the builder API
//!
//! Deserializable so hosts can embed it in their own configuration files; every field has a
//! default, so a partial table is enough.

use crate::api::algorithms::{Algorithm, DEFAULT_RSA_MODULUS_BITS};
use crate::api::claims::{DEFAULT_LIFETIME_SECS, apply_defaults_with_lifetime};
use crate::api::keys::{DEFAULT_SECRET_LEN, KeyGenerationOptions};
use crate::types::{DEFAULT_TYP, JwtClaims, JwtHeader};
use serde::{Deserialize, Serialize};

/// Defaults applied by [`JwtBuilder`](crate::JwtBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JwtConfig {
    /// `typ` header value
    pub typ: String,
    /// Lifetime given to tokens without `exp`, in seconds
    pub default_lifetime_secs: u64,
    /// Fill `iat`, `exp` and `nbf` before signing
    pub apply_time_defaults: bool,
    /// Length of generated HMAC secrets, in bytes
    pub secret_len: usize,
    /// Modulus length for generated RSA keys, in bits
    pub rsa_modulus_bits: usize,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            typ: DEFAULT_TYP.to_string(),
            default_lifetime_secs: DEFAULT_LIFETIME_SECS,
            apply_time_defaults: true,
            secret_len: DEFAULT_SECRET_LEN,
            rsa_modulus_bits: DEFAULT_RSA_MODULUS_BITS,
        }
    }
}

impl JwtConfig {
    /// Defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `typ` header value
    #[must_use]
    pub fn with_typ(mut self, typ: impl Into<String>) -> Self {
        self.typ = typ.into();
        self
    }

    /// Set the default token lifetime
    #[must_use]
    pub fn with_default_lifetime(mut self, secs: u64) -> Self {
        self.default_lifetime_secs = secs;
        self
    }

    /// Enable or disable time-claim defaulting before signing
    #[must_use]
    pub fn with_time_defaults(mut self, enabled: bool) -> Self {
        self.apply_time_defaults = enabled;
        self
    }

    /// Set the generated secret length
    #[must_use]
    pub fn with_secret_len(mut self, len: usize) -> Self {
        self.secret_len = len;
        self
    }

    /// Set the generated RSA modulus length
    #[must_use]
    pub fn with_rsa_modulus_bits(mut self, bits: usize) -> Self {
        self.rsa_modulus_bits = bits;
        self
    }

    /// Header for `algorithm` carrying the configured `typ`
    #[must_use]
    pub fn header(&self, algorithm: Algorithm) -> JwtHeader {
        JwtHeader {
            typ: self.typ.clone(),
            ..JwtHeader::new(algorithm)
        }
    }

    /// Apply time defaults as of `now` (UNIX seconds) when enabled
    #[must_use]
    pub fn prepare_claims(&self, claims: JwtClaims, now: u64) -> JwtClaims {
        if self.apply_time_defaults {
            apply_defaults_with_lifetime(claims, now, self.default_lifetime_secs)
        } else {
            claims
        }
    }

    /// Generation options for `algorithm`; only RSA algorithms take the modulus length
    #[must_use]
    pub fn key_generation_options(&self, algorithm: Algorithm) -> KeyGenerationOptions {
        let options = KeyGenerationOptions::new();
        if algorithm.family().is_rsa() {
            options.with_key_size(self.rsa_modulus_bits)
        } else {
            options
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: JwtConfig =
            serde_json::from_str(r#"{"defaultLifetimeSecs": 60, "typ": "at+jwt"}"#).unwrap();
        assert_eq!(config.default_lifetime_secs, 60);
        assert_eq!(config.typ, "at+jwt");
        assert_eq!(config.secret_len, 32);
        assert_eq!(config.rsa_modulus_bits, 2048);
        assert!(config.apply_time_defaults);
    }

    #[test]
    fn prepare_claims_uses_configured_lifetime() {
        let config = JwtConfig::new().with_default_lifetime(60);
        let claims = config.prepare_claims(JwtClaims::new(), 1_000);
        assert_eq!(claims.exp, Some(1_060));

        let untouched = config.with_time_defaults(false).prepare_claims(JwtClaims::new(), 1_000);
        assert_eq!(untouched, JwtClaims::new());
    }

    #[test]
    fn modulus_only_applies_to_rsa() {
        let config = JwtConfig::new().with_rsa_modulus_bits(3072);
        assert_eq!(config.key_generation_options(Algorithm::PS256).key_size, Some(3072));
        assert_eq!(config.key_generation_options(Algorithm::ES256).key_size, None);
    }
}
