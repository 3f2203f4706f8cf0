//! Claims builder for ergonomic payload construction

use crate::types::{Audience, JwtClaims};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

fn unix_secs(at: DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp()).unwrap_or(0)
}

/// Builder for [`JwtClaims`]
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: JwtClaims,
}

impl ClaimsBuilder {
    /// Empty claim set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject claim
    #[inline]
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.claims.sub = Some(subject.into());
        self
    }

    /// Set issuer claim
    #[inline]
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.claims.iss = Some(issuer.into());
        self
    }

    /// Set a single audience
    #[inline]
    #[must_use]
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.claims.aud = Some(Audience::Single(audience.into()));
        self
    }

    /// Set several audiences
    #[inline]
    #[must_use]
    pub fn audiences<I, S>(mut self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.claims.aud = Some(Audience::Multiple(
            audiences.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set expiration time (UNIX seconds)
    #[inline]
    #[must_use]
    pub fn expiration(mut self, exp: u64) -> Self {
        self.claims.exp = Some(exp);
        self
    }

    /// Set expiration time using duration from now
    #[inline]
    #[must_use]
    pub fn expires_in(mut self, duration: Duration) -> Self {
        self.claims.exp = Some(unix_secs(Utc::now() + duration));
        self
    }

    /// Set not before time (UNIX seconds)
    #[inline]
    #[must_use]
    pub fn not_before(mut self, nbf: u64) -> Self {
        self.claims.nbf = Some(nbf);
        self
    }

    /// Set not before time from a timestamp
    #[inline]
    #[must_use]
    pub fn not_before_time(mut self, nbf: DateTime<Utc>) -> Self {
        self.claims.nbf = Some(unix_secs(nbf));
        self
    }

    /// Set issued at time (UNIX seconds)
    #[inline]
    #[must_use]
    pub fn issued_at(mut self, iat: u64) -> Self {
        self.claims.iat = Some(iat);
        self
    }

    /// Set issued at time to now
    #[inline]
    #[must_use]
    pub fn issued_now(mut self) -> Self {
        self.claims.iat = Some(unix_secs(Utc::now()));
        self
    }

    /// Set JWT ID
    #[inline]
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.claims.jti = Some(jti.into());
        self
    }

    /// Set custom claim with any JSON value; registered names fail at signing time
    #[inline]
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.custom.insert(name.into(), value.into());
        self
    }

    /// Finish the claim set
    #[inline]
    #[must_use]
    pub fn build(self) -> JwtClaims {
        self.claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registered_and_custom_claims_serialize_flat() {
        let claims = ClaimsBuilder::new()
            .subject("1234567890")
            .issuer("https://issuer.example.com")
            .audiences(["api", "web"])
            .issued_at(1_516_239_022)
            .claim("name", "John Doe")
            .claim("admin", true)
            .build();

        assert_eq!(
            serde_json::to_value(&claims).unwrap(),
            json!({
                "iss": "https://issuer.example.com",
                "sub": "1234567890",
                "aud": ["api", "web"],
                "iat": 1_516_239_022,
                "admin": true,
                "name": "John Doe"
            })
        );
    }

    #[test]
    fn expires_in_is_relative_to_now() {
        let before = unix_secs(Utc::now());
        let claims = ClaimsBuilder::new().expires_in(Duration::minutes(5)).build();
        let exp = claims.exp.unwrap();
        assert!(exp >= before + 300 && exp <= before + 301);
    }
}
