//! Registered claim names (RFC 7519 §4.1)

use std::fmt;
use std::str::FromStr;

/// A registered claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisteredClaim {
    /// `iss`
    Issuer,
    /// `sub`
    Subject,
    /// `aud`
    Audience,
    /// `exp`
    ExpirationTime,
    /// `nbf`
    NotBefore,
    /// `iat`
    IssuedAt,
    /// `jti`
    JwtId,
}

impl RegisteredClaim {
    /// All registered claims in RFC order
    pub const ALL: [RegisteredClaim; 7] = [
        RegisteredClaim::Issuer,
        RegisteredClaim::Subject,
        RegisteredClaim::Audience,
        RegisteredClaim::ExpirationTime,
        RegisteredClaim::NotBefore,
        RegisteredClaim::IssuedAt,
        RegisteredClaim::JwtId,
    ];

    /// Claim name as it appears in the payload
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            RegisteredClaim::Issuer => "iss",
            RegisteredClaim::Subject => "sub",
            RegisteredClaim::Audience => "aud",
            RegisteredClaim::ExpirationTime => "exp",
            RegisteredClaim::NotBefore => "nbf",
            RegisteredClaim::IssuedAt => "iat",
            RegisteredClaim::JwtId => "jti",
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            RegisteredClaim::Issuer => "Issuer",
            RegisteredClaim::Subject => "Subject",
            RegisteredClaim::Audience => "Audience",
            RegisteredClaim::ExpirationTime => "Expiration Time",
            RegisteredClaim::NotBefore => "Not Before",
            RegisteredClaim::IssuedAt => "Issued At",
            RegisteredClaim::JwtId => "JWT ID",
        }
    }

    /// Whether the claim holds a NumericDate
    #[must_use]
    pub fn is_time(self) -> bool {
        matches!(
            self,
            RegisteredClaim::ExpirationTime | RegisteredClaim::NotBefore | RegisteredClaim::IssuedAt
        )
    }
}

impl FromStr for RegisteredClaim {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegisteredClaim::ALL
            .into_iter()
            .find(|claim| claim.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for RegisteredClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label for any claim name; unregistered names are returned as-is
#[must_use]
pub fn describe_claim(name: &str) -> &str {
    name.parse::<RegisteredClaim>()
        .map_or(name, |claim| claim.description())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for claim in RegisteredClaim::ALL {
            assert_eq!(claim.name().parse::<RegisteredClaim>(), Ok(claim));
        }
        assert!("role".parse::<RegisteredClaim>().is_err());
    }

    #[test]
    fn descriptions() {
        assert_eq!(describe_claim("exp"), "Expiration Time");
        assert_eq!(describe_claim("jti"), "JWT ID");
        assert_eq!(describe_claim("role"), "role");
        assert!(RegisteredClaim::IssuedAt.is_time());
        assert!(!RegisteredClaim::Audience.is_time());
    }
}
