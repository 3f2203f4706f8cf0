//! Time-claim defaulting and expiry evaluation
//!
//! Nothing here checks signatures, and verification never consults these functions: a token can
//! be validly signed and expired at the same time.

use crate::types::JwtClaims;
use chrono::{DateTime, Duration, Utc};

/// Lifetime given to claim sets without `exp`, in seconds
pub const DEFAULT_LIFETIME_SECS: u64 = 3600;

fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Fill absent `iat`, `exp` and `nbf` from the wall clock
#[must_use]
pub fn apply_defaults(claims: JwtClaims) -> JwtClaims {
    apply_defaults_at(claims, unix_now())
}

/// Fill absent `iat`, `exp` and `nbf` as of `now` (UNIX seconds)
///
/// `iat` becomes `now`, `exp` becomes `iat + 3600` and `nbf` becomes `iat`. Present values are
/// never overwritten.
#[must_use]
pub fn apply_defaults_at(claims: JwtClaims, now: u64) -> JwtClaims {
    apply_defaults_with_lifetime(claims, now, DEFAULT_LIFETIME_SECS)
}

/// Like [`apply_defaults_at`] with a custom lifetime for `exp`
#[must_use]
pub fn apply_defaults_with_lifetime(mut claims: JwtClaims, now: u64, lifetime_secs: u64) -> JwtClaims {
    let iat = *claims.iat.get_or_insert(now);
    claims.exp.get_or_insert(iat.saturating_add(lifetime_secs));
    claims.nbf.get_or_insert(iat);
    claims
}

/// Whether `exp` has passed on the wall clock
#[must_use]
pub fn is_expired(claims: &JwtClaims) -> bool {
    is_expired_at(claims, Utc::now())
}

/// Whether `exp` has passed at `now`
///
/// Compared in milliseconds: a token is expired from the exact instant `exp * 1000` onward.
/// Claim sets without `exp` never expire.
#[must_use]
pub fn is_expired_at(claims: &JwtClaims, now: DateTime<Utc>) -> bool {
    claims
        .exp
        .is_some_and(|exp| i128::from(now.timestamp_millis()) >= i128::from(exp) * 1000)
}

/// Expiry summary for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryInfo {
    /// Same answer as [`is_expired_at`]
    pub is_expired: bool,
    /// `exp` as a timestamp, when present and representable
    pub expires_at: Option<DateTime<Utc>>,
    /// Time left, only while not yet expired
    pub time_until_expiry: Option<Duration>,
}

/// Summarize `exp` relative to the wall clock
#[must_use]
pub fn expiry(claims: &JwtClaims) -> ExpiryInfo {
    expiry_at(claims, Utc::now())
}

/// Summarize `exp` relative to `now`
#[must_use]
pub fn expiry_at(claims: &JwtClaims, now: DateTime<Utc>) -> ExpiryInfo {
    let Some(exp) = claims.exp else {
        return ExpiryInfo {
            is_expired: false,
            expires_at: None,
            time_until_expiry: None,
        };
    };

    let remaining_ms = i128::from(exp) * 1000 - i128::from(now.timestamp_millis());
    let time_until_expiry = (remaining_ms > 0)
        .then(|| i64::try_from(remaining_ms).ok())
        .flatten()
        .map(Duration::milliseconds);

    ExpiryInfo {
        is_expired: remaining_ms <= 0,
        expires_at: i64::try_from(exp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        time_until_expiry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64, millis: u32) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, millis * 1_000_000).unwrap()
    }

    #[test]
    fn defaults_fill_only_missing_claims() {
        let claims = apply_defaults_at(JwtClaims::new(), 1_000);
        assert_eq!((claims.iat, claims.exp, claims.nbf), (Some(1_000), Some(4_600), Some(1_000)));

        let preset = JwtClaims {
            iat: Some(10),
            exp: Some(20),
            ..JwtClaims::default()
        };
        let claims = apply_defaults_at(preset, 1_000);
        assert_eq!((claims.iat, claims.exp, claims.nbf), (Some(10), Some(20), Some(10)));
    }

    #[test]
    fn exp_is_derived_from_existing_iat() {
        let claims = apply_defaults_at(JwtClaims { iat: Some(500), ..JwtClaims::default() }, 1_000);
        assert_eq!(claims.exp, Some(4_100));
        assert_eq!(claims.nbf, Some(500));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let claims = JwtClaims { exp: Some(100), ..JwtClaims::default() };
        assert!(!is_expired_at(&claims, at(99, 999)));
        assert!(is_expired_at(&claims, at(100, 0)));
        assert!(!is_expired_at(&JwtClaims::new(), at(i64::from(u32::MAX), 0)));
    }

    #[test]
    fn expiry_info_reports_remaining_time() {
        let claims = JwtClaims { exp: Some(100), ..JwtClaims::default() };

        let info = expiry_at(&claims, at(90, 500));
        assert!(!info.is_expired);
        assert_eq!(info.expires_at, Some(at(100, 0)));
        assert_eq!(info.time_until_expiry, Some(Duration::milliseconds(9_500)));

        let info = expiry_at(&claims, at(100, 0));
        assert!(info.is_expired);
        assert_eq!(info.time_until_expiry, None);

        assert_eq!(expiry_at(&JwtClaims::new(), at(0, 0)).expires_at, None);
    }
}
