//! JWT claims: builder, registered claim names and time-claim evaluation

pub mod builder;
pub mod evaluator;
pub mod registered;

pub use builder::ClaimsBuilder;
pub use evaluator::{
    DEFAULT_LIFETIME_SECS, ExpiryInfo, apply_defaults, apply_defaults_at,
    apply_defaults_with_lifetime, expiry, expiry_at, is_expired, is_expired_at,
};
pub use registered::{RegisteredClaim, describe_claim};
