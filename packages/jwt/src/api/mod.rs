//! JWT API
//!
//! Synchronous operations live in `compact`, `signer`, `keys` and `claims`; `operations` and
//! the builder expose the same operations as awaitable futures.

pub mod algorithms;
pub mod builders;
pub mod claims;
pub mod compact;
pub mod keys;
pub mod operations;
pub mod signer;
pub mod validation;

pub use builders::{Jwt, JwtBuilder};
pub use validation::{AsyncJwtResult, AsyncJwtResultWithError};
