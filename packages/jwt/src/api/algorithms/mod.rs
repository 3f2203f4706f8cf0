//! JWT algorithms: registry, base64url codec and the per-family signature primitives

mod core;
mod ecdsa;
mod eddsa;
mod hmac;
pub mod registry;
mod rsa;
pub mod utils;

pub(crate) use core::{sign_bytes, verify_bytes};
pub use registry::{
    Algorithm, AlgorithmFamily, AlgorithmSpec, DEFAULT_RSA_MODULUS_BITS, HashAlgorithm, KeyKind,
    KeyParams, NamedCurve, REGISTRY, RSA_PUBLIC_EXPONENT, lookup,
};
pub use utils::{base64_url_decode, base64_url_encode};
