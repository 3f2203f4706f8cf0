//! Key manager: generation, PEM and JWK import/export
//!
//! Asymmetric keys are opaque [`KeyHandle`]s. Callers create them here and pass them back into
//! signing, verification and export; the key bytes are never exposed directly.

pub mod generation;
pub mod jwk;
pub mod material;
pub mod pem;

pub use generation::{
    DEFAULT_SECRET_LEN, KeyGenerationOptions, SUPPORTED_RSA_MODULUS_BITS, generate_key_pair,
    generate_secret,
};
pub use jwk::{Jwk, export_key_to_jwk, export_secret_to_jwk, import_key_from_jwk, import_secret_from_jwk};
pub(crate) use material::KeyInner;
pub use material::{
    AsymmetricKeyPair, KeyHandle, KeyMaterial, KeyParameters, KeyPart, KeyUsage, SecretKey,
};
pub use pem::{export_key_to_pem, import_key_from_pem};
