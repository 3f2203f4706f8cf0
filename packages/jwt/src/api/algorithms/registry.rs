//! Algorithm registry
//!
//! One static row per supported algorithm. Everything else in the crate dispatches on the
//! row's family, hash and key parameters, never on algorithm names.

use crate::error::{JwtError, JwtResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature algorithm identifier (`alg` header value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Algorithm {
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,
    /// RSASSA-PSS using SHA-256
    PS256,
    /// RSASSA-PSS using SHA-384
    PS384,
    /// RSASSA-PSS using SHA-512
    PS512,
    /// ECDSA using P-256 and SHA-256
    ES256,
    /// ECDSA using P-384 and SHA-384
    ES384,
    /// ECDSA using P-521 and SHA-512
    ES512,
    /// EdDSA using Ed25519
    EdDSA,
}

/// Underlying signature primitive shared by several algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmFamily {
    /// HMAC
    Hmac,
    /// RSASSA-PKCS1-v1_5
    RsaPkcs1,
    /// RSASSA-PSS
    RsaPss,
    /// ECDSA
    Ecdsa,
    /// Edwards-curve DSA
    EdDsa,
}

impl AlgorithmFamily {
    /// Whether the family signs with an RSA key (PKCS1-v1_5 and PSS share key material)
    #[must_use]
    pub fn is_rsa(self) -> bool {
        matches!(self, AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss)
    }
}

/// Hash used by an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// The signature scheme hashes internally (Ed25519 uses SHA-512)
    Intrinsic,
}

impl HashAlgorithm {
    /// Digest output length in bytes
    #[must_use]
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 | HashAlgorithm::Intrinsic => 64,
        }
    }
}

/// Key shape an algorithm requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    /// Shared secret bytes
    Secret,
    /// Public/private key pair
    KeyPair,
}

/// Named elliptic curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedCurve {
    /// NIST P-256
    #[serde(rename = "P-256")]
    P256,
    /// NIST P-384
    #[serde(rename = "P-384")]
    P384,
    /// NIST P-521
    #[serde(rename = "P-521")]
    P521,
    /// Edwards 25519
    Ed25519,
}

impl NamedCurve {
    /// JOSE curve name (`crv`)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NamedCurve::P256 => "P-256",
            NamedCurve::P384 => "P-384",
            NamedCurve::P521 => "P-521",
            NamedCurve::Ed25519 => "Ed25519",
        }
    }
}

impl FromStr for NamedCurve {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P-256" => Ok(NamedCurve::P256),
            "P-384" => Ok(NamedCurve::P384),
            "P-521" => Ok(NamedCurve::P521),
            "Ed25519" => Ok(NamedCurve::Ed25519),
            other => Err(JwtError::unsupported_algorithm(format!(
                "unsupported curve {other}"
            ))),
        }
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default RSA modulus length in bits
pub const DEFAULT_RSA_MODULUS_BITS: usize = 2048;

/// RSA public exponent used for generated keys
pub const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// Key-generation parameters attached to a registry row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyParams {
    /// Recommended secret length in bytes
    Secret {
        /// Bytes
        recommended_len: usize,
    },
    /// RSA modulus length and public exponent
    Rsa {
        /// Modulus length in bits
        modulus_bits: usize,
        /// Public exponent
        public_exponent: u32,
    },
    /// Curve fixed by the algorithm
    Curve(NamedCurve),
}

/// One row of the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmSpec {
    /// Identifier
    pub algorithm: Algorithm,
    /// `alg` header text
    pub name: &'static str,
    /// Signature family
    pub family: AlgorithmFamily,
    /// Hash function
    pub hash: HashAlgorithm,
    /// Required key kind
    pub key_kind: KeyKind,
    /// Default key-generation parameters
    pub key_params: KeyParams,
}

const fn hmac(algorithm: Algorithm, name: &'static str, hash: HashAlgorithm, len: usize) -> AlgorithmSpec {
    AlgorithmSpec {
        algorithm,
        name,
        family: AlgorithmFamily::Hmac,
        hash,
        key_kind: KeyKind::Secret,
        key_params: KeyParams::Secret { recommended_len: len },
    }
}

const fn rsa(
    algorithm: Algorithm,
    name: &'static str,
    family: AlgorithmFamily,
    hash: HashAlgorithm,
) -> AlgorithmSpec {
    AlgorithmSpec {
        algorithm,
        name,
        family,
        hash,
        key_kind: KeyKind::KeyPair,
        key_params: KeyParams::Rsa {
            modulus_bits: DEFAULT_RSA_MODULUS_BITS,
            public_exponent: RSA_PUBLIC_EXPONENT,
        },
    }
}

const fn curve(
    algorithm: Algorithm,
    name: &'static str,
    family: AlgorithmFamily,
    hash: HashAlgorithm,
    curve: NamedCurve,
) -> AlgorithmSpec {
    AlgorithmSpec {
        algorithm,
        name,
        family,
        hash,
        key_kind: KeyKind::KeyPair,
        key_params: KeyParams::Curve(curve),
    }
}

/// The registry table
pub static REGISTRY: [AlgorithmSpec; 13] = [
    hmac(Algorithm::HS256, "HS256", HashAlgorithm::Sha256, 32),
    hmac(Algorithm::HS384, "HS384", HashAlgorithm::Sha384, 48),
    hmac(Algorithm::HS512, "HS512", HashAlgorithm::Sha512, 64),
    rsa(Algorithm::RS256, "RS256", AlgorithmFamily::RsaPkcs1, HashAlgorithm::Sha256),
    rsa(Algorithm::RS384, "RS384", AlgorithmFamily::RsaPkcs1, HashAlgorithm::Sha384),
    rsa(Algorithm::RS512, "RS512", AlgorithmFamily::RsaPkcs1, HashAlgorithm::Sha512),
    rsa(Algorithm::PS256, "PS256", AlgorithmFamily::RsaPss, HashAlgorithm::Sha256),
    rsa(Algorithm::PS384, "PS384", AlgorithmFamily::RsaPss, HashAlgorithm::Sha384),
    rsa(Algorithm::PS512, "PS512", AlgorithmFamily::RsaPss, HashAlgorithm::Sha512),
    curve(Algorithm::ES256, "ES256", AlgorithmFamily::Ecdsa, HashAlgorithm::Sha256, NamedCurve::P256),
    curve(Algorithm::ES384, "ES384", AlgorithmFamily::Ecdsa, HashAlgorithm::Sha384, NamedCurve::P384),
    curve(Algorithm::ES512, "ES512", AlgorithmFamily::Ecdsa, HashAlgorithm::Sha512, NamedCurve::P521),
    curve(Algorithm::EdDSA, "EdDSA", AlgorithmFamily::EdDsa, HashAlgorithm::Intrinsic, NamedCurve::Ed25519),
];

/// Find the registry row for an `alg` header value
#[must_use]
pub fn lookup(name: &str) -> Option<&'static AlgorithmSpec> {
    REGISTRY.iter().find(|spec| spec.name == name)
}

impl Algorithm {
    /// Every registered algorithm, in table order
    pub fn all() -> impl Iterator<Item = Algorithm> {
        REGISTRY.iter().map(|spec| spec.algorithm)
    }

    /// Registry row for this algorithm
    #[must_use]
    pub fn spec(self) -> &'static AlgorithmSpec {
        // Rows are declared in enum order.
        &REGISTRY[self as usize]
    }

    /// `alg` header text
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    /// Signature family
    #[must_use]
    pub fn family(self) -> AlgorithmFamily {
        self.spec().family
    }

    /// Hash function
    #[must_use]
    pub fn hash(self) -> HashAlgorithm {
        self.spec().hash
    }

    /// Required key kind
    #[must_use]
    pub fn key_kind(self) -> KeyKind {
        self.spec().key_kind
    }

    /// Whether the algorithm uses a shared secret
    #[must_use]
    pub fn is_symmetric(self) -> bool {
        self.key_kind() == KeyKind::Secret
    }

    /// Curve the algorithm is bound to, for ECDSA and EdDSA
    #[must_use]
    pub fn curve(self) -> Option<NamedCurve> {
        match self.spec().key_params {
            KeyParams::Curve(curve) => Some(curve),
            _ => None,
        }
    }

    /// Recommended key size in bytes: secret length, RSA modulus, or curve field size
    #[must_use]
    pub fn recommended_key_size(self) -> usize {
        match self.spec().key_params {
            KeyParams::Secret { recommended_len } => recommended_len,
            KeyParams::Rsa { modulus_bits, .. } => modulus_bits / 8,
            KeyParams::Curve(NamedCurve::P256 | NamedCurve::Ed25519) => 32,
            KeyParams::Curve(NamedCurve::P384) => 48,
            KeyParams::Curve(NamedCurve::P521) => 66,
        }
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s)
            .map(|spec| spec.algorithm)
            .ok_or_else(|| JwtError::unsupported_algorithm(s))
    }
}

impl TryFrom<&str> for Algorithm {
    type Error = JwtError;

    fn try_from(s: &str) -> JwtResult<Self> {
        s.parse()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_in_enum_order() {
        for (index, spec) in REGISTRY.iter().enumerate() {
            assert_eq!(spec.algorithm as usize, index);
            assert_eq!(spec.algorithm.as_str(), spec.name);
        }
    }

    #[test]
    fn names_round_trip_through_lookup() {
        for alg in Algorithm::all() {
            assert_eq!(alg.as_str().parse::<Algorithm>(), Ok(alg));
        }
        assert!("none".parse::<Algorithm>().is_err());
        assert!("hs256".parse::<Algorithm>().is_err());
    }

    #[test]
    fn hash_follows_numeric_suffix() {
        for alg in Algorithm::all() {
            let expected = if alg.as_str().ends_with("256") {
                HashAlgorithm::Sha256
            } else if alg.as_str().ends_with("384") {
                HashAlgorithm::Sha384
            } else if alg.as_str().ends_with("512") {
                HashAlgorithm::Sha512
            } else {
                HashAlgorithm::Intrinsic
            };
            assert_eq!(alg.hash(), expected, "{alg}");
        }
    }

    #[test]
    fn generation_defaults() {
        assert_eq!(
            Algorithm::PS384.spec().key_params,
            KeyParams::Rsa { modulus_bits: 2048, public_exponent: 65537 }
        );
        assert_eq!(Algorithm::ES256.curve(), Some(NamedCurve::P256));
        assert_eq!(Algorithm::ES384.curve(), Some(NamedCurve::P384));
        assert_eq!(Algorithm::ES512.curve(), Some(NamedCurve::P521));
        assert_eq!(Algorithm::EdDSA.curve(), Some(NamedCurve::Ed25519));
        assert_eq!(Algorithm::HS512.recommended_key_size(), 64);
        assert!(Algorithm::HS384.is_symmetric());
        assert!(!Algorithm::RS256.is_symmetric());
    }
}
