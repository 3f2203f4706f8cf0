//! JSON Web Key import/export (RFC 7517, RFC 7518 §6, RFC 8037)

use super::material::{KeyHandle, KeyInner, KeyPart, SecretKey};
use crate::api::algorithms::{Algorithm, AlgorithmFamily, NamedCurve};
use crate::api::algorithms::utils::{base64_url_decode, base64_url_encode};
use crate::error::{JwtError, JwtResult};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

/// JSON Web Key
///
/// Only the members used for signature keys are modelled; anything else is dropped on import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type: `RSA`, `EC`, `OKP` or `oct`
    pub kty: String,
    /// Curve for `EC` and `OKP`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// EC x coordinate or OKP public key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// EC y coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Private exponent (RSA) or private scalar (EC, OKP)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// RSA modulus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA public exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    /// RSA first prime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    /// RSA second prime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// RSA first CRT exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    /// RSA second CRT exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    /// RSA CRT coefficient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    /// Symmetric key value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    /// Intended algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Public key use
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
    /// Permitted operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
    /// Key ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl Jwk {
    /// Whether the key carries private members
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.d.is_some() || self.k.is_some()
    }

    /// Copy with every private member removed
    #[must_use]
    pub fn to_public(&self) -> Jwk {
        Jwk {
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            k: None,
            key_ops: self.key_ops.as_ref().map(|_| vec!["verify".to_string()]),
            ..self.clone()
        }
    }

    /// Set the key ID
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    fn signature_key(kty: &str, algorithm: Algorithm, part: KeyPart) -> Self {
        let op = match part {
            KeyPart::Private => "sign",
            KeyPart::Public => "verify",
        };
        Jwk {
            kty: kty.to_string(),
            alg: Some(algorithm.as_str().to_string()),
            use_: Some("sig".to_string()),
            key_ops: Some(vec![op.to_string()]),
            ..Jwk::default()
        }
    }
}

fn field_len(curve: NamedCurve) -> usize {
    match curve {
        NamedCurve::P256 | NamedCurve::Ed25519 => 32,
        NamedCurve::P384 => 48,
        NamedCurve::P521 => 66,
    }
}

fn b64(bytes: &[u8]) -> Option<String> {
    Some(base64_url_encode(bytes))
}

fn biguint(value: &BigUint) -> Option<String> {
    b64(&value.to_bytes_be())
}

/// Export a key handle as a JWK
///
/// Private handles export every private member; public handles export only the public ones.
///
/// # Errors
/// Returns `JwtError::KeyExport` when the RSA key lacks the values needed for CRT members.
pub fn export_key_to_jwk(handle: &KeyHandle) -> JwtResult<Jwk> {
    let algorithm = handle.algorithm();
    let part = handle.part();

    let jwk = match &handle.inner {
        KeyInner::RsaPublic(key) => rsa_public_jwk(key, algorithm, part),
        KeyInner::RsaPrivate(key) => rsa_private_jwk(key, algorithm)?,
        KeyInner::P256Public(key) => {
            ec_jwk(NamedCurve::P256, key.to_encoded_point(false).as_bytes(), None, algorithm)
        }
        KeyInner::P256Private(key) => ec_jwk(
            NamedCurve::P256,
            key.public_key().to_encoded_point(false).as_bytes(),
            Some(&key.to_bytes()[..]),
            algorithm,
        ),
        KeyInner::P384Public(key) => {
            ec_jwk(NamedCurve::P384, key.to_encoded_point(false).as_bytes(), None, algorithm)
        }
        KeyInner::P384Private(key) => ec_jwk(
            NamedCurve::P384,
            key.public_key().to_encoded_point(false).as_bytes(),
            Some(&key.to_bytes()[..]),
            algorithm,
        ),
        KeyInner::P521Public(key) => {
            ec_jwk(NamedCurve::P521, key.to_encoded_point(false).as_bytes(), None, algorithm)
        }
        KeyInner::P521Private(key) => ec_jwk(
            NamedCurve::P521,
            key.public_key().to_encoded_point(false).as_bytes(),
            Some(&key.to_bytes()[..]),
            algorithm,
        ),
        KeyInner::Ed25519Public(key) => Jwk {
            crv: Some(NamedCurve::Ed25519.to_string()),
            x: b64(key.as_bytes()),
            ..Jwk::signature_key("OKP", algorithm, part)
        },
        KeyInner::Ed25519Private(key) => Jwk {
            crv: Some(NamedCurve::Ed25519.to_string()),
            x: b64(key.verifying_key().as_bytes()),
            d: b64(key.as_bytes()),
            ..Jwk::signature_key("OKP", algorithm, part)
        },
    };
    Ok(jwk)
}

fn rsa_public_jwk(key: &RsaPublicKey, algorithm: Algorithm, part: KeyPart) -> Jwk {
    Jwk {
        n: biguint(key.n()),
        e: biguint(key.e()),
        ..Jwk::signature_key("RSA", algorithm, part)
    }
}

fn rsa_private_jwk(key: &RsaPrivateKey, algorithm: Algorithm) -> JwtResult<Jwk> {
    let [p, q] = key.primes() else {
        return Err(JwtError::key_export(
            "only two-prime RSA keys can be exported as JWK",
        ));
    };
    let one = BigUint::from(1u8);
    let dp = key.d() % (p - &one);
    let dq = key.d() % (q - &one);
    let qi = key
        .crt_coefficient()
        .ok_or_else(|| JwtError::key_export("RSA key has no CRT coefficient"))?;

    Ok(Jwk {
        d: biguint(key.d()),
        p: biguint(p),
        q: biguint(q),
        dp: biguint(&dp),
        dq: biguint(&dq),
        qi: biguint(&qi),
        ..rsa_public_jwk(&key.to_public_key(), algorithm, KeyPart::Private)
    })
}

fn ec_jwk(curve: NamedCurve, sec1: &[u8], d: Option<&[u8]>, algorithm: Algorithm) -> Jwk {
    // Uncompressed SEC1: 0x04 || x || y, each coordinate padded to the field size.
    let len = field_len(curve);
    let part = if d.is_some() { KeyPart::Private } else { KeyPart::Public };
    Jwk {
        crv: Some(curve.to_string()),
        x: b64(&sec1[1..1 + len]),
        y: b64(&sec1[1 + len..]),
        d: d.and_then(b64),
        ..Jwk::signature_key("EC", algorithm, part)
    }
}

fn member(jwk: &Jwk, value: Option<&String>, name: &str) -> JwtResult<Vec<u8>> {
    let value = value
        .ok_or_else(|| JwtError::key_import(format!("{} JWK is missing `{name}`", jwk.kty)))?;
    base64_url_decode(value)
        .map_err(|_| JwtError::key_import(format!("JWK member `{name}` is not base64url")))
}

fn expect_kty(jwk: &Jwk, kty: &str, algorithm: Algorithm) -> JwtResult<()> {
    if jwk.kty == kty {
        Ok(())
    } else {
        Err(JwtError::key_import(format!(
            "{algorithm} needs a {kty} JWK, got kty {}",
            jwk.kty
        )))
    }
}

fn expect_crv(jwk: &Jwk, curve: NamedCurve) -> JwtResult<()> {
    match jwk.crv.as_deref() {
        Some(crv) if crv == curve.as_str() => Ok(()),
        other => Err(JwtError::key_import(format!(
            "expected crv {curve}, got {}",
            other.unwrap_or("none")
        ))),
    }
}

/// Import a JWK for `algorithm`
///
/// A JWK with a `d` member yields a private handle; otherwise a public one.
///
/// # Errors
/// Returns `JwtError::UnsupportedAlgorithm` for `HS*` (see [`import_secret_from_jwk`]) and
/// `JwtError::KeyImport` when `kty`, `crv` or the key members do not describe a valid key.
pub fn import_key_from_jwk(jwk: &Jwk, algorithm: Algorithm) -> JwtResult<KeyHandle> {
    let inner = match algorithm.family() {
        AlgorithmFamily::Hmac => {
            return Err(JwtError::unsupported_algorithm(format!(
                "{algorithm} uses a shared secret; import it with import_secret_from_jwk"
            )));
        }
        AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss => {
            expect_kty(jwk, "RSA", algorithm)?;
            rsa_from_jwk(jwk)?
        }
        AlgorithmFamily::Ecdsa => {
            expect_kty(jwk, "EC", algorithm)?;
            let curve = algorithm
                .curve()
                .ok_or_else(|| JwtError::unsupported_algorithm(algorithm.as_str()))?;
            expect_crv(jwk, curve)?;
            ec_from_jwk(jwk, curve)?
        }
        AlgorithmFamily::EdDsa => {
            expect_kty(jwk, "OKP", algorithm)?;
            expect_crv(jwk, NamedCurve::Ed25519)?;
            ed25519_from_jwk(jwk)?
        }
    };
    Ok(KeyHandle::new(inner, algorithm))
}

fn rsa_from_jwk(jwk: &Jwk) -> JwtResult<KeyInner> {
    let n = BigUint::from_bytes_be(&member(jwk, jwk.n.as_ref(), "n")?);
    let e = BigUint::from_bytes_be(&member(jwk, jwk.e.as_ref(), "e")?);

    if jwk.d.is_none() {
        return RsaPublicKey::new(n, e)
            .map(KeyInner::RsaPublic)
            .map_err(|err| JwtError::key_import(format!("invalid RSA public key: {err}")));
    }

    let d = BigUint::from_bytes_be(&member(jwk, jwk.d.as_ref(), "d")?);
    let p = BigUint::from_bytes_be(&member(jwk, jwk.p.as_ref(), "p")?);
    let q = BigUint::from_bytes_be(&member(jwk, jwk.q.as_ref(), "q")?);
    let key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
        .map_err(|err| JwtError::key_import(format!("invalid RSA private key: {err}")))?;
    key.validate()
        .map_err(|err| JwtError::key_import(format!("invalid RSA private key: {err}")))?;
    Ok(KeyInner::RsaPrivate(key))
}

fn sec1_point(jwk: &Jwk, curve: NamedCurve) -> JwtResult<Vec<u8>> {
    let len = field_len(curve);
    let x = member(jwk, jwk.x.as_ref(), "x")?;
    let y = member(jwk, jwk.y.as_ref(), "y")?;
    if x.len() > len || y.len() > len {
        return Err(JwtError::key_import(format!(
            "{curve} coordinates must be at most {len} bytes"
        )));
    }

    let mut point = Vec::with_capacity(1 + 2 * len);
    point.push(0x04);
    for coordinate in [x, y] {
        point.resize(point.len() + len - coordinate.len(), 0);
        point.extend_from_slice(&coordinate);
    }
    Ok(point)
}

fn ec_from_jwk(jwk: &Jwk, curve: NamedCurve) -> JwtResult<KeyInner> {
    let point = sec1_point(jwk, curve)?;
    let invalid_point = |_| JwtError::key_import(format!("x/y is not a point on {curve}"));
    let invalid_scalar = |_| JwtError::key_import(format!("d is not a valid {curve} scalar"));
    let d = match jwk.d {
        Some(_) => Some(member(jwk, jwk.d.as_ref(), "d")?),
        None => None,
    };

    let inner = match (curve, d) {
        (NamedCurve::P256, None) => {
            KeyInner::P256Public(p256::PublicKey::from_sec1_bytes(&point).map_err(invalid_point)?)
        }
        (NamedCurve::P256, Some(d)) => {
            KeyInner::P256Private(p256::SecretKey::from_slice(&d).map_err(invalid_scalar)?)
        }
        (NamedCurve::P384, None) => {
            KeyInner::P384Public(p384::PublicKey::from_sec1_bytes(&point).map_err(invalid_point)?)
        }
        (NamedCurve::P384, Some(d)) => {
            KeyInner::P384Private(p384::SecretKey::from_slice(&d).map_err(invalid_scalar)?)
        }
        (NamedCurve::P521, None) => {
            KeyInner::P521Public(p521::PublicKey::from_sec1_bytes(&point).map_err(invalid_point)?)
        }
        (NamedCurve::P521, Some(d)) => {
            KeyInner::P521Private(p521::SecretKey::from_slice(&d).map_err(invalid_scalar)?)
        }
        (NamedCurve::Ed25519, _) => {
            return Err(JwtError::unsupported_algorithm("Ed25519 is not an ECDSA curve"));
        }
    };

    // The private scalar must belong to the advertised public point.
    if inner.part() == KeyPart::Private {
        let derived = match inner.to_public() {
            KeyInner::P256Public(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            KeyInner::P384Public(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            KeyInner::P521Public(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            _ => Vec::new(),
        };
        if derived != point {
            return Err(JwtError::key_import("d does not match x/y"));
        }
    }
    Ok(inner)
}

fn ed25519_from_jwk(jwk: &Jwk) -> JwtResult<KeyInner> {
    let x: [u8; 32] = member(jwk, jwk.x.as_ref(), "x")?
        .try_into()
        .map_err(|_| JwtError::key_import("Ed25519 x must be 32 bytes"))?;
    let public = ed25519_dalek::VerifyingKey::from_bytes(&x)
        .map_err(|e| JwtError::key_import(format!("invalid Ed25519 public key: {e}")))?;

    if jwk.d.is_none() {
        return Ok(KeyInner::Ed25519Public(public));
    }

    let d: [u8; 32] = member(jwk, jwk.d.as_ref(), "d")?
        .try_into()
        .map_err(|_| JwtError::key_import("Ed25519 d must be 32 bytes"))?;
    let private = ed25519_dalek::SigningKey::from_bytes(&d);
    if private.verifying_key() != public {
        return Err(JwtError::key_import("d does not match x"));
    }
    Ok(KeyInner::Ed25519Private(private))
}

/// Export an HMAC secret as an `oct` JWK
///
/// # Errors
/// Returns `JwtError::UnsupportedAlgorithm` when `algorithm` is not an `HS*` algorithm.
pub fn export_secret_to_jwk(secret: &SecretKey, algorithm: Algorithm) -> JwtResult<Jwk> {
    if !algorithm.is_symmetric() {
        return Err(JwtError::unsupported_algorithm(format!(
            "{algorithm} does not use a shared secret"
        )));
    }
    Ok(Jwk {
        kty: "oct".to_string(),
        k: b64(secret.as_bytes()),
        alg: Some(algorithm.as_str().to_string()),
        use_: Some("sig".to_string()),
        key_ops: Some(vec!["sign".to_string(), "verify".to_string()]),
        ..Jwk::default()
    })
}

/// Import an `oct` JWK as an HMAC secret
///
/// # Errors
/// Returns `JwtError::KeyImport` when the JWK is not `oct` or `k` is missing or empty.
pub fn import_secret_from_jwk(jwk: &Jwk) -> JwtResult<SecretKey> {
    if jwk.kty != "oct" {
        return Err(JwtError::key_import(format!(
            "HMAC secrets need an oct JWK, got kty {}",
            jwk.kty
        )));
    }
    let bytes = member(jwk, jwk.k.as_ref(), "k")?;
    if bytes.is_empty() {
        return Err(JwtError::key_import("oct JWK has an empty `k`"));
    }
    Ok(SecretKey::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::keys::generation::generate_key_pair;

    #[test]
    fn p521_coordinates_are_padded_to_66_bytes() {
        let pair = generate_key_pair(Algorithm::ES512, None).unwrap();
        let jwk = export_key_to_jwk(pair.private()).unwrap();

        assert_eq!(jwk.kty, "EC");
        assert_eq!(jwk.crv.as_deref(), Some("P-521"));
        for member in [&jwk.x, &jwk.y, &jwk.d] {
            let bytes = base64_url_decode(member.as_deref().unwrap()).unwrap();
            assert_eq!(bytes.len(), 66);
        }
        assert_eq!(jwk.key_ops, Some(vec!["sign".to_string()]));
    }

    #[test]
    fn public_copy_drops_private_members() {
        let pair = generate_key_pair(Algorithm::EdDSA, None).unwrap();
        let jwk = export_key_to_jwk(pair.private()).unwrap();
        assert!(jwk.is_private());

        let public = jwk.to_public();
        assert!(!public.is_private());
        assert_eq!(public, export_key_to_jwk(pair.public()).unwrap());
    }

    #[test]
    fn kty_and_crv_must_match_algorithm() {
        let pair = generate_key_pair(Algorithm::ES256, None).unwrap();
        let jwk = export_key_to_jwk(pair.public()).unwrap();

        assert!(import_key_from_jwk(&jwk, Algorithm::ES256).is_ok());
        assert!(matches!(
            import_key_from_jwk(&jwk, Algorithm::ES384),
            Err(JwtError::KeyImport(_))
        ));
        assert!(matches!(
            import_key_from_jwk(&jwk, Algorithm::EdDSA),
            Err(JwtError::KeyImport(_))
        ));
        assert!(matches!(
            import_key_from_jwk(&jwk, Algorithm::HS256),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn mismatched_private_scalar_is_rejected() {
        let first = export_key_to_jwk(generate_key_pair(Algorithm::ES256, None).unwrap().private()).unwrap();
        let second = export_key_to_jwk(generate_key_pair(Algorithm::ES256, None).unwrap().private()).unwrap();
        let spliced = Jwk { d: second.d, ..first };

        assert!(matches!(
            import_key_from_jwk(&spliced, Algorithm::ES256),
            Err(JwtError::KeyImport(ref msg)) if msg.contains("does not match")
        ));
    }

    #[test]
    fn oct_secret_round_trip() {
        let secret = SecretKey::from_text("your-256-bit-secret");
        let jwk = export_secret_to_jwk(&secret, Algorithm::HS256).unwrap();
        assert_eq!(jwk.kty, "oct");
        assert_eq!(jwk.alg.as_deref(), Some("HS256"));

        let back = import_secret_from_jwk(&jwk).unwrap();
        assert_eq!(back.as_bytes(), b"your-256-bit-secret");
        assert!(export_secret_to_jwk(&secret, Algorithm::RS256).is_err());
        assert!(import_secret_from_jwk(&Jwk { kty: "RSA".into(), ..jwk }).is_err());
    }
}
