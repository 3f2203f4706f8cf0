//! HMAC-SHA2 family (HS256, HS384, HS512)

use super::registry::HashAlgorithm;
use crate::error::{JwtError, JwtResult};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

fn keyed<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> JwtResult<M> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| JwtError::key_mismatch("invalid HMAC key"))?;
    mac.update(message);
    Ok(mac)
}

/// MAC `message` with `secret`
#[inline]
pub(crate) fn sign(hash: HashAlgorithm, message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    let tag = match hash {
        HashAlgorithm::Sha256 => keyed::<HmacSha256>(secret, message)?.finalize().into_bytes().to_vec(),
        HashAlgorithm::Sha384 => keyed::<HmacSha384>(secret, message)?.finalize().into_bytes().to_vec(),
        HashAlgorithm::Sha512 => keyed::<HmacSha512>(secret, message)?.finalize().into_bytes().to_vec(),
        HashAlgorithm::Intrinsic => {
            return Err(JwtError::unsupported_algorithm("HMAC needs an explicit hash"));
        }
    };
    Ok(tag)
}

/// Check a MAC in constant time
#[inline]
pub(crate) fn verify(
    hash: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
    secret: &[u8],
) -> JwtResult<bool> {
    let valid = match hash {
        HashAlgorithm::Sha256 => keyed::<HmacSha256>(secret, message)?.verify_slice(signature).is_ok(),
        HashAlgorithm::Sha384 => keyed::<HmacSha384>(secret, message)?.verify_slice(signature).is_ok(),
        HashAlgorithm::Sha512 => keyed::<HmacSha512>(secret, message)?.verify_slice(signature).is_ok(),
        HashAlgorithm::Intrinsic => {
            return Err(JwtError::unsupported_algorithm("HMAC needs an explicit hash"));
        }
    };
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2
    const KEY: &[u8] = b"Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn matches_rfc4231_vectors() {
        assert_eq!(
            hex::encode(sign(HashAlgorithm::Sha256, DATA, KEY).unwrap()),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
        assert_eq!(sign(HashAlgorithm::Sha384, DATA, KEY).unwrap().len(), 48);
        assert_eq!(sign(HashAlgorithm::Sha512, DATA, KEY).unwrap().len(), 64);
    }

    #[test]
    fn verify_rejects_other_key_and_truncation() {
        let tag = sign(HashAlgorithm::Sha384, DATA, KEY).unwrap();
        assert!(verify(HashAlgorithm::Sha384, DATA, &tag, KEY).unwrap());
        assert!(!verify(HashAlgorithm::Sha384, DATA, &tag, b"Jeff").unwrap());
        assert!(!verify(HashAlgorithm::Sha384, DATA, &tag[..47], KEY).unwrap());
        assert!(!verify(HashAlgorithm::Sha256, DATA, &tag, KEY).unwrap());
    }
}
