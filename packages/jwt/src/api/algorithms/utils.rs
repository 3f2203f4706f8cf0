//! Base64url segment codec (RFC 7515 §2)

use crate::error::{JwtError, JwtResult};
use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE_NO_PAD},
};

/// URL-safe decoder that takes padded and unpadded input alike
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Base64 URL-safe encoding without padding
#[inline]
#[must_use]
pub fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding, padding optional
///
/// # Errors
/// Returns `JwtError::Format` when the input has characters outside the URL-safe
/// alphabet or a length no encoder could have produced.
#[inline]
pub fn base64_url_decode(input: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(input)
        .map_err(|e| JwtError::format(format!("Invalid base64url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_without_padding_in_url_alphabet() {
        assert_eq!(base64_url_encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(base64_url_encode(b"a"), "YQ");
        assert_eq!(base64_url_encode(b""), "");
    }

    #[test]
    fn decodes_padded_and_unpadded() {
        assert_eq!(base64_url_decode("YQ").unwrap(), b"a");
        assert_eq!(base64_url_decode("YQ==").unwrap(), b"a");
        assert_eq!(base64_url_decode("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn rejects_standard_alphabet_and_bad_lengths() {
        assert!(base64_url_decode("+/8").unwrap_err().is_format());
        assert!(base64_url_decode("Y").is_err());
        assert!(base64_url_decode("YQ.").is_err());
    }
}
