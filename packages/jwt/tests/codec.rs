//! Base64url codec and compact serialization

use jwtsmith_jwt::{
    Algorithm, JwtClaims, JwtHeader, base64_url_decode, base64_url_encode, decode, encode,
    is_jwt, signing_input,
};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn test_base64_url_is_inverse(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let encoded = base64_url_encode(&bytes);
        prop_assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        prop_assert_eq!(base64_url_decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_decode_recovers_encoded_parts(
        sub in "\\PC{0,40}",
        role in "[a-z]{1,12}",
        exp in proptest::option::of(0u64..4_102_444_800),
        signature in proptest::collection::vec(any::<u8>(), 0..96),
    ) {
        let header = JwtHeader::new(Algorithm::ES256).with_key_id("k1");
        let mut claims = JwtClaims { sub: Some(sub), exp, ..JwtClaims::default() };
        claims.custom.insert("role".to_string(), json!(role));

        let token = encode(&header, &claims, &signature).unwrap();
        prop_assert!(is_jwt(token.as_str()));

        let decoded = decode(token.as_str()).unwrap();
        prop_assert_eq!(decoded.header, header);
        prop_assert_eq!(decoded.payload, claims);
        prop_assert_eq!(base64_url_decode(&decoded.signature).unwrap(), signature);
    }
}

#[test]
fn test_padded_input_is_accepted() {
    assert_eq!(base64_url_decode("YQ==").unwrap(), b"a");
    assert_eq!(base64_url_decode("YQ").unwrap(), b"a");
    assert!(base64_url_decode("Y").is_err());
    assert!(base64_url_decode("a+b/").is_err());
}

#[test]
fn test_decode_rejects_wrong_segment_count() {
    for token in ["abc", "a.b", "a.b.c.d", ""] {
        let err = decode(token).unwrap_err();
        assert_eq!(err.to_string(), "Invalid JWT format", "{token:?}");
    }
}

#[test]
fn test_decode_rejects_non_object_segments() {
    let header = base64_url_encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let array = base64_url_encode(b"[1,2]");
    let not_json = base64_url_encode(b"hello");

    assert!(decode(&format!("{header}.{array}.")).unwrap_err().is_format());
    assert!(decode(&format!("{header}.{not_json}.")).unwrap_err().is_format());
    assert!(decode(&format!("{array}.{header}.")).unwrap_err().is_format());
    assert!(decode(&format!("{header}.***.")).unwrap_err().is_format());
}

#[test]
fn test_header_without_alg_is_malformed() {
    let header = base64_url_encode(br#"{"typ":"JWT"}"#);
    let payload = base64_url_encode(b"{}");
    assert!(decode(&format!("{header}.{payload}.")).unwrap_err().is_format());
}

#[test]
fn test_unknown_members_survive_decoding() {
    let header = base64_url_encode(br#"{"alg":"HS256","typ":"JWT","ver":2}"#);
    let payload = base64_url_encode(br#"{"sub":"u","aud":["a","b"],"scope":"read"}"#);
    let decoded = decode(&format!("{header}.{payload}.sig")).unwrap();

    assert_eq!(decoded.header.extra["ver"], 2);
    assert_eq!(decoded.payload.custom_claim("scope"), Some(&json!("read")));
    assert!(decoded.payload.aud.unwrap().contains("b"));
    assert_eq!(decoded.signature, "sig");
}

#[test]
fn test_signing_input_is_token_prefix() {
    let header = JwtHeader::new(Algorithm::HS256);
    let claims = JwtClaims {
        sub: Some("1234567890".to_string()),
        ..JwtClaims::default()
    };
    let input = signing_input(&header, &claims).unwrap();
    let token = encode(&header, &claims, b"sig").unwrap();

    assert_eq!(token.signing_input(), input);
    assert_eq!(input, "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0");
}
