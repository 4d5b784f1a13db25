//! Token codec tests
//!
//! Properties of the stateless token format: round trip, tamper rejection,
//! identity bounds.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use linktrack::errors::LinktrackError;
use linktrack::token::{
    Identity, MAX_IDENTITY_LEN, SIGNATURE_HEX_LEN, TokenCodec, constant_time_eq, issue, redeem,
};

/// 拆出令牌中的 identity 与签名
fn split_token(token: &str) -> (String, String) {
    let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(token).unwrap()).unwrap();
    let (identity, signature) = payload.rsplit_once(':').unwrap();
    (identity.to_string(), signature.to_string())
}

fn reassemble(identity: &str, signature: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{}:{}", identity, signature))
}

// =============================================================================
// 往返测试
// =============================================================================

#[cfg(test)]
mod round_trip_tests {
    use super::*;

    #[test]
    fn test_alice_scenario() {
        let token = issue("alice@example.com", b"k1").unwrap();
        assert_eq!(redeem(&token, b"k1").unwrap().as_str(), "alice@example.com");
        assert!(matches!(
            redeem(&token, b"k2"),
            Err(LinktrackError::BadSignature(_))
        ));
    }

    #[test]
    fn test_all_lengths_round_trip() {
        for len in 1..=MAX_IDENTITY_LEN {
            let identity: String = "abcdefghij".chars().cycle().take(len).collect();
            let token = issue(&identity, b"secret").unwrap();
            assert_eq!(redeem(&token, b"secret").unwrap().as_str(), identity);
        }
    }

    #[test]
    fn test_various_secrets_round_trip() {
        let long_secret = vec![0x42u8; 200];
        let secrets: [&[u8]; 4] = [b"k", b"another secret", &[0u8, 1, 2, 255], &long_secret];
        for secret in secrets {
            for identity in ["bob", "x", "名前", "with space", "a:b", "emoji 🎉"] {
                let token = issue(identity, secret).unwrap();
                assert_eq!(redeem(&token, secret).unwrap().as_str(), identity);
            }
        }
    }

    #[test]
    fn test_codec_round_trip() {
        let codec = TokenCodec::new("codec-secret").unwrap();
        let identity = Identity::parse("carol@example.org").unwrap();
        let token = codec.issue(&identity).unwrap();
        assert_eq!(codec.redeem(&token).unwrap(), identity);
    }
}

// =============================================================================
// 篡改检测
// =============================================================================

#[cfg(test)]
mod tamper_tests {
    use super::*;

    #[test]
    fn test_every_single_char_signature_mutation_rejected() {
        let token = issue("alice@example.com", b"k1").unwrap();
        let (identity, signature) = split_token(&token);
        assert_eq!(signature.len(), SIGNATURE_HEX_LEN);

        for pos in 0..signature.len() {
            for replacement in "0123456789abcdef".chars() {
                let mut bytes = signature.clone().into_bytes();
                if bytes[pos] == replacement as u8 {
                    continue;
                }
                bytes[pos] = replacement as u8;
                let forged = reassemble(&identity, &String::from_utf8(bytes).unwrap());
                assert!(
                    matches!(redeem(&forged, b"k1"), Err(LinktrackError::BadSignature(_))),
                    "mutation at {} to {} was accepted",
                    pos,
                    replacement
                );
            }
        }
    }

    #[test]
    fn test_extended_signature_rejected() {
        let token = issue("dave", b"k1").unwrap();
        let (identity, signature) = split_token(&token);
        let forged = reassemble(&identity, &format!("{}0", signature));
        assert!(matches!(
            redeem(&forged, b"k1"),
            Err(LinktrackError::BadSignature(_))
        ));
    }

    #[test]
    fn test_identity_substitution_rejected() {
        let token = issue("eve", b"k1").unwrap();
        let (_, signature) = split_token(&token);
        let forged = reassemble("admin", &signature);
        assert!(matches!(
            redeem(&forged, b"k1"),
            Err(LinktrackError::BadSignature(_))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        for token in ["", "@@@", "====", "dGVzdA", "Og"] {
            // "dGVzdA" -> "test"（无分隔符），"Og" -> ":"（两部分皆空）
            let err = redeem(token, b"k1").unwrap_err();
            assert!(
                matches!(err, LinktrackError::MalformedToken(_)),
                "{:?} -> {:?}",
                token,
                err
            );
            assert!(err.is_redemption_failure());
        }
    }
}

// =============================================================================
// 标识边界
// =============================================================================

#[cfg(test)]
mod identity_bound_tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert!(matches!(
            issue("", b"k1"),
            Err(LinktrackError::InvalidIdentity(_))
        ));
        assert!(matches!(
            issue(&"a".repeat(101), b"k1"),
            Err(LinktrackError::InvalidIdentity(_))
        ));
        assert!(issue(&"a".repeat(100), b"k1").is_ok());
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // 每个 emoji 占两个 UTF-16 单元
        assert!(Identity::parse("😀".repeat(50)).is_ok());
        assert!(Identity::parse("😀".repeat(51)).is_err());
        // BMP 内的多字节字符按一个单元计
        assert!(Identity::parse("é".repeat(100)).is_ok());
    }

    #[test]
    fn test_constant_time_eq_semantics() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }
}
