//! 追踪令牌编解码
//!
//! 令牌格式：`base64url_nopad(identity ":" hex(HMAC-SHA256(secret, identity)))`
//!
//! 令牌是确定性的：同一 secret 下同一 identity 总是得到同一令牌，
//! 不含 nonce、时间戳或过期时间，服务端无需保存任何令牌状态。

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::compare::constant_time_eq;
use super::identity::Identity;
use crate::errors::{LinktrackError, Result};

type HmacSha256 = Hmac<Sha256>;

/// identity 与签名之间的分隔符
pub const SEPARATOR: char = ':';

/// 十六进制签名长度（SHA-256 输出 32 字节）
pub const SIGNATURE_HEX_LEN: usize = 64;

/// 计算 identity 的十六进制签名
fn sign(identity: &[u8], secret: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| LinktrackError::config(format!("HMAC 密钥无效: {}", e)))?;
    mac.update(identity);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// 为 identity 签发令牌
pub fn issue(identity: &str, secret: &[u8]) -> Result<String> {
    let identity = Identity::parse(identity)?;
    issue_for(&identity, secret)
}

/// 为已校验的 identity 签发令牌
pub fn issue_for(identity: &Identity, secret: &[u8]) -> Result<String> {
    let signature = sign(identity.as_str().as_bytes(), secret)?;
    let payload = format!("{}{}{}", identity.as_str(), SEPARATOR, signature);
    Ok(URL_SAFE_NO_PAD.encode(payload.as_bytes()))
}

/// 校验令牌并取回 identity
///
/// 解码失败、非 UTF-8、无法拆成两个非空部分时返回 `MalformedToken`；
/// 签名不一致时返回 `BadSignature`。签名计算本身出错也按 `BadSignature` 处理。
pub fn redeem(token: &str, secret: &[u8]) -> Result<Identity> {
    let decoded = URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .map_err(|_| LinktrackError::malformed_token("Token decode failed"))?;

    let payload = String::from_utf8(decoded)
        .map_err(|_| LinktrackError::malformed_token("Token payload is not valid UTF-8"))?;

    // 签名字母表（hex）不含分隔符，按最后一个分隔符拆分，identity 中的 ':' 得以保留
    let (identity, signature) = payload
        .rsplit_once(SEPARATOR)
        .filter(|(identity, signature)| !identity.is_empty() && !signature.is_empty())
        .ok_or_else(|| LinktrackError::malformed_token("Invalid token format"))?;

    let expected = sign(identity.as_bytes(), secret)
        .map_err(|_| LinktrackError::bad_signature("Invalid token signature"))?;

    if !constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
        return Err(LinktrackError::bad_signature("Invalid token signature"));
    }

    Identity::parse(identity).map_err(|_| LinktrackError::malformed_token("Invalid token format"))
}

/// 绑定了密钥的编解码器
///
/// 密钥在构造时传入，之后只读，可在任意线程间共享。
#[derive(Clone)]
pub struct TokenCodec {
    secret: Arc<[u8]>,
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(LinktrackError::config("tracking secret key must not be empty"));
        }
        Ok(Self {
            secret: Arc::from(secret),
        })
    }

    pub fn issue(&self, identity: &Identity) -> Result<String> {
        issue_for(identity, &self.secret)
    }

    pub fn redeem(&self, token: &str) -> Result<Identity> {
        redeem(token, &self.secret)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"<redacted>")
            .finish()
    }
}
