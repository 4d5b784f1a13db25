//! 用户标识（Identity）
//!
//! 标识是任意用户提供的字符串，只校验长度，不做内容清洗。

use std::fmt;

use serde::Serialize;

use crate::errors::{LinktrackError, Result};

/// 标识最大长度（UTF-16 码元）
pub const MAX_IDENTITY_LEN: usize = 100;

/// 经过长度校验的标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// 校验并构造标识
    ///
    /// 长度按 UTF-16 码元计算，范围 [1, 100]。
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let len = utf16_len(&raw);

        if len == 0 {
            return Err(LinktrackError::invalid_identity("Username is required"));
        }
        if len > MAX_IDENTITY_LEN {
            return Err(LinktrackError::invalid_identity(format!(
                "Username too long (max {} characters)",
                MAX_IDENTITY_LEN
            )));
        }

        Ok(Self(raw))
    }

    /// 长度（UTF-16 码元），与校验规则一致
    pub fn char_len(&self) -> usize {
        utf16_len(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = LinktrackError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Identity {
    type Error = LinktrackError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}
