//! 统一 API 错误码定义

use crate::errors::LinktrackError;

/// API 错误码，序列化为数字
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接与账本错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 链接与账本错误 3000-3099
    InvalidIdentity = 3000,
    RecordNotFound = 3001,
    LedgerError = 3005,
}

impl From<&LinktrackError> for ErrorCode {
    fn from(err: &LinktrackError) -> Self {
        match err {
            LinktrackError::InvalidIdentity(_) => ErrorCode::InvalidIdentity,
            LinktrackError::MalformedToken(_) | LinktrackError::BadSignature(_) => {
                ErrorCode::Forbidden
            }
            LinktrackError::NotFound(_) => ErrorCode::RecordNotFound,
            LinktrackError::Storage(_)
            | LinktrackError::DatabaseConnection(_)
            | LinktrackError::DatabaseConfig(_) => ErrorCode::LedgerError,
            LinktrackError::Config(_) | LinktrackError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            ErrorCode::from(&LinktrackError::invalid_identity("x")),
            ErrorCode::InvalidIdentity
        );
        assert_eq!(
            ErrorCode::from(&LinktrackError::storage("x")),
            ErrorCode::LedgerError
        );
        assert_eq!(
            ErrorCode::from(&LinktrackError::not_found("x")),
            ErrorCode::RecordNotFound
        );
        assert_eq!(ErrorCode::RecordNotFound as i32, 3001);
    }
}
