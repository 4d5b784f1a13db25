use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinktrackError {
    InvalidIdentity(String),
    MalformedToken(String),
    BadSignature(String),
    Storage(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    Config(String),
    NotFound(String),
    Serialization(String),
}

impl LinktrackError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinktrackError::InvalidIdentity(_) => "E001",
            LinktrackError::MalformedToken(_) => "E002",
            LinktrackError::BadSignature(_) => "E003",
            LinktrackError::Storage(_) => "E004",
            LinktrackError::DatabaseConfig(_) => "E005",
            LinktrackError::DatabaseConnection(_) => "E006",
            LinktrackError::Config(_) => "E007",
            LinktrackError::NotFound(_) => "E008",
            LinktrackError::Serialization(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinktrackError::InvalidIdentity(_) => "Invalid Identity",
            LinktrackError::MalformedToken(_) => "Malformed Token",
            LinktrackError::BadSignature(_) => "Bad Signature",
            LinktrackError::Storage(_) => "Storage Error",
            LinktrackError::DatabaseConfig(_) => "Database Configuration Error",
            LinktrackError::DatabaseConnection(_) => "Database Connection Error",
            LinktrackError::Config(_) => "Configuration Error",
            LinktrackError::NotFound(_) => "Resource Not Found",
            LinktrackError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinktrackError::InvalidIdentity(msg)
            | LinktrackError::MalformedToken(msg)
            | LinktrackError::BadSignature(msg)
            | LinktrackError::Storage(msg)
            | LinktrackError::DatabaseConfig(msg)
            | LinktrackError::DatabaseConnection(msg)
            | LinktrackError::Config(msg)
            | LinktrackError::NotFound(msg)
            | LinktrackError::Serialization(msg) => msg,
        }
    }

    /// 令牌兑换失败（格式错误与签名错误对外不可区分）
    pub fn is_redemption_failure(&self) -> bool {
        matches!(
            self,
            LinktrackError::MalformedToken(_) | LinktrackError::BadSignature(_)
        )
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinktrackError::InvalidIdentity(_) => StatusCode::BAD_REQUEST,
            LinktrackError::MalformedToken(_) | LinktrackError::BadSignature(_) => {
                StatusCode::FORBIDDEN
            }
            LinktrackError::NotFound(_) => StatusCode::NOT_FOUND,
            LinktrackError::Storage(_)
            | LinktrackError::DatabaseConfig(_)
            | LinktrackError::DatabaseConnection(_)
            | LinktrackError::Config(_)
            | LinktrackError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对外暴露的消息
    ///
    /// 兑换失败统一为同一句话，基础设施错误不泄露细节。
    pub fn public_message(&self) -> &str {
        match self {
            LinktrackError::MalformedToken(_) | LinktrackError::BadSignature(_) => {
                "Invalid tracking link"
            }
            LinktrackError::InvalidIdentity(msg) | LinktrackError::NotFound(msg) => msg,
            _ => "An error occurred while processing your request",
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinktrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinktrackError {}

// 便捷的构造函数
impl LinktrackError {
    pub fn invalid_identity<T: Into<String>>(msg: T) -> Self {
        LinktrackError::InvalidIdentity(msg.into())
    }

    pub fn malformed_token<T: Into<String>>(msg: T) -> Self {
        LinktrackError::MalformedToken(msg.into())
    }

    pub fn bad_signature<T: Into<String>>(msg: T) -> Self {
        LinktrackError::BadSignature(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        LinktrackError::Storage(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinktrackError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinktrackError::DatabaseConnection(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinktrackError::Config(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinktrackError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinktrackError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinktrackError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinktrackError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LinktrackError {
    fn from(err: serde_json::Error) -> Self {
        LinktrackError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinktrackError>;
