use serde::{Deserialize, Serialize};

use crate::errors::{LinktrackError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，示例：LT__TRACKING__SECRET_KEY
pub const ENV_PREFIX: &str = "LT";

/// 静态配置（从 TOML 与环境变量加载，启动时使用）
///
/// 包含：
/// - server: 监听地址、端口、CPU 数量
/// - database: 账本存储配置
/// - tracking: 签名密钥、管理密钥、跳转地址
/// - routes: 路由前缀
/// - cors: 跨域配置
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：LT，分隔符：__
    /// 示例：LT__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// 使用给定的环境变量表加载配置
    pub fn load_with_env(path: Option<&str>, env: config::Map<String, String>) -> Result<Self> {
        use config::{Config, Environment, File};

        let explicit = path.is_some();
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        // 密钥原样读取，不参与数值/布尔解析（"007" 不能变成 "7"）
        let raw = |key: &str| {
            let name = format!("{}__TRACKING__{}", ENV_PREFIX, key);
            env.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(&name))
                .map(|(_, v)| v.clone())
        };
        let secret_key = raw("SECRET_KEY");
        let admin_key = raw("ADMIN_KEY");

        let settings = Config::builder()
            // 显式指定的配置文件必须存在
            .add_source(File::with_name(path).required(explicit))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .source(Some(env.clone())),
            )
            .set_override_option("tracking.secret_key", secret_key)
            .and_then(|b| b.set_override_option("tracking.admin_key", admin_key))
            .map_err(|e| LinktrackError::config(format!("Failed to build config: {}", e)))?
            .build()
            .map_err(|e| LinktrackError::config(format!("Failed to build config: {}", e)))?;

        settings
            .try_deserialize::<StaticConfig>()
            .map_err(|e| LinktrackError::config(format!("Failed to deserialize config: {}", e)))
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 启动前校验
    pub fn validate(&self) -> Result<()> {
        super::validators::validate_static_config(self)
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 账本存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// memory / sqlite / mysql / postgres，留空则从 URL 推断
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 追踪链接配置
#[derive(Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// HMAC 签名密钥
    #[serde(default)]
    pub secret_key: String,
    /// 管理接口密钥，留空时沿用 secret_key
    #[serde(default)]
    pub admin_key: Option<String>,
    /// 兑换成功后的跳转地址
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
    /// 生成链接时使用的外部地址，留空则取请求的 scheme://host
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl TrackingConfig {
    /// 实际生效的管理密钥
    pub fn effective_admin_key(&self) -> &str {
        match self.admin_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => &self.secret_key,
        }
    }
}

// 密钥不进入日志
impl std::fmt::Debug for TrackingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingConfig")
            .field("secret_key", &"<redacted>")
            .field("admin_key", &self.admin_key.as_ref().map(|_| "<redacted>"))
            .field("redirect_url", &self.redirect_url)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

/// 路由前缀配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
    #[serde(default = "default_health_prefix")]
    pub health_prefix: String,
    #[serde(default = "default_tracking_prefix")]
    pub tracking_prefix: String,
}

/// 跨域配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// 允许的来源，空列表表示任意来源（此时不允许携带凭据）
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://linktrack.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    8
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_redirect_url() -> String {
    "https://example.com".to_string()
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_health_prefix() -> String {
    "/health".to_string()
}

fn default_tracking_prefix() -> String {
    "/t".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: None,
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            admin_key: None,
            redirect_url: default_redirect_url(),
            public_base_url: None,
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            admin_prefix: default_admin_prefix(),
            health_prefix: default_health_prefix(),
            tracking_prefix: default_tracking_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sample_config_parses_back() {
        let sample = StaticConfig::generate_sample_config();
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.routes.tracking_prefix, "/t");
        assert!(parsed.tracking.secret_key.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[database]
backend = "memory"

[tracking]
secret_key = "file-secret"
redirect_url = "https://intranet.example.org/landing"
"#
        )
        .unwrap();

        let config = StaticConfig::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.backend.as_deref(), Some("memory"));
        assert_eq!(config.tracking.secret_key, "file-secret");
        assert_eq!(config.tracking.effective_admin_key(), "file-secret");
    }

    #[test]
    fn test_env_secrets_kept_verbatim() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 9090").unwrap();

        let env: config::Map<String, String> = [
            ("LT__TRACKING__SECRET_KEY", "007"),
            ("LT__TRACKING__ADMIN_KEY", "1e3"),
            ("LT__SERVER__PORT", "9191"),
            ("LT__DATABASE__RETRY_COUNT", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config =
            StaticConfig::load_with_env(Some(file.path().to_str().unwrap()), env).unwrap();
        assert_eq!(config.tracking.secret_key, "007");
        assert_eq!(config.tracking.admin_key.as_deref(), Some("1e3"));
        assert_eq!(config.tracking.effective_admin_key(), "1e3");
        // 其它字段仍按类型解析
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.database.retry_count, 5);
    }

    #[test]
    fn test_env_without_secrets_keeps_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[tracking]\nsecret_key = \"0042\"").unwrap();

        let config = StaticConfig::load_with_env(
            Some(file.path().to_str().unwrap()),
            config::Map::new(),
        )
        .unwrap();
        assert_eq!(config.tracking.secret_key, "0042");
        assert!(config.tracking.admin_key.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(StaticConfig::load(Some("/nonexistent/linktrack.toml")).is_err());
    }

    #[test]
    fn test_admin_key_override() {
        let tracking = TrackingConfig {
            secret_key: "s".to_string(),
            admin_key: Some("a".to_string()),
            ..Default::default()
        };
        assert_eq!(tracking.effective_admin_key(), "a");

        let empty_admin = TrackingConfig {
            secret_key: "s".to_string(),
            admin_key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty_admin.effective_admin_key(), "s");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let tracking = TrackingConfig {
            secret_key: "do-not-print".to_string(),
            admin_key: Some("nor-this".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", tracking);
        assert!(!debug.contains("do-not-print"));
        assert!(!debug.contains("nor-this"));
    }
}
