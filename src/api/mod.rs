//! HTTP API
//!
//! - `services`: 兑换、管理、健康检查路由
//! - `middleware`: 管理密钥校验

pub mod middleware;
pub mod services;

use serde::Serialize;

/// 所有处理器共享的只读设置，启动时从配置构建
#[derive(Clone)]
pub struct ApiSettings {
    pub redirect_url: String,
    pub public_base_url: Option<String>,
    pub tracking_prefix: String,
    admin_key: String,
}

impl ApiSettings {
    pub fn from_config(config: &crate::config::StaticConfig) -> Self {
        Self {
            redirect_url: config.tracking.redirect_url.clone(),
            public_base_url: config
                .tracking
                .public_base_url
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_string()),
            tracking_prefix: config.routes.tracking_prefix.clone(),
            admin_key: config.tracking.effective_admin_key().to_string(),
        }
    }

    pub fn admin_key(&self) -> &str {
        &self.admin_key
    }
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("redirect_url", &self.redirect_url)
            .field("public_base_url", &self.public_base_url)
            .field("tracking_prefix", &self.tracking_prefix)
            .field("admin_key", &"<redacted>")
            .finish()
    }
}

/// 统一响应结构
#[derive(Serialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}
