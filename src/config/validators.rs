//! 启动配置校验

use url::Url;

use super::StaticConfig;
use crate::errors::{LinktrackError, Result};

/// 校验 http(s) 绝对地址
fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| LinktrackError::config(format!("{} 不是合法 URL ({}): {}", field, e, value)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(LinktrackError::config(format!(
            "{} 只支持 http/https，当前为: {}",
            field, other
        ))),
    }
}

fn validate_prefix(field: &str, value: &str) -> Result<()> {
    if !value.starts_with('/') || value.len() < 2 || value.ends_with('/') {
        return Err(LinktrackError::config(format!(
            "{} 必须以 '/' 开头且不以 '/' 结尾: {}",
            field, value
        )));
    }
    Ok(())
}

pub fn validate_static_config(config: &StaticConfig) -> Result<()> {
    if config.tracking.secret_key.is_empty() {
        return Err(LinktrackError::config(
            "tracking.secret_key 未设置（可通过 LT__TRACKING__SECRET_KEY 提供）",
        ));
    }

    validate_http_url("tracking.redirect_url", &config.tracking.redirect_url)?;
    if let Some(base) = config.tracking.public_base_url.as_deref()
        && !base.is_empty()
    {
        validate_http_url("tracking.public_base_url", base)?;
    }

    validate_prefix("routes.admin_prefix", &config.routes.admin_prefix)?;
    validate_prefix("routes.health_prefix", &config.routes.health_prefix)?;
    validate_prefix("routes.tracking_prefix", &config.routes.tracking_prefix)?;

    if config.logging.format != "text" && config.logging.format != "json" {
        return Err(LinktrackError::config(format!(
            "logging.format 只支持 text/json: {}",
            config.logging.format
        )));
    }

    Ok(())
}
