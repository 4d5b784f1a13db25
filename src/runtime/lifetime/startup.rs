use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::ledger::{ClickLedger, LedgerFactory};
use crate::services::TrackingService;
use crate::token::TokenCodec;

pub struct StartupContext {
    pub ledger: Arc<dyn ClickLedger>,
    pub tracking_service: Arc<TrackingService>,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub admin_prefix: String,
    pub health_prefix: String,
    pub tracking_prefix: String,
}

impl From<&StaticConfig> for RouteConfig {
    fn from(config: &StaticConfig) -> Self {
        Self {
            admin_prefix: config.routes.admin_prefix.clone(),
            health_prefix: config.routes.health_prefix.clone(),
            tracking_prefix: config.routes.tracking_prefix.clone(),
        }
    }
}

/// 构建编解码器与账本，CLI 与服务器共用
pub async fn build_tracking_service(config: &StaticConfig) -> Result<Arc<TrackingService>> {
    let codec = TokenCodec::new(config.tracking.secret_key.as_bytes())
        .context("Failed to create token codec")?;
    let ledger = LedgerFactory::create(&config.database)
        .await
        .context("Failed to create ledger backend")?;
    info!("Using ledger backend: {}", ledger.backend_name());
    Ok(Arc::new(TrackingService::new(codec, ledger)))
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    config.validate().context("Invalid configuration")?;

    let tracking_service = build_tracking_service(config).await?;
    let ledger = tracking_service.ledger().clone();

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        ledger,
        tracking_service,
        route_config: RouteConfig::from(config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prepare_with_memory_backend() {
        let mut config = StaticConfig::default();
        config.tracking.secret_key = "k1".to_string();
        config.database.backend = Some("memory".to_string());

        let ctx = prepare_server_startup(&config).await.unwrap();
        assert_eq!(ctx.ledger.backend_name(), "memory");
        assert_eq!(ctx.route_config.tracking_prefix, "/t");
    }

    #[tokio::test]
    async fn test_prepare_rejects_missing_secret() {
        let mut config = StaticConfig::default();
        config.database.backend = Some("memory".to_string());
        assert!(prepare_server_startup(&config).await.is_err());
    }
}
