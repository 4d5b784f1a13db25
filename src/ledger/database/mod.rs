//! SeaORM ledger backend
//!
//! This module provides the click ledger on top of SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use super::{ClickLedger, LedgerRecord, VisitEvent};
use crate::config::DatabaseConfig;
use crate::errors::{LinktrackError, Result};
use crate::token::Identity;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use retry::RetryConfig;

/// SeaORM-based click ledger
#[derive(Clone)]
pub struct SeaOrmLedger {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: RetryConfig,
}

impl SeaOrmLedger {
    /// 按配置连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig, backend_name: &str) -> Result<Self> {
        if config.database_url.is_empty() {
            return Err(LinktrackError::database_config("database_url 未设置"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(&config.database_url).await?
        } else {
            connect_generic(
                &config.database_url,
                backend_name,
                config.pool_size,
                config.timeout,
            )
            .await?
        };

        Self::from_connection(db, backend_name, RetryConfig::from(config)).await
    }

    /// 使用已有连接构建（连接由调用方管理）
    pub async fn from_connection(
        db: DatabaseConnection,
        backend_name: &str,
        retry_config: RetryConfig,
    ) -> Result<Self> {
        run_migrations(&db).await?;

        let ledger = SeaOrmLedger {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        warn!(
            "{} ledger initialized.",
            ledger.backend_name.to_uppercase()
        );
        Ok(ledger)
    }
}

#[async_trait]
impl ClickLedger for SeaOrmLedger {
    async fn record_visit(&self, identity: &Identity, event: VisitEvent) -> Result<()> {
        self.append_visit(identity, &event).await
    }

    async fn list_all(&self) -> Result<Vec<LedgerRecord>> {
        self.load_all().await
    }

    async fn find(&self, identity: &Identity) -> Result<Option<LedgerRecord>> {
        self.load_one(identity).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_records().await
    }

    async fn clear_all(&self) -> Result<u64> {
        self.remove_all().await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
