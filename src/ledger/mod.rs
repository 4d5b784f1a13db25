//! Click ledger
//!
//! Append-only, per-identity visit log. Records are created on the first
//! redemption for an identity, grow only by appending visits, and are removed
//! only by a bulk clear.
//!
//! # Backends
//! - `MemoryLedger`: in-process, sharded map
//! - `SeaOrmLedger`: SQLite / MySQL / PostgreSQL via SeaORM

pub mod database;
pub mod memory;
mod models;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::errors::{LinktrackError, Result};
use crate::token::Identity;

pub use database::SeaOrmLedger;
pub use memory::MemoryLedger;
pub use models::{LedgerRecord, VisitEvent};

#[async_trait]
pub trait ClickLedger: Send + Sync {
    /// 记录一次访问：不存在则创建记录，存在则追加
    ///
    /// 同一标识的并发追加不会丢失事件；不同标识之间互不阻塞。
    async fn record_visit(&self, identity: &Identity, event: VisitEvent) -> Result<()>;

    /// 所有记录，按创建时间倒序
    async fn list_all(&self) -> Result<Vec<LedgerRecord>>;

    /// 查询单个标识的记录
    async fn find(&self, identity: &Identity) -> Result<Option<LedgerRecord>>;

    /// 记录（标识）数量，不加载访问明细
    async fn count(&self) -> Result<u64>;

    /// 清空账本，返回删除的记录数
    async fn clear_all(&self) -> Result<u64>;

    fn backend_name(&self) -> &str;
}

/// 根据数据库配置构建账本后端
pub struct LedgerFactory;

impl LedgerFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn ClickLedger>> {
        let backend = match config.backend.as_deref() {
            Some(name) if !name.is_empty() => normalize_backend_name(name),
            _ => infer_backend_from_url(&config.database_url)?,
        };

        match backend.as_str() {
            "memory" => Ok(Arc::new(MemoryLedger::new())),
            "sqlite" | "mysql" | "postgres" => {
                let ledger = SeaOrmLedger::connect(config, &backend).await?;
                Ok(Arc::new(ledger))
            }
            other => Err(LinktrackError::database_config(format!(
                "不支持的存储后端: {}. 可选: memory, sqlite, mysql, postgres",
                other
            ))),
        }
    }
}

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinktrackError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend.to_lowercase().as_str() {
        "mariadb" => "mysql".to_string(),
        "postgresql" => "postgres".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend() {
        assert_eq!(infer_backend_from_url("sqlite://a.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("clicks.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mariadb://h/db").unwrap(), "mysql");
        assert_eq!(
            infer_backend_from_url("postgresql://h/db").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("mongodb://localhost/usersDB").is_err());
    }

    #[test]
    fn test_normalize_backend_name() {
        assert_eq!(normalize_backend_name("MariaDB"), "mysql");
        assert_eq!(normalize_backend_name("postgresql"), "postgres");
        assert_eq!(normalize_backend_name("memory"), "memory");
    }

    #[tokio::test]
    async fn test_factory_memory_backend() {
        let config = DatabaseConfig {
            backend: Some("memory".to_string()),
            ..Default::default()
        };
        let ledger = LedgerFactory::create(&config).await.unwrap();
        assert_eq!(ledger.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_factory_unknown_backend() {
        let config = DatabaseConfig {
            backend: Some("mongodb".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            LedgerFactory::create(&config).await,
            Err(LinktrackError::DatabaseConfig(_))
        ));
    }
}
