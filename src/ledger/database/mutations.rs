//! Write operations for SeaOrmLedger

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait,
    sea_query::OnConflict,
};
use tracing::{debug, info};

use super::SeaOrmLedger;
use super::converters::visit_to_active_model;
use super::retry;
use crate::errors::{LinktrackError, Result};
use crate::ledger::VisitEvent;
use crate::token::Identity;

use migration::entities::{identity_visit, tracked_identity};

/// 原子的 upsert-append
///
/// 一个事务内：标识行 `INSERT … ON CONFLICT DO NOTHING`，取回其 id，插入一条访问行。
/// 访问是独立的行而不是数组字段，不存在读-改-写，并发追加不会互相覆盖。
async fn upsert_append(
    db: &DatabaseConnection,
    identity: &str,
    event: &VisitEvent,
) -> std::result::Result<(), DbErr> {
    let txn = db.begin().await?;

    tracked_identity::Entity::insert(tracked_identity::ActiveModel {
        id: NotSet,
        identity: Set(identity.to_string()),
        created_at: Set(Utc::now()),
    })
    .on_conflict(
        OnConflict::column(tracked_identity::Column::Identity)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    let owner = tracked_identity::Entity::find()
        .filter(tracked_identity::Column::Identity.eq(identity))
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("tracked identity '{}'", identity)))?;

    identity_visit::Entity::insert(visit_to_active_model(owner.id, event))
        .exec_without_returning(&txn)
        .await?;

    txn.commit().await
}

/// 一个事务内清空两张表，返回删除的标识数
async fn delete_everything(db: &DatabaseConnection) -> std::result::Result<u64, DbErr> {
    let txn = db.begin().await?;

    identity_visit::Entity::delete_many().exec(&txn).await?;
    let removed = tracked_identity::Entity::delete_many().exec(&txn).await?;

    txn.commit().await?;
    Ok(removed.rows_affected)
}

impl SeaOrmLedger {
    pub(super) async fn append_visit(&self, identity: &Identity, event: &VisitEvent) -> Result<()> {
        let db = &self.db;
        let identity = identity.as_str();

        retry::with_retry("record_visit", self.retry_config, || {
            upsert_append(db, identity, event)
        })
        .await
        .map_err(|e| LinktrackError::storage(format!("记录访问失败: {}", e)))?;

        debug!(
            "Visit appended to {} ledger",
            self.backend_name.to_uppercase()
        );
        Ok(())
    }

    pub(super) async fn remove_all(&self) -> Result<u64> {
        let db = &self.db;

        let removed = retry::with_retry("clear_all", self.retry_config, || delete_everything(db))
            .await
            .map_err(|e| LinktrackError::storage(format!("清空账本失败: {}", e)))?;

        info!("Ledger cleared: {} records removed", removed);
        Ok(removed)
    }
}
