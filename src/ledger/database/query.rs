//! Read operations for SeaOrmLedger

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use super::SeaOrmLedger;
use super::converters::model_to_record;
use crate::errors::{LinktrackError, Result};
use crate::ledger::LedgerRecord;
use crate::token::Identity;

use migration::entities::{identity_visit, tracked_identity};

impl SeaOrmLedger {
    /// 读取全部记录（同一事务内读取两张表，不会看到清空到一半的状态）
    pub(super) async fn load_all(&self) -> Result<Vec<LedgerRecord>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LinktrackError::storage(format!("开始事务失败: {}", e)))?;

        let owners = tracked_identity::Entity::find()
            .order_by_desc(tracked_identity::Column::CreatedAt)
            .order_by_desc(tracked_identity::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| LinktrackError::storage(format!("查询标识失败: {}", e)))?;

        if owners.is_empty() {
            txn.commit().await?;
            return Ok(Vec::new());
        }

        let visits = identity_visit::Entity::find()
            .order_by_asc(identity_visit::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| LinktrackError::storage(format!("查询访问记录失败: {}", e)))?;

        txn.commit().await?;

        let mut grouped: HashMap<i64, Vec<identity_visit::Model>> =
            HashMap::with_capacity(owners.len());
        for visit in visits {
            grouped.entry(visit.identity_id).or_default().push(visit);
        }

        Ok(owners
            .into_iter()
            .map(|owner| {
                let visits = grouped.remove(&owner.id).unwrap_or_default();
                model_to_record(owner, visits)
            })
            .collect())
    }

    pub(super) async fn load_one(&self, identity: &Identity) -> Result<Option<LedgerRecord>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LinktrackError::storage(format!("开始事务失败: {}", e)))?;

        let Some(owner) = tracked_identity::Entity::find()
            .filter(tracked_identity::Column::Identity.eq(identity.as_str()))
            .one(&txn)
            .await
            .map_err(|e| LinktrackError::storage(format!("查询标识失败: {}", e)))?
        else {
            txn.commit().await?;
            return Ok(None);
        };

        let visits = identity_visit::Entity::find()
            .filter(identity_visit::Column::IdentityId.eq(owner.id))
            .order_by_asc(identity_visit::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| LinktrackError::storage(format!("查询访问记录失败: {}", e)))?;

        txn.commit().await?;
        Ok(Some(model_to_record(owner, visits)))
    }

    pub(super) async fn count_records(&self) -> Result<u64> {
        tracked_identity::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| LinktrackError::storage(format!("统计标识数量失败: {}", e)))
    }
}
