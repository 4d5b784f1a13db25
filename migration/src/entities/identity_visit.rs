//! Append-only visit log, one row per redemption

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "identity_visits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub identity_id: i64,
    pub occurred_at: DateTimeUtc,
    #[sea_orm(column_type = "Text", nullable)]
    pub source_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub host: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub referer: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tracked_identity::Entity",
        from = "Column::IdentityId",
        to = "super::tracked_identity::Column::Id",
        on_delete = "Cascade"
    )]
    TrackedIdentity,
}

impl Related<super::tracked_identity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrackedIdentity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
