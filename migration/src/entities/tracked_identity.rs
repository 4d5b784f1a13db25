//! One row per tracked identity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tracked_identities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub identity: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::identity_visit::Entity")]
    IdentityVisit,
}

impl Related<super::identity_visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IdentityVisit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
