//! 点击账本表迁移
//!
//! - tracked_identities：每个标识一行，identity 唯一
//! - identity_visits：每次访问一行，只追加

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackedIdentities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackedIdentities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // 100 个 UTF-16 码元最多 400 字节 UTF-8
                    .col(
                        ColumnDef::new(TrackedIdentities::Identity)
                            .string_len(400)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TrackedIdentities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tracked_identities_created_at")
                    .table(TrackedIdentities::Table)
                    .col(TrackedIdentities::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IdentityVisits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IdentityVisits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IdentityVisits::IdentityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdentityVisits::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(IdentityVisits::SourceAddress).text().null())
                    .col(ColumnDef::new(IdentityVisits::UserAgent).text().null())
                    .col(ColumnDef::new(IdentityVisits::Host).text().null())
                    .col(ColumnDef::new(IdentityVisits::Referer).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_identity_visits_identity_id")
                            .from(IdentityVisits::Table, IdentityVisits::IdentityId)
                            .to(TrackedIdentities::Table, TrackedIdentities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 按标识读取访问序列
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_identity_visits_identity_id")
                    .table(IdentityVisits::Table)
                    .col(IdentityVisits::IdentityId)
                    .col(IdentityVisits::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IdentityVisits::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TrackedIdentities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TrackedIdentities {
    #[sea_orm(iden = "tracked_identities")]
    Table,
    Id,
    Identity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum IdentityVisits {
    #[sea_orm(iden = "identity_visits")]
    Table,
    Id,
    IdentityId,
    OccurredAt,
    SourceAddress,
    UserAgent,
    Host,
    Referer,
}
