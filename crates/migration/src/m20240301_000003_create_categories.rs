//! Create `categories` table.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240301_000001_create_entity_status::EntityStatus;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string_len_uniq(Categories::Name, 255))
                    .col(text_null(Categories::Description))
                    .col(string_len_null(Categories::Icon, 1024))
                    .col(big_integer_null(Categories::Author))
                    .col(integer(Categories::Status))
                    .col(timestamp_with_time_zone(Categories::CreatedAt))
                    .col(timestamp_with_time_zone(Categories::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_status")
                            .from(Categories::Table, Categories::Status)
                            .to(EntityStatus::Table, EntityStatus::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Categories::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum Categories {
    Table,
    Id,
    Name,
    Description,
    Icon,
    Author,
    Status,
    CreatedAt,
    UpdatedAt,
}
