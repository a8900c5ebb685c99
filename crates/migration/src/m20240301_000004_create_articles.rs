//! Create `articles` table.
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
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(pk_auto(Articles::Id))
                    .col(string_len_uniq(Articles::Title, 255))
                    .col(string_len_null(Articles::LatinName, 255))
                    .col(text_null(Articles::Text))
                    .col(big_integer_null(Articles::Author))
                    .col(integer(Articles::Status))
                    .col(timestamp_with_time_zone(Articles::CreatedAt))
                    .col(timestamp_with_time_zone(Articles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_status")
                            .from(Articles::Table, Articles::Status)
                            .to(EntityStatus::Table, EntityStatus::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Articles::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum Articles {
    Table,
    Id,
    Title,
    LatinName,
    Text,
    Author,
    Status,
    CreatedAt,
    UpdatedAt,
}
