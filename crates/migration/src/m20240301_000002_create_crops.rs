//! Create `crops` table, the root of the catalog hierarchy.
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
                    .table(Crops::Table)
                    .if_not_exists()
                    .col(pk_auto(Crops::Id))
                    .col(string_len_uniq(Crops::Name, 255))
                    .col(text_null(Crops::Description))
                    .col(string_len_null(Crops::Img, 1024))
                    .col(big_integer_null(Crops::Author))
                    .col(integer(Crops::Status))
                    .col(timestamp_with_time_zone(Crops::CreatedAt))
                    .col(timestamp_with_time_zone(Crops::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_crops_status")
                            .from(Crops::Table, Crops::Status)
                            .to(EntityStatus::Table, EntityStatus::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Crops::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum Crops {
    Table,
    Id,
    Name,
    Description,
    Img,
    Author,
    Status,
    CreatedAt,
    UpdatedAt,
}
