//! Create `crops_categories` junction table (crop ↔ category).
//!
//! Rows are removed together with either side via `ON DELETE CASCADE`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240301_000002_create_crops::Crops;
use crate::m20240301_000003_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CropsCategories::Table)
                    .if_not_exists()
                    .col(integer(CropsCategories::CropId))
                    .col(integer(CropsCategories::CategoryId))
                    .primary_key(
                        Index::create()
                            .col(CropsCategories::CropId)
                            .col(CropsCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_crops_categories_crop")
                            .from(CropsCategories::Table, CropsCategories::CropId)
                            .to(Crops::Table, Crops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_crops_categories_category")
                            .from(CropsCategories::Table, CropsCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CropsCategories::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum CropsCategories {
    Table,
    CropId,
    CategoryId,
}
