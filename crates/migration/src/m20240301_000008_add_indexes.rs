use sea_orm_migration::prelude::*;

use crate::m20240301_000002_create_crops::Crops;
use crate::m20240301_000003_create_categories::Categories;
use crate::m20240301_000004_create_articles::Articles;
use crate::m20240301_000005_create_crops_categories::CropsCategories;
use crate::m20240301_000006_create_articles_relations::ArticlesRelations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // List reads always filter by status
        manager
            .create_index(Index::create().name("idx_crops_status").table(Crops::Table).col(Crops::Status).to_owned())
            .await?;
        manager
            .create_index(Index::create().name("idx_categories_status").table(Categories::Table).col(Categories::Status).to_owned())
            .await?;
        manager
            .create_index(Index::create().name("idx_articles_status").table(Articles::Table).col(Articles::Status).to_owned())
            .await?;

        // Reverse lookups on the junction tables
        manager
            .create_index(
                Index::create()
                    .name("idx_crops_categories_category")
                    .table(CropsCategories::Table)
                    .col(CropsCategories::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_articles_relations_article")
                    .table(ArticlesRelations::Table)
                    .col(ArticlesRelations::ArticleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_crops_status", Crops::Table.into_iden()),
            ("idx_categories_status", Categories::Table.into_iden()),
            ("idx_articles_status", Articles::Table.into_iden()),
            ("idx_crops_categories_category", CropsCategories::Table.into_iden()),
            ("idx_articles_relations_article", ArticlesRelations::Table.into_iden()),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}
