//! Create `articles_relations` junction table (crop × category × article).
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240301_000002_create_crops::Crops;
use crate::m20240301_000003_create_categories::Categories;
use crate::m20240301_000004_create_articles::Articles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArticlesRelations::Table)
                    .if_not_exists()
                    .col(integer(ArticlesRelations::CropId))
                    .col(integer(ArticlesRelations::CategoryId))
                    .col(integer(ArticlesRelations::ArticleId))
                    .primary_key(
                        Index::create()
                            .col(ArticlesRelations::CropId)
                            .col(ArticlesRelations::CategoryId)
                            .col(ArticlesRelations::ArticleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_relations_crop")
                            .from(ArticlesRelations::Table, ArticlesRelations::CropId)
                            .to(Crops::Table, Crops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_relations_category")
                            .from(ArticlesRelations::Table, ArticlesRelations::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_relations_article")
                            .from(ArticlesRelations::Table, ArticlesRelations::ArticleId)
                            .to(Articles::Table, Articles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ArticlesRelations::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum ArticlesRelations {
    Table,
    CropId,
    CategoryId,
    ArticleId,
}
