//! Create `articles_images` table holding the image set of each article.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240301_000004_create_articles::Articles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArticlesImages::Table)
                    .if_not_exists()
                    .col(integer(ArticlesImages::ArticleId))
                    .col(string_len(ArticlesImages::Img, 1024))
                    .primary_key(
                        Index::create()
                            .col(ArticlesImages::ArticleId)
                            .col(ArticlesImages::Img),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_images_article")
                            .from(ArticlesImages::Table, ArticlesImages::ArticleId)
                            .to(Articles::Table, Articles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ArticlesImages::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum ArticlesImages {
    Table,
    ArticleId,
    Img,
}
