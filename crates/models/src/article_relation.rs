use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{article, category, crop};

/// Junction row placing an article under a (crop, category) pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles_relations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub crop_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub article_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Crop,
    Category,
    Article,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Crop => Entity::belongs_to(crop::Entity)
                .from(Column::CropId)
                .to(crop::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Article => Entity::belongs_to(article::Entity)
                .from(Column::ArticleId)
                .to(article::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
