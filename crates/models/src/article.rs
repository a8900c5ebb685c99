use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{article_image, article_relation, entity_status};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub latin_name: Option<String>,
    pub text: Option<String>,
    pub author: Option<i64>,
    pub status: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Status,
    Images,
    Relations,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Status => Entity::belongs_to(entity_status::Entity)
                .from(Column::Status)
                .to(entity_status::Column::Id)
                .into(),
            Relation::Images => Entity::has_many(article_image::Entity).into(),
            Relation::Relations => Entity::has_many(article_relation::Entity).into(),
        }
    }
}

impl Related<article_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<article_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Relations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
