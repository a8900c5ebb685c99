use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{category, crop_category, entity_status};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "crops")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub img: Option<String>,
    pub author: Option<i64>,
    pub status: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Status,
    CropCategory,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Status => Entity::belongs_to(entity_status::Entity)
                .from(Column::Status)
                .to(entity_status::Column::Id)
                .into(),
            Relation::CropCategory => Entity::has_many(crop_category::Entity).into(),
        }
    }
}

impl Related<crop_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CropCategory.def()
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        crop_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(crop_category::Relation::Crop.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
