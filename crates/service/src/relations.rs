//! Relation manager: crop↔category links and crop×category×article placements.
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::errors::ServiceError;
use models::{article_relation, crop_category};

#[derive(Clone)]
pub struct RelationManager {
    db: DatabaseConnection,
}

impl RelationManager {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// `AlreadyExists` for a duplicate link, `InvalidArguments` when either side is missing.
    pub async fn link(&self, crop_id: i32, category_id: i32) -> Result<(), ServiceError> {
        link_crop_category(&self.db, crop_id, category_id).await?;
        info!(crop_id, category_id, "crop_category_linked");
        Ok(())
    }

    /// Removing a link that does not exist is not an error.
    pub async fn unlink(&self, crop_id: i32, category_id: i32) -> Result<(), ServiceError> {
        let res = crop_category::Entity::delete_many()
            .filter(crop_category::Column::CropId.eq(crop_id))
            .filter(crop_category::Column::CategoryId.eq(category_id))
            .exec(&self.db)
            .await?;
        info!(crop_id, category_id, removed = res.rows_affected, "crop_category_unlinked");
        Ok(())
    }
}

pub async fn link_crop_category<C: ConnectionTrait>(conn: &C, crop_id: i32, category_id: i32) -> Result<(), ServiceError> {
    let row = crop_category::ActiveModel { crop_id: Set(crop_id), category_id: Set(category_id) };
    crop_category::Entity::insert(row).exec_without_returning(conn).await?;
    Ok(())
}

pub async fn link_article<C: ConnectionTrait>(
    conn: &C,
    crop_id: i32,
    category_id: i32,
    article_id: i32,
) -> Result<(), ServiceError> {
    let row = article_relation::ActiveModel {
        crop_id: Set(crop_id),
        category_id: Set(category_id),
        article_id: Set(article_id),
    };
    article_relation::Entity::insert(row).exec_without_returning(conn).await?;
    Ok(())
}
