//! Crop persistence. Generic over the connection so calls compose inside a transaction.
use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::domain::CropUpdate;
use crate::errors::ServiceError;
use crate::workflow::set_if;
use models::crop;

pub struct NewCrop {
    pub name: String,
    pub description: Option<String>,
    pub img: Option<String>,
    pub author: Option<i64>,
    pub status: i32,
}

pub async fn insert<C: ConnectionTrait>(conn: &C, new: NewCrop) -> Result<i32, ServiceError> {
    let now = Utc::now().fixed_offset();
    let am = crop::ActiveModel {
        name: Set(new.name),
        description: Set(new.description),
        img: Set(new.img),
        author: Set(new.author),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = crop::Entity::insert(am).exec(conn).await?;
    Ok(res.last_insert_id)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<crop::Model>, ServiceError> {
    Ok(crop::Entity::find_by_id(id).one(conn).await?)
}

pub async fn list<C: ConnectionTrait>(conn: &C, status: i32, limit: u64, offset: u64) -> Result<Vec<crop::Model>, ServiceError> {
    let rows = crop::Entity::find()
        .filter(crop::Column::Status.eq(status))
        .order_by_asc(crop::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;
    Ok(rows)
}

/// Write only the provided fields and refresh `updated_at`.
pub async fn update<C: ConnectionTrait>(conn: &C, id: i32, input: CropUpdate, status: Option<i32>) -> Result<(), ServiceError> {
    let am = crop::ActiveModel {
        name: set_if(input.name),
        description: set_if(input.description.map(Some)),
        img: set_if(input.img.map(Some)),
        status: set_if(status),
        updated_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };
    let res = crop::Entity::update_many().set(am).filter(crop::Column::Id.eq(id)).exec(conn).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("crop"));
    }
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), ServiceError> {
    let res = crop::Entity::delete_by_id(id).exec(conn).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("crop"));
    }
    Ok(())
}
