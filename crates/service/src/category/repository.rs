use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use super::domain::CategoryUpdate;
use crate::errors::ServiceError;
use crate::workflow::set_if;
use models::{category, crop_category};

pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub author: Option<i64>,
    pub status: i32,
}

pub async fn insert<C: ConnectionTrait>(conn: &C, new: NewCategory) -> Result<i32, ServiceError> {
    let now = Utc::now().fixed_offset();
    let am = category::ActiveModel {
        name: Set(new.name),
        description: Set(new.description),
        icon: Set(new.icon),
        author: Set(new.author),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = category::Entity::insert(am).exec(conn).await?;
    Ok(res.last_insert_id)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<category::Model>, ServiceError> {
    Ok(category::Entity::find_by_id(id).one(conn).await?)
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    status: i32,
    crop_id: Option<i32>,
    limit: u64,
    offset: u64,
) -> Result<Vec<category::Model>, ServiceError> {
    let mut query = category::Entity::find().filter(category::Column::Status.eq(status));
    if let Some(crop_id) = crop_id {
        query = query.filter(
            category::Column::Id.in_subquery(
                Query::select()
                    .column(crop_category::Column::CategoryId)
                    .from(crop_category::Entity)
                    .and_where(crop_category::Column::CropId.eq(crop_id))
                    .to_owned(),
            ),
        );
    }
    let rows = query
        .order_by_asc(category::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;
    Ok(rows)
}

pub async fn update<C: ConnectionTrait>(conn: &C, id: i32, input: CategoryUpdate, status: Option<i32>) -> Result<(), ServiceError> {
    let am = category::ActiveModel {
        name: set_if(input.name),
        description: set_if(input.description.map(Some)),
        icon: set_if(input.icon.map(Some)),
        status: set_if(status),
        updated_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };
    let res = category::Entity::update_many().set(am).filter(category::Column::Id.eq(id)).exec(conn).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("category"));
    }
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), ServiceError> {
    let res = category::Entity::delete_by_id(id).exec(conn).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("category"));
    }
    Ok(())
}
