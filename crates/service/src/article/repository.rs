use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use super::domain::ArticleUpdate;
use crate::errors::ServiceError;
use crate::workflow::set_if;
use models::{article, article_image, article_relation};

pub struct NewArticle {
    pub title: String,
    pub latin_name: Option<String>,
    pub text: Option<String>,
    pub author: Option<i64>,
    pub status: i32,
}

pub async fn insert<C: ConnectionTrait>(conn: &C, new: NewArticle) -> Result<i32, ServiceError> {
    let now = Utc::now().fixed_offset();
    let am = article::ActiveModel {
        title: Set(new.title),
        latin_name: Set(new.latin_name),
        text: Set(new.text),
        author: Set(new.author),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = article::Entity::insert(am).exec(conn).await?;
    Ok(res.last_insert_id)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<article::Model>, ServiceError> {
    Ok(article::Entity::find_by_id(id).one(conn).await?)
}

fn placed_under(column: article_relation::Column, value: i32) -> sea_orm::sea_query::SimpleExpr {
    article::Column::Id.in_subquery(
        Query::select()
            .column(article_relation::Column::ArticleId)
            .from(article_relation::Entity)
            .and_where(column.eq(value))
            .to_owned(),
    )
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    status: i32,
    crop_id: Option<i32>,
    category_id: Option<i32>,
    limit: u64,
    offset: u64,
) -> Result<Vec<article::Model>, ServiceError> {
    let mut query = article::Entity::find().filter(article::Column::Status.eq(status));
    if let Some(crop_id) = crop_id {
        query = query.filter(placed_under(article_relation::Column::CropId, crop_id));
    }
    if let Some(category_id) = category_id {
        query = query.filter(placed_under(article_relation::Column::CategoryId, category_id));
    }
    let rows = query
        .order_by_asc(article::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;
    Ok(rows)
}

pub async fn update<C: ConnectionTrait>(conn: &C, id: i32, input: &ArticleUpdate, status: Option<i32>) -> Result<(), ServiceError> {
    let am = article::ActiveModel {
        title: set_if(input.title.clone()),
        latin_name: set_if(input.latin_name.clone().map(Some)),
        text: set_if(input.text.clone().map(Some)),
        status: set_if(status),
        updated_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };
    let res = article::Entity::update_many().set(am).filter(article::Column::Id.eq(id)).exec(conn).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("article"));
    }
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), ServiceError> {
    let res = article::Entity::delete_by_id(id).exec(conn).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("article"));
    }
    Ok(())
}

/// Duplicate entries violate the `(article_id, img)` key and fail the insert.
pub async fn insert_images<C: ConnectionTrait>(conn: &C, article_id: i32, images: Vec<String>) -> Result<(), ServiceError> {
    if images.is_empty() {
        return Ok(());
    }
    let rows = images.into_iter().map(|img| article_image::ActiveModel { article_id: Set(article_id), img: Set(img) });
    article_image::Entity::insert_many(rows).exec_without_returning(conn).await?;
    Ok(())
}

/// Delete-then-insert; run inside the caller's transaction.
pub async fn replace_images<C: ConnectionTrait>(conn: &C, article_id: i32, images: Vec<String>) -> Result<(), ServiceError> {
    article_image::Entity::delete_many()
        .filter(article_image::Column::ArticleId.eq(article_id))
        .exec(conn)
        .await?;
    insert_images(conn, article_id, images).await
}

pub async fn images_for<C: ConnectionTrait>(conn: &C, article_ids: &[i32]) -> Result<HashMap<i32, Vec<String>>, ServiceError> {
    let mut by_article: HashMap<i32, Vec<String>> = HashMap::new();
    if article_ids.is_empty() {
        return Ok(by_article);
    }
    let rows = article_image::Entity::find()
        .filter(article_image::Column::ArticleId.is_in(article_ids.iter().copied()))
        .order_by_asc(article_image::Column::Img)
        .all(conn)
        .await?;
    for row in rows {
        by_article.entry(row.article_id).or_default().push(row.img);
    }
    Ok(by_article)
}
