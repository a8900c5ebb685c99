use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use common::types::{CreatedBody, StatusBody};
use serde::Deserialize;
use service::article::domain::{Article, ArticleBody, ArticleFilter, ArticleUpdate};
use tracing::info;

use super::auth::{BearerToken, ServerState};
use crate::errors::JsonApiError;

/// Article body plus the (crop, category) placement it is filed under.
#[derive(Debug, Deserialize)]
pub struct CreateArticleInput {
    pub crop_id: i32,
    pub category_id: i32,
    #[serde(flatten)]
    pub article: ArticleBody,
}

#[utoipa::path(
    post, path = "/api/articles", tag = "articles",
    request_body = crate::openapi::CreateArticleInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid Arguments"),
        (status = 401, description = "Missing Bearer Token"),
        (status = 403, description = "Access Denied")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Json(input): Json<CreateArticleInput>,
) -> Result<(StatusCode, Json<CreatedBody>), JsonApiError> {
    let id = state.articles.create(&token, input.crop_id, input.category_id, input.article).await?;
    Ok((StatusCode::CREATED, Json(CreatedBody { id })))
}

#[utoipa::path(
    get, path = "/api/articles", tag = "articles",
    params(
        ("status" = Option<String>, Query, description = "Status label, defaults to the visible status"),
        ("crop_id" = Option<i32>, Query, description = "Only articles placed under this crop"),
        ("category_id" = Option<i32>, Query, description = "Only articles placed under this category"),
        ("limit" = Option<u64>, Query, description = "Page size (1..=100)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses((status = 200, description = "List OK"), (status = 404, description = "Unknown Status"))
)]
pub async fn list(State(state): State<ServerState>, Query(filter): Query<ArticleFilter>) -> Result<Json<Vec<Article>>, JsonApiError> {
    let articles = state.articles.get_all(filter).await?;
    info!(count = articles.len(), "list articles");
    Ok(Json(articles))
}

#[utoipa::path(
    get, path = "/api/articles/{article_id}", tag = "articles",
    params(("article_id" = i32, Path, description = "Article ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(article_id): Path<i32>) -> Result<Json<Article>, JsonApiError> {
    Ok(Json(state.articles.get_by_id(article_id).await?))
}

#[utoipa::path(
    patch, path = "/api/articles/{article_id}", tag = "articles",
    params(("article_id" = i32, Path, description = "Article ID")),
    request_body = crate::openapi::ArticleUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid Arguments"),
        (status = 403, description = "Access Denied"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path(article_id): Path<i32>,
    Json(input): Json<ArticleUpdate>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.articles.update(&token, article_id, input).await?;
    Ok(Json(StatusBody::ok()))
}

#[utoipa::path(
    delete, path = "/api/articles/{article_id}", tag = "articles",
    params(("article_id" = i32, Path, description = "Article ID")),
    responses((status = 200, description = "Deleted"), (status = 403, description = "Access Denied"), (status = 404, description = "Not Found"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path(article_id): Path<i32>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.articles.delete(&token, article_id).await?;
    Ok(Json(StatusBody::ok()))
}
