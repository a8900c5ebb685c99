use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use common::types::{CreatedBody, StatusBody};
use service::category::domain::{Category, CategoryBody, CategoryFilter, CategoryUpdate};
use tracing::info;

use super::auth::{BearerToken, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(
    post, path = "/api/categories", tag = "categories",
    request_body = crate::openapi::CategoryBodyDoc,
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
    Json(body): Json<CategoryBody>,
) -> Result<(StatusCode, Json<CreatedBody>), JsonApiError> {
    let id = state.categories.create(&token, body).await?;
    Ok((StatusCode::CREATED, Json(CreatedBody { id })))
}

#[utoipa::path(
    get, path = "/api/categories", tag = "categories",
    params(
        ("status" = Option<String>, Query, description = "Status label, defaults to the visible status"),
        ("crop_id" = Option<i32>, Query, description = "Only categories linked to this crop"),
        ("limit" = Option<u64>, Query, description = "Page size (1..=100)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses((status = 200, description = "List OK"), (status = 404, description = "Unknown Status"))
)]
pub async fn list(State(state): State<ServerState>, Query(filter): Query<CategoryFilter>) -> Result<Json<Vec<Category>>, JsonApiError> {
    let categories = state.categories.get_all(filter).await?;
    info!(count = categories.len(), "list categories");
    Ok(Json(categories))
}

#[utoipa::path(
    get, path = "/api/categories/{category_id}", tag = "categories",
    params(("category_id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(category_id): Path<i32>) -> Result<Json<Category>, JsonApiError> {
    Ok(Json(state.categories.get_by_id(category_id).await?))
}

#[utoipa::path(
    patch, path = "/api/categories/{category_id}", tag = "categories",
    params(("category_id" = i32, Path, description = "Category ID")),
    request_body = crate::openapi::CategoryUpdateDoc,
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
    Path(category_id): Path<i32>,
    Json(input): Json<CategoryUpdate>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.categories.update(&token, category_id, input).await?;
    Ok(Json(StatusBody::ok()))
}

#[utoipa::path(
    delete, path = "/api/categories/{category_id}", tag = "categories",
    params(("category_id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Deleted"), (status = 403, description = "Access Denied"), (status = 404, description = "Not Found"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path(category_id): Path<i32>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.categories.delete(&token, category_id).await?;
    Ok(Json(StatusBody::ok()))
}
