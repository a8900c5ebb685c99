use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use common::types::{CreatedBody, StatusBody};
use service::crop::domain::{Crop, CropBody, CropFilter, CropUpdate};
use tracing::info;

use super::auth::{BearerToken, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(
    post, path = "/api/crops", tag = "crops",
    request_body = crate::openapi::CropBodyDoc,
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
    Json(body): Json<CropBody>,
) -> Result<(StatusCode, Json<CreatedBody>), JsonApiError> {
    let id = state.crops.create(&token, body).await?;
    Ok((StatusCode::CREATED, Json(CreatedBody { id })))
}

#[utoipa::path(
    get, path = "/api/crops", tag = "crops",
    params(
        ("status" = Option<String>, Query, description = "Status label, defaults to the visible status"),
        ("limit" = Option<u64>, Query, description = "Page size (1..=100)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses((status = 200, description = "List OK"), (status = 404, description = "Unknown Status"))
)]
pub async fn list(State(state): State<ServerState>, Query(filter): Query<CropFilter>) -> Result<Json<Vec<Crop>>, JsonApiError> {
    let crops = state.crops.get_all(filter).await?;
    info!(count = crops.len(), "list crops");
    Ok(Json(crops))
}

#[utoipa::path(
    get, path = "/api/crops/{crop_id}", tag = "crops",
    params(("crop_id" = i32, Path, description = "Crop ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(crop_id): Path<i32>) -> Result<Json<Crop>, JsonApiError> {
    Ok(Json(state.crops.get_by_id(crop_id).await?))
}

#[utoipa::path(
    patch, path = "/api/crops/{crop_id}", tag = "crops",
    params(("crop_id" = i32, Path, description = "Crop ID")),
    request_body = crate::openapi::CropUpdateDoc,
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
    Path(crop_id): Path<i32>,
    Json(input): Json<CropUpdate>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.crops.update(&token, crop_id, input).await?;
    Ok(Json(StatusBody::ok()))
}

#[utoipa::path(
    delete, path = "/api/crops/{crop_id}", tag = "crops",
    params(("crop_id" = i32, Path, description = "Crop ID")),
    responses((status = 200, description = "Deleted"), (status = 403, description = "Access Denied"), (status = 404, description = "Not Found"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path(crop_id): Path<i32>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.crops.delete(&token, crop_id).await?;
    Ok(Json(StatusBody::ok()))
}

#[utoipa::path(
    post, path = "/api/crops/{crop_id}/categories/{category_id}", tag = "crops",
    params(("crop_id" = i32, Path, description = "Crop ID"), ("category_id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Linked"), (status = 400, description = "Already Linked Or Unknown Ids"), (status = 403, description = "Access Denied"))
)]
pub async fn link_category(
    State(state): State<ServerState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path((crop_id, category_id)): Path<(i32, i32)>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.crops.add_relation(&token, crop_id, category_id).await?;
    Ok(Json(StatusBody::ok()))
}

#[utoipa::path(
    delete, path = "/api/crops/{crop_id}/categories/{category_id}", tag = "crops",
    params(("crop_id" = i32, Path, description = "Crop ID"), ("category_id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Unlinked"), (status = 403, description = "Access Denied"))
)]
pub async fn unlink_category(
    State(state): State<ServerState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path((crop_id, category_id)): Path<(i32, i32)>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.crops.remove_relation(&token, crop_id, category_id).await?;
    Ok(Json(StatusBody::ok()))
}
