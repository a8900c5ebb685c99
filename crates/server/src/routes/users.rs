use axum::{
    extract::{Path, State},
    Extension, Json,
};
use common::types::StatusBody;
use service::users::{AuthorSnapshot, UserPatch};

use super::auth::{BearerToken, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(
    get, path = "/api/users/{user_id}", tag = "users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(user_id): Path<i64>) -> Result<Json<AuthorSnapshot>, JsonApiError> {
    Ok(Json(state.users.get_by_id(user_id).await?))
}

#[utoipa::path(
    patch, path = "/api/users/{user_id}", tag = "users",
    params(("user_id" = i64, Path, description = "User ID")),
    request_body = crate::openapi::UserPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid Arguments"),
        (status = 403, description = "Access Denied")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path(user_id): Path<i64>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.users.update(&token, user_id, patch).await?;
    Ok(Json(StatusBody::ok()))
}
