use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use configs::PolicyConfig;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use service::{
    access::{AccessApi, AccessGateway},
    auth::{
        domain::{Credentials, Registered, Session},
        AuthApi, AuthService,
    },
    users::{UserApi, UserService},
    workflow::WorkflowDeps,
    article::ArticleService,
    category::CategoryService,
    crop::CropService,
};
use tracing::warn;

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub crops: CropService,
    pub categories: CategoryService,
    pub articles: ArticleService,
    pub users: UserService,
    pub auth: AuthService,
}

impl ServerState {
    pub fn new(
        db: DatabaseConnection,
        access: Arc<dyn AccessApi>,
        users: Arc<dyn UserApi>,
        auth: Arc<dyn AuthApi>,
        policy: &PolicyConfig,
    ) -> Self {
        let deps = WorkflowDeps::new(db, access.clone(), users.clone(), policy);
        Self {
            crops: CropService::new(deps.clone()),
            categories: CategoryService::new(deps.clone()),
            articles: ArticleService::new(deps),
            users: UserService::new(users, AccessGateway::new(access)),
            auth: AuthService::new(auth),
        }
    }
}

/// Caller token taken from `Authorization: Bearer <token>`.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

/// Reject mutating requests without a well-formed bearer header before any
/// workflow runs; otherwise stash the token for the handler.
pub async fn require_bearer(mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = match header.and_then(|h| h.strip_prefix("Bearer ")).map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        Some(_) | None => {
            warn!(path = %req.uri().path(), has_header = header.is_some(), "missing or malformed bearer token");
            return Err(JsonApiError::unauthorized("expected Authorization: Bearer <token>"));
        }
    };
    req.extensions_mut().insert(BearerToken(token));
    Ok(next.run(req).await)
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::CredentialsDoc, responses((status = 200, description = "Registered"), (status = 400, description = "Invalid Arguments")))]
pub async fn register(State(state): State<ServerState>, Json(input): Json<Credentials>) -> Result<Json<Registered>, JsonApiError> {
    Ok(Json(state.auth.register(input).await?))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::CredentialsDoc, responses((status = 200, description = "Logged In"), (status = 403, description = "Access Denied")))]
pub async fn login(State(state): State<ServerState>, Json(input): Json<Credentials>) -> Result<Json<Session>, JsonApiError> {
    Ok(Json(state.auth.login(input).await?))
}

#[utoipa::path(post, path = "/api/auth/refresh", tag = "auth", request_body = crate::openapi::RefreshRequestDoc, responses((status = 200, description = "Refreshed"), (status = 403, description = "Access Denied")))]
pub async fn refresh(State(state): State<ServerState>, Json(input): Json<RefreshRequest>) -> Result<Json<Session>, JsonApiError> {
    Ok(Json(state.auth.refresh(&input.refresh_token).await?))
}
