pub mod articles;
pub mod auth;
pub mod categories;
pub mod crops;
pub mod users;

use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Reads and auth pass-through need no bearer token.
fn public_api() -> Router<ServerState> {
    Router::new()
        .route("/crops", get(crops::list))
        .route("/crops/:crop_id", get(crops::get))
        .route("/categories", get(categories::list))
        .route("/categories/:category_id", get(categories::get))
        .route("/articles", get(articles::list))
        .route("/articles/:article_id", get(articles::get))
        .route("/users/:user_id", get(users::get))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
}

/// Mutating routes; `require_bearer` runs before any handler.
fn protected_api() -> Router<ServerState> {
    Router::new()
        .route("/crops", post(crops::create))
        .route("/crops/:crop_id", patch(crops::update).delete(crops::delete))
        .route(
            "/crops/:crop_id/categories/:category_id",
            post(crops::link_category).delete(crops::unlink_category),
        )
        .route("/categories", post(categories::create))
        .route("/categories/:category_id", patch(categories::update).delete(categories::delete))
        .route("/articles", post(articles::create))
        .route("/articles/:article_id", patch(articles::update).delete(articles::delete))
        .route("/users/:user_id", patch(users::update))
        .route_layer(middleware::from_fn(auth::require_bearer))
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = public_api().merge(protected_api());

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
