use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::PolicyConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use service::access::{api::mock::MockAccessApi, AccessLevel};
use service::auth::api::mock::MockAuthApi;
use service::users::api::mock::MockUserApi;
use tower::ServiceExt;

use server::routes::{self, auth::ServerState};

pub const USER_TOKEN: &str = "user-token";
pub const MOD_TOKEN: &str = "mod-token";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

pub async fn build_app() -> anyhow::Result<Router> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;

    let access = Arc::new(
        MockAccessApi::default()
            .with_grant(USER_TOKEN, 7, AccessLevel::User)
            .with_grant(MOD_TOKEN, 1, AccessLevel::Moderator),
    );
    let users = Arc::new(MockUserApi::default().with_user(1).with_user(7));
    let state = ServerState::new(db, access, users, Arc::new(MockAuthApi::default()), &PolicyConfig::default());
    Ok(routes::build_router(state, cors()))
}

/// Send one request; `token` adds a bearer header, `body` a JSON payload.
pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header("authorization", format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&json)?))?,
        None => req.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}
