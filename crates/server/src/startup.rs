use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth::ServerState};
use service::clients::{HttpAuthClient, HttpUserClient};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Load `.env`, then the validated application config.
pub fn load_config() -> anyhow::Result<AppConfig> {
    dotenv().ok();
    AppConfig::load_and_validate()
}

/// Wire the database, remote clients and services into a router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations_applied");
    }

    let auth_client = Arc::new(HttpAuthClient::new(&cfg.auth_service)?);
    let user_client = Arc::new(HttpUserClient::new(&cfg.user_service)?);
    info!(auth = %cfg.auth_service.url, users = %cfg.user_service.url, "remote_clients_ready");

    let state = ServerState::new(db, auth_client.clone(), user_client, auth_client, &cfg.policy);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    init_logging_from_env();

    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
