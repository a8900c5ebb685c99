//! JSON-over-HTTP clients for the auth/access and user services.

pub mod auth;
pub mod error;
pub mod retry;
pub mod users;

use std::time::Duration;

use configs::RemoteServiceConfig;

pub use auth::HttpAuthClient;
pub use error::ClientError;
pub use retry::RetryPolicy;
pub use users::HttpUserClient;

fn build_http_client(cfg: &RemoteServiceConfig) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()
        .map_err(|e| ClientError::Transport(e.to_string()))
}

/// Send the request produced by `build`, retrying transient failures under `policy`.
///
/// Gateway-class statuses (502/503/504) are treated as transient; every other
/// response is handed back for the caller to interpret.
async fn send_with_retry<F>(policy: &RetryPolicy, build: F) -> Result<reqwest::Response, ClientError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let build = &build;
    retry::retry_with_policy(policy, move || async move {
        match build().send().await {
            Ok(res) if matches!(res.status().as_u16(), 502..=504) => Err(ClientError::Status(res.status().as_u16())),
            Ok(res) => Ok(res),
            Err(e) => Err(ClientError::from(e)),
        }
    })
    .await
}

/// Read a non-2xx body for logging and turn it into `ClientError::Status`.
async fn unexpected(res: reqwest::Response, service: &'static str) -> ClientError {
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    tracing::error!(body = %body, status = %status, service, "unexpected response from remote service");
    ClientError::Status(status.as_u16())
}
