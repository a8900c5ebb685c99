//! Client for the user service.
use async_trait::async_trait;
use configs::RemoteServiceConfig;
use reqwest::StatusCode;

use super::{build_http_client, send_with_retry, unexpected, ClientError, RetryPolicy};
use crate::users::{AuthorSnapshot, UserApi, UserPatch};

const SERVICE: &str = "users";

#[derive(Clone)]
pub struct HttpUserClient {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl HttpUserClient {
    pub fn new(cfg: &RemoteServiceConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(cfg)?,
            url: cfg.url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::from_config(cfg),
        })
    }
}

#[async_trait]
impl UserApi for HttpUserClient {
    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, user_id: i64) -> Result<AuthorSnapshot, ClientError> {
        let url = format!("{}/user/v1/{}", self.url, user_id);
        let res = send_with_retry(&self.retry, || self.client.get(&url)).await?;
        match res.status() {
            StatusCode::OK => {
                tracing::trace!("user profile retrieved");
                Ok(res.json::<AuthorSnapshot>().await?)
            }
            StatusCode::NOT_FOUND => Err(ClientError::Status(404)),
            _ => Err(unexpected(res, SERVICE).await),
        }
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update(&self, user_id: i64, patch: &UserPatch) -> Result<(), ClientError> {
        let url = format!("{}/user/v1/{}", self.url, user_id);
        let res = send_with_retry(&self.retry, || self.client.patch(&url).json(patch)).await?;
        if res.status().is_success() {
            return Ok(());
        }
        Err(unexpected(res, SERVICE).await)
    }
}
