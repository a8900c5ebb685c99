//! Client for the auth/access service.
use async_trait::async_trait;
use configs::RemoteServiceConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{build_http_client, send_with_retry, unexpected, ClientError, RetryPolicy};
use crate::access::{AccessApi, AccessLevel};
use crate::auth::AuthApi;

const SERVICE: &str = "auth";

#[derive(Serialize)]
struct RefreshTokenBody<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct RefreshTokenResponse {
    refresh_token: String,
}

#[derive(Serialize)]
struct CheckBody {
    required_lvl: u32,
}

#[derive(Serialize)]
struct IsUserBody {
    user_id: i64,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct RegisterResponse {
    user_id: i64,
}

#[derive(Clone)]
pub struct HttpAuthClient {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl HttpAuthClient {
    pub fn new(cfg: &RemoteServiceConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(cfg)?,
            url: cfg.url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::from_config(cfg),
        })
    }

    async fn post_json<B: Serialize>(&self, path: &str, bearer: Option<&str>, body: &B) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.url, path);
        send_with_retry(&self.retry, || {
            let req = self.client.post(&url).json(body);
            match bearer {
                Some(token) => req.bearer_auth(token),
                None => req,
            }
        })
        .await
    }
}

#[async_trait]
impl AccessApi for HttpAuthClient {
    #[tracing::instrument(skip_all)]
    async fn exchange_token(&self, refresh_token: &str) -> Result<String, ClientError> {
        let res = self.post_json("/auth/v1/access-token", None, &RefreshTokenBody { refresh_token }).await?;
        if res.status().is_success() {
            let body: AccessTokenResponse = res.json().await?;
            return Ok(body.access_token);
        }
        Err(unexpected(res, SERVICE).await)
    }

    #[tracing::instrument(skip(self, access_token))]
    async fn check(&self, access_token: &str, level: AccessLevel) -> Result<bool, ClientError> {
        let res = self
            .post_json("/access/v1/check", Some(access_token), &CheckBody { required_lvl: level.as_u32() })
            .await?;
        match res.status() {
            s if s.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            _ => Err(unexpected(res, SERVICE).await),
        }
    }

    #[tracing::instrument(skip(self, refresh_token))]
    async fn is_user(&self, refresh_token: &str, user_id: i64) -> Result<bool, ClientError> {
        let res = self.post_json("/auth/v1/is-user", Some(refresh_token), &IsUserBody { user_id }).await?;
        match res.status() {
            s if s.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(false),
            _ => Err(unexpected(res, SERVICE).await),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    #[tracing::instrument(skip(self, password))]
    async fn register(&self, email: &str, password: &str) -> Result<i64, ClientError> {
        let res = self.post_json("/auth/v1/register", None, &CredentialsBody { email, password }).await?;
        if res.status().is_success() {
            let body: RegisterResponse = res.json().await?;
            return Ok(body.user_id);
        }
        Err(unexpected(res, SERVICE).await)
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let res = self.post_json("/auth/v1/login", None, &CredentialsBody { email, password }).await?;
        if res.status().is_success() {
            let body: RefreshTokenResponse = res.json().await?;
            return Ok(body.refresh_token);
        }
        Err(unexpected(res, SERVICE).await)
    }

    #[tracing::instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<String, ClientError> {
        let res = self.post_json("/auth/v1/refresh-token", None, &RefreshTokenBody { refresh_token }).await?;
        if res.status().is_success() {
            let body: RefreshTokenResponse = res.json().await?;
            return Ok(body.refresh_token);
        }
        Err(unexpected(res, SERVICE).await)
    }
}
