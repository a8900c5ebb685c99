use std::sync::Arc;

use tracing::{error, info, instrument};

use super::api::AuthApi;
use super::domain::{Credentials, Registered, Session};
use crate::clients::ClientError;
use crate::errors::ServiceError;

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn AuthApi>,
}

fn validate(input: &Credentials) -> Result<(), ServiceError> {
    if !input.email.contains('@') {
        return Err(ServiceError::InvalidArguments("invalid email".into()));
    }
    if input.password.is_empty() {
        return Err(ServiceError::InvalidArguments("password required".into()));
    }
    Ok(())
}

/// Rejections map to `rejected`; anything else is an upstream failure.
fn map_remote(e: ClientError, rejected: fn(String) -> ServiceError) -> ServiceError {
    if e.is_rejection() {
        rejected(e.to_string())
    } else {
        error!(error = %e, "auth_service_call_failed");
        ServiceError::Internal("auth service unavailable".into())
    }
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>) -> Self { Self { api } }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: Credentials) -> Result<Registered, ServiceError> {
        validate(&input)?;
        let user_id = self
            .api
            .register(&input.email, &input.password)
            .await
            .map_err(|e| map_remote(e, ServiceError::InvalidArguments))?;
        info!(user_id, "user_registered");
        Ok(Registered { user_id })
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: Credentials) -> Result<Session, ServiceError> {
        validate(&input)?;
        let refresh_token = self
            .api
            .login(&input.email, &input.password)
            .await
            .map_err(|e| map_remote(e, ServiceError::AccessDenied))?;
        Ok(Session { refresh_token })
    }

    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, ServiceError> {
        if refresh_token.trim().is_empty() {
            return Err(ServiceError::AccessDenied("missing refresh token".into()));
        }
        let refresh_token = self
            .api
            .refresh(refresh_token)
            .await
            .map_err(|e| map_remote(e, ServiceError::AccessDenied))?;
        Ok(Session { refresh_token })
    }
}
