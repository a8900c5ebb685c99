use std::sync::Arc;

use tracing::{error, info, instrument};

use super::api::UserApi;
use super::domain::{AuthorSnapshot, UserPatch};
use crate::access::{AccessGateway, AccessPolicy};
use crate::errors::ServiceError;

/// Profile reads and updates, forwarded to the user service.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserApi>,
    access: AccessGateway,
}

impl UserService {
    pub fn new(users: Arc<dyn UserApi>, access: AccessGateway) -> Self { Self { users, access } }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, user_id: i64) -> Result<AuthorSnapshot, ServiceError> {
        self.users.get_by_id(user_id).await.map_err(|e| {
            if e.is_rejection() {
                ServiceError::not_found("user")
            } else {
                error!(error = %e, "user_lookup_failed");
                ServiceError::Internal("user service unavailable".into())
            }
        })
    }

    /// Owners may edit their own profile; changing someone else's profile or any
    /// role requires moderator access.
    #[instrument(skip(self, token, patch), fields(role_change = patch.role.is_some()))]
    pub async fn update(&self, token: &str, user_id: i64, patch: UserPatch) -> Result<(), ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::InvalidArguments("empty update input".into()));
        }
        if patch.role.is_some() || !self.access.is_user(token, user_id).await {
            self.access.authorize(token, AccessPolicy::MODERATE).await?;
        }
        self.users.update(user_id, &patch).await.map_err(|e| {
            error!(error = %e, "user_update_failed");
            ServiceError::Internal("failed to update user".into())
        })?;
        info!(user_id, "user_updated");
        Ok(())
    }
}
