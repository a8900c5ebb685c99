use std::sync::Arc;

use tracing::warn;

use super::api::UserApi;
use super::domain::AuthorSnapshot;
use crate::errors::ServiceError;

/// Resolves an entity's author id into a profile snapshot.
#[derive(Clone)]
pub struct AuthorEnricher {
    api: Arc<dyn UserApi>,
}

impl AuthorEnricher {
    pub fn new(api: Arc<dyn UserApi>) -> Self { Self { api } }

    pub async fn fetch(&self, author_id: i64) -> Result<AuthorSnapshot, ServiceError> {
        self.api.get_by_id(author_id).await.map_err(|e| {
            warn!(author_id, error = %e, "author_lookup_failed");
            ServiceError::NotFound(format!("author {author_id} not found"))
        })
    }

    /// `None` means the entity has no author; no remote call is made.
    pub async fn fetch_optional(&self, author_id: Option<i64>) -> Result<Option<AuthorSnapshot>, ServiceError> {
        match author_id {
            Some(id) => self.fetch(id).await.map(Some),
            None => Ok(None),
        }
    }
}
