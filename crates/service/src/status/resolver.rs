use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use super::repository::StatusRepository;
use crate::errors::ServiceError;

const CACHE_CAPACITY: u64 = 1_024;

/// Maps status labels to ids and back.
///
/// Labels are unique and ids are never reused, so cached entries cannot go stale;
/// the TTL only bounds memory for rarely used labels. Misses are not cached.
#[derive(Clone)]
pub struct StatusResolver {
    repo: Arc<dyn StatusRepository>,
    default_label: String,
    by_label: Cache<String, i32>,
    by_id: Cache<i32, String>,
}

impl StatusResolver {
    pub fn new(repo: Arc<dyn StatusRepository>, default_label: impl Into<String>, ttl: Duration) -> Self {
        Self {
            repo,
            default_label: default_label.into(),
            by_label: Cache::builder().max_capacity(CACHE_CAPACITY).time_to_live(ttl).build(),
            by_id: Cache::builder().max_capacity(CACHE_CAPACITY).time_to_live(ttl).build(),
        }
    }

    pub async fn resolve(&self, label: &str) -> Result<i32, ServiceError> {
        if let Some(id) = self.by_label.get(label).await {
            return Ok(id);
        }
        let id = self
            .repo
            .find_by_label(label)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("status '{label}' not found")))?;
        debug!(label, id, "status_resolved");
        self.remember(id, label.to_string()).await;
        Ok(id)
    }

    /// Id of the status listed when a read names none.
    pub async fn default_id(&self) -> Result<i32, ServiceError> {
        self.resolve(&self.default_label).await
    }

    /// Explicit label when given, otherwise the default-visible status.
    pub async fn resolve_or_default(&self, label: Option<&str>) -> Result<i32, ServiceError> {
        match label {
            Some(l) => self.resolve(l).await,
            None => self.default_id().await,
        }
    }

    pub async fn label_of(&self, id: i32) -> Result<String, ServiceError> {
        if let Some(label) = self.by_id.get(&id).await {
            return Ok(label);
        }
        let label = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("status {id} not found")))?;
        self.remember(id, label.clone()).await;
        Ok(label)
    }

    async fn remember(&self, id: i32, label: String) {
        self.by_id.insert(id, label.clone()).await;
        self.by_label.insert(label, id).await;
    }
}
