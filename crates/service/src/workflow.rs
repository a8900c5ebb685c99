//! Collaborators shared by the crop, category and article workflows.
use std::time::Duration;
use std::sync::Arc;

use configs::PolicyConfig;
use sea_orm::{ActiveValue, DatabaseConnection, Value};

use crate::access::{AccessApi, AccessGateway, AccessPolicy};
use crate::enrich::Enricher;
use crate::errors::ServiceError;
use crate::status::{SeaOrmStatusRepository, StatusResolver};
use crate::tx::TxManager;
use crate::users::{AuthorEnricher, UserApi};

#[derive(Clone)]
pub struct WorkflowDeps {
    pub tx: TxManager,
    pub statuses: StatusResolver,
    pub access: AccessGateway,
    pub policy: AccessPolicy,
    pub enricher: Enricher,
    /// Status written when a create request names none.
    pub create_status: String,
}

impl WorkflowDeps {
    pub fn new(db: DatabaseConnection, access: Arc<dyn AccessApi>, users: Arc<dyn UserApi>, policy: &PolicyConfig) -> Self {
        let statuses = StatusResolver::new(
            Arc::new(SeaOrmStatusRepository { db: db.clone() }),
            policy.default_status.clone(),
            Duration::from_secs(policy.status_cache_ttl_secs),
        );
        let enricher = Enricher::new(statuses.clone(), AuthorEnricher::new(users), policy.strict_list_enrichment);
        Self {
            tx: TxManager::new(db),
            statuses,
            access: AccessGateway::new(access),
            policy: AccessPolicy::from_config(policy),
            enricher,
            create_status: policy.create_status.clone(),
        }
    }

    pub fn db(&self) -> &DatabaseConnection { self.tx.db() }

    /// Resolve the target status of a create, then authorize at the level that
    /// status demands. Returns the status id to store.
    pub async fn authorize_create(&self, token: &str, status: Option<&str>) -> Result<i32, ServiceError> {
        let label = status.unwrap_or(&self.create_status);
        let status_id = self.statuses.resolve(label).await?;
        self.access.authorize(token, self.policy.level_for_status(label)).await?;
        Ok(status_id)
    }

    /// Updates always need moderation; a new status label is resolved afterwards.
    pub async fn authorize_update(&self, token: &str, status: Option<&str>) -> Result<Option<i32>, ServiceError> {
        self.access.authorize(token, AccessPolicy::MODERATE).await?;
        match status {
            Some(label) => Ok(Some(self.statuses.resolve(label).await?)),
            None => Ok(None),
        }
    }
}

/// `Set` for provided fields, `NotSet` for omitted ones.
pub(crate) fn set_if<T: Into<Value>>(value: Option<T>) -> ActiveValue<T> {
    match value {
        Some(v) => ActiveValue::Set(v),
        None => ActiveValue::NotSet,
    }
}
