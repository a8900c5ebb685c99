use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::errors::ServiceError;
use models::entity_status;

/// Read-only access to the status lookup table.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn find_by_label(&self, label: &str) -> Result<Option<i32>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<String>, ServiceError>;
}

pub struct SeaOrmStatusRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StatusRepository for SeaOrmStatusRepository {
    async fn find_by_label(&self, label: &str) -> Result<Option<i32>, ServiceError> {
        let row = entity_status::Entity::find()
            .filter(entity_status::Column::Status.eq(label))
            .one(&self.db)
            .await?;
        Ok(row.map(|s| s.id))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<String>, ServiceError> {
        let row = entity_status::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(|s| s.status))
    }
}

/// Simple in-memory status table for tests
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, PoisonError};

    pub struct MockStatusRepository {
        rows: Vec<(i32, String)>,
        failing: Mutex<HashSet<i32>>,
        queries: AtomicUsize,
    }

    impl MockStatusRepository {
        pub fn new(labels: &[&str]) -> Self {
            let rows = labels.iter().enumerate().map(|(i, l)| (i as i32 + 1, l.to_string())).collect();
            Self { rows, failing: Mutex::new(HashSet::new()), queries: AtomicUsize::new(0) }
        }

        /// Lookups of status `id` fail with a database error from now on.
        pub fn fail_for(&self, id: i32) {
            self.failing.lock().unwrap_or_else(PoisonError::into_inner).insert(id);
        }

        pub fn queries(&self) -> usize { self.queries.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl StatusRepository for MockStatusRepository {
        async fn find_by_label(&self, label: &str) -> Result<Option<i32>, ServiceError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.iter().find(|(_, l)| l == label).map(|(id, _)| *id))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<String>, ServiceError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            if self.failing.lock().unwrap_or_else(PoisonError::into_inner).contains(&id) {
                return Err(ServiceError::Internal(format!("status {id} lookup failed")));
            }
            Ok(self.rows.iter().find(|(i, _)| *i == id).map(|(_, l)| l.clone()))
        }
    }
}
