//! Transactional write coordinator.
//!
//! One call to [`TxManager::run_atomic`] is one relational unit of work: every
//! repository call made through the supplied transaction commits together or not at all.
use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbBackend, IsolationLevel, TransactionTrait, ConnectionTrait};
use tracing::{debug, warn};

use crate::errors::ServiceError;

#[derive(Clone)]
pub struct TxManager {
    db: DatabaseConnection,
}

impl TxManager {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    pub fn db(&self) -> &DatabaseConnection { &self.db }

    /// Run `f` inside a Read-Committed transaction.
    ///
    /// Any `Err` returned by `f` rolls back every write made through the transaction.
    /// Dropping the returned future before completion also rolls back.
    pub async fn run_atomic<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, ServiceError>> + Send,
    {
        // SQLite has no per-transaction isolation setting
        let isolation = match self.db.get_database_backend() {
            DbBackend::Sqlite => None,
            _ => Some(IsolationLevel::ReadCommitted),
        };
        let txn = self.db.begin_with_config(isolation, None).await?;
        let result = f(&txn).await;
        match result {
            Ok(value) => {
                txn.commit().await?;
                debug!("tx_committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rb) = txn.rollback().await {
                    warn!(error = %rb, "tx_rollback_failed");
                }
                debug!(code = err.code(), "tx_rolled_back");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use chrono::Utc;
    use models::crop;
    use sea_orm::{EntityTrait, PaginatorTrait, Set};

    fn tomato() -> crop::ActiveModel {
        let now = Utc::now().fixed_offset();
        crop::ActiveModel {
            name: Set("Tomato".into()),
            status: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn commits_on_ok() {
        let tx = TxManager::new(memory_db().await);
        let id = tx
            .run_atomic(|txn| {
                Box::pin(async move {
                    let res = crop::Entity::insert(tomato()).exec(txn).await?;
                    Ok::<_, ServiceError>(res.last_insert_id)
                })
            })
            .await
            .unwrap();
        assert!(crop::Entity::find_by_id(id).one(tx.db()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rolls_back_on_err() {
        let tx = TxManager::new(memory_db().await);
        let err = tx
            .run_atomic(|txn| {
                Box::pin(async move {
                    crop::Entity::insert(tomato()).exec(txn).await?;
                    Err::<(), _>(ServiceError::InvalidArguments("second step failed".into()))
                })
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArguments(_)));
        assert_eq!(crop::Entity::find().count(tx.db()).await.unwrap(), 0);
    }
}
