//! Read-side enrichment: status label and author snapshot per row.
use futures::future::join_all;
use tracing::warn;

use crate::errors::ServiceError;
use crate::status::StatusResolver;
use crate::users::{AuthorEnricher, AuthorSnapshot};

/// What enrichment needs to know about a stored row.
#[derive(Clone, Copy, Debug)]
pub struct RowKey {
    pub id: i32,
    pub status: i32,
    pub author: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enriched {
    pub status: String,
    pub author: Option<AuthorSnapshot>,
}

#[derive(Clone)]
pub struct Enricher {
    statuses: StatusResolver,
    authors: AuthorEnricher,
    strict: bool,
}

impl Enricher {
    /// With `strict` set, one failing row fails the whole listing instead of being dropped.
    pub fn new(statuses: StatusResolver, authors: AuthorEnricher, strict: bool) -> Self {
        Self { statuses, authors, strict }
    }

    /// Single-item enrichment; every failure propagates.
    pub async fn detail(&self, key: RowKey) -> Result<Enriched, ServiceError> {
        let status = self.statuses.label_of(key.status).await?;
        let author = self.authors.fetch_optional(key.author).await?;
        Ok(Enriched { status, author })
    }

    /// Enrich every row concurrently, keeping input order.
    pub async fn list<T, O>(
        &self,
        rows: Vec<T>,
        key: impl Fn(&T) -> RowKey,
        build: impl Fn(T, Enriched) -> O,
    ) -> Result<Vec<O>, ServiceError> {
        let keys: Vec<RowKey> = rows.iter().map(&key).collect();
        let results = join_all(keys.iter().map(|k| self.detail(*k))).await;

        let mut out = Vec::with_capacity(rows.len());
        for ((row, k), res) in rows.into_iter().zip(keys).zip(results) {
            match res {
                Ok(enriched) => out.push(build(row, enriched)),
                Err(err) if self.strict => return Err(err),
                Err(err) => warn!(id = k.id, error = %err, "row_dropped_from_listing"),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::repository::mock::MockStatusRepository;
    use crate::users::api::mock::MockUserApi;
    use std::sync::Arc;
    use std::time::Duration;

    fn enricher(strict: bool) -> (Enricher, Arc<MockStatusRepository>, Arc<MockUserApi>) {
        let statuses = Arc::new(MockStatusRepository::new(&["published", "pending", "rejected"]));
        let users = Arc::new(MockUserApi::default().with_user(7));
        let resolver = StatusResolver::new(statuses.clone(), "published", Duration::from_secs(60));
        let e = Enricher::new(resolver, AuthorEnricher::new(users.clone()), strict);
        (e, statuses, users)
    }

    fn rows() -> Vec<RowKey> {
        vec![
            RowKey { id: 10, status: 1, author: Some(7) },
            RowKey { id: 20, status: 2, author: None },
            RowKey { id: 30, status: 3, author: None },
        ]
    }

    #[tokio::test]
    async fn listing_keeps_order_and_attaches_authors() {
        let (e, _, _) = enricher(false);
        let out = e.list(rows(), |k| *k, |k, en| (k.id, en)).await.unwrap();
        let ids: Vec<i32> = out.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
        assert_eq!(out[0].1.status, "published");
        assert_eq!(out[0].1.author.as_ref().map(|a| a.id), Some(7));
        assert_eq!(out[2].1.author, None);
    }

    #[tokio::test]
    async fn failing_status_lookup_drops_only_that_row() {
        let (e, statuses, _) = enricher(false);
        statuses.fail_for(2);
        let out = e.list(rows(), |k| *k, |k, en| (k.id, en.status)).await.unwrap();
        assert_eq!(out, vec![(10, "published".to_string()), (30, "rejected".to_string())]);

        let err = e.detail(rows()[1]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[tokio::test]
    async fn failing_author_lookup_drops_the_row_and_fails_detail() {
        let (e, _, users) = enricher(false);
        users.fail_for(7);
        let out = e.list(rows(), |k| *k, |k, _| k.id).await.unwrap();
        assert_eq!(out, vec![20, 30]);
        assert!(e.detail(rows()[0]).await.is_err());
    }

    #[tokio::test]
    async fn strict_listing_fails_as_a_whole() {
        let (e, statuses, _) = enricher(true);
        statuses.fail_for(3);
        let res = e.list(rows(), |k| *k, |k, _| k.id).await;
        assert!(matches!(res, Err(ServiceError::Internal(_))));
    }
}
