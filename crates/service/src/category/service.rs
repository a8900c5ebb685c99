use tracing::{info, instrument};

use super::domain::{Category, CategoryBody, CategoryFilter, CategoryUpdate};
use super::repository::{self, NewCategory};
use crate::access::AccessPolicy;
use crate::enrich::{Enriched, RowKey};
use crate::errors::ServiceError;
use crate::relations;
use crate::workflow::WorkflowDeps;
use models::category;

fn key(row: &category::Model) -> RowKey {
    RowKey { id: row.id, status: row.status, author: row.author }
}

fn compose(row: category::Model, e: Enriched) -> Category {
    Category {
        id: row.id,
        name: row.name,
        description: row.description,
        icon: row.icon,
        status: e.status,
        author: e.author,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[derive(Clone)]
pub struct CategoryService {
    deps: WorkflowDeps,
}

impl CategoryService {
    pub fn new(deps: WorkflowDeps) -> Self { Self { deps } }

    /// Insert the category and, when `crop_id` is given, its crop link as one unit.
    #[instrument(skip(self, token, body), fields(name = %body.name, crop_id = ?body.crop_id))]
    pub async fn create(&self, token: &str, body: CategoryBody) -> Result<i32, ServiceError> {
        let status = self.deps.authorize_create(token, body.status.as_deref()).await?;
        body.validate()?;
        let crop_id = body.crop_id;
        let new = NewCategory {
            name: body.name,
            description: body.description,
            icon: body.icon,
            author: body.author,
            status,
        };
        let id = self
            .deps
            .tx
            .run_atomic(move |txn| {
                Box::pin(async move {
                    let id = repository::insert(txn, new).await?;
                    if let Some(crop_id) = crop_id {
                        relations::link_crop_category(txn, crop_id, id).await?;
                    }
                    Ok::<_, ServiceError>(id)
                })
            })
            .await?;
        info!(category_id = id, status, "category_created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self, filter: CategoryFilter) -> Result<Vec<Category>, ServiceError> {
        let status = self.deps.statuses.resolve_or_default(filter.status.as_deref()).await?;
        let (limit, offset) = filter.page().normalize();
        let rows = repository::list(self.deps.db(), status, filter.crop_id, limit, offset).await?;
        self.deps.enricher.list(rows, key, compose).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Category, ServiceError> {
        let row = repository::find_by_id(self.deps.db(), id)
            .await?
            .ok_or_else(|| ServiceError::not_found("category"))?;
        let enriched = self.deps.enricher.detail(key(&row)).await?;
        Ok(compose(row, enriched))
    }

    #[instrument(skip(self, token, input))]
    pub async fn update(&self, token: &str, id: i32, input: CategoryUpdate) -> Result<(), ServiceError> {
        if input.is_empty() {
            return Err(ServiceError::InvalidArguments("empty update input".into()));
        }
        let status = self.deps.authorize_update(token, input.status.as_deref()).await?;
        input.validate()?;
        repository::update(self.deps.db(), id, input, status).await?;
        info!(category_id = id, "category_updated");
        Ok(())
    }

    /// Removes the category row only. Its crop links and article placements go with it
    /// through the schema's `ON DELETE CASCADE`; nothing here deletes them explicitly.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: i32) -> Result<(), ServiceError> {
        self.deps.access.authorize(token, AccessPolicy::MODERATE).await?;
        repository::delete(self.deps.db(), id).await?;
        info!(category_id = id, "category_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::RelationManager;
    use crate::test_support::{harness, MOD_TOKEN, USER_TOKEN};
    use sea_orm::{EntityTrait, PaginatorTrait};

    fn body(name: &str, status: Option<&str>, crop_id: Option<i32>) -> CategoryBody {
        CategoryBody {
            name: name.into(),
            description: None,
            icon: None,
            status: status.map(Into::into),
            author: None,
            crop_id,
        }
    }

    #[tokio::test]
    async fn create_with_crop_link_is_atomic() {
        let h = harness().await;
        let svc = CategoryService::new(h.deps.clone());
        let crop_id = h.seed_crop("Tomato").await;

        svc.create(USER_TOKEN, body("Pests", None, Some(crop_id))).await.unwrap();
        assert_eq!(models::crop_category::Entity::find().count(&h.db).await.unwrap(), 1);

        // link to a missing crop fails after the category insert; nothing survives
        let err = svc.create(USER_TOKEN, body("Diseases", None, Some(999))).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArguments(_)));
        assert_eq!(category::Entity::find().count(&h.db).await.unwrap(), 1);
        assert_eq!(models::crop_category::Entity::find().count(&h.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn listing_by_crop_uses_default_status() {
        let h = harness().await;
        let svc = CategoryService::new(h.deps.clone());
        let relations = RelationManager::new(h.db.clone());
        let tomato = h.seed_crop("Tomato").await;
        let potato = h.seed_crop("Potato").await;

        svc.create(MOD_TOKEN, body("Pests", Some("published"), Some(tomato))).await.unwrap();
        svc.create(USER_TOKEN, body("Diseases", Some("pending"), Some(tomato))).await.unwrap();
        let soil = svc.create(MOD_TOKEN, body("Soil", Some("published"), Some(potato))).await.unwrap();
        relations.link(tomato, soil).await.unwrap();
        svc.create(MOD_TOKEN, body("Harvest", Some("published"), None)).await.unwrap();

        let filter = CategoryFilter { crop_id: Some(tomato), ..Default::default() };
        let names: Vec<_> = svc.get_all(filter).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Pests", "Soil"]);

        let all = svc.get_all(CategoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn denied_writes_change_nothing() {
        let h = harness().await;
        let svc = CategoryService::new(h.deps.clone());
        let id = svc.create(USER_TOKEN, body("Pests", None, None)).await.unwrap();

        let upd = CategoryUpdate { name: Some("Bugs".into()), ..Default::default() };
        assert!(matches!(svc.update(USER_TOKEN, id, upd).await, Err(ServiceError::AccessDenied(_))));
        assert!(matches!(svc.delete(USER_TOKEN, id).await, Err(ServiceError::AccessDenied(_))));
        let stored = svc.get_by_id(id).await.unwrap();
        assert_eq!(stored.name, "Pests");
        assert_eq!(stored.status, "pending");
    }

    #[tokio::test]
    async fn delete_cascades_links() {
        let h = harness().await;
        let svc = CategoryService::new(h.deps.clone());
        let crop_id = h.seed_crop("Tomato").await;
        let id = svc.create(USER_TOKEN, body("Pests", None, Some(crop_id))).await.unwrap();
        svc.delete(MOD_TOKEN, id).await.unwrap();
        assert_eq!(models::crop_category::Entity::find().count(&h.db).await.unwrap(), 0);
        assert!(matches!(svc.update(MOD_TOKEN, id, CategoryUpdate { icon: Some("https://x.io/i.png".into()), ..Default::default() }).await, Err(ServiceError::NotFound(_))));
    }
}
