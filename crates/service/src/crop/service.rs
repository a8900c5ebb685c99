use tracing::{info, instrument};

use super::domain::{Crop, CropBody, CropFilter, CropUpdate};
use super::repository::{self, NewCrop};
use crate::access::AccessPolicy;
use crate::enrich::{Enriched, RowKey};
use crate::errors::ServiceError;
use crate::relations::RelationManager;
use crate::workflow::WorkflowDeps;
use models::crop;

fn key(row: &crop::Model) -> RowKey {
    RowKey { id: row.id, status: row.status, author: row.author }
}

fn compose(row: crop::Model, e: Enriched) -> Crop {
    Crop {
        id: row.id,
        name: row.name,
        description: row.description,
        img: row.img,
        status: e.status,
        author: e.author,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[derive(Clone)]
pub struct CropService {
    deps: WorkflowDeps,
    relations: RelationManager,
}

impl CropService {
    pub fn new(deps: WorkflowDeps) -> Self {
        let relations = RelationManager::new(deps.db().clone());
        Self { deps, relations }
    }

    #[instrument(skip(self, token, body), fields(name = %body.name))]
    pub async fn create(&self, token: &str, body: CropBody) -> Result<i32, ServiceError> {
        let status = self.deps.authorize_create(token, body.status.as_deref()).await?;
        body.validate()?;
        let new = NewCrop {
            name: body.name,
            description: body.description,
            img: body.img,
            author: body.author,
            status,
        };
        let id = repository::insert(self.deps.db(), new).await?;
        info!(crop_id = id, status, "crop_created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self, filter: CropFilter) -> Result<Vec<Crop>, ServiceError> {
        let status = self.deps.statuses.resolve_or_default(filter.status.as_deref()).await?;
        let (limit, offset) = filter.page().normalize();
        let rows = repository::list(self.deps.db(), status, limit, offset).await?;
        self.deps.enricher.list(rows, key, compose).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Crop, ServiceError> {
        let row = repository::find_by_id(self.deps.db(), id).await?.ok_or_else(|| ServiceError::not_found("crop"))?;
        let enriched = self.deps.enricher.detail(key(&row)).await?;
        Ok(compose(row, enriched))
    }

    #[instrument(skip(self, token, input))]
    pub async fn update(&self, token: &str, id: i32, input: CropUpdate) -> Result<(), ServiceError> {
        if input.is_empty() {
            return Err(ServiceError::InvalidArguments("empty update input".into()));
        }
        let status = self.deps.authorize_update(token, input.status.as_deref()).await?;
        input.validate()?;
        repository::update(self.deps.db(), id, input, status).await?;
        info!(crop_id = id, "crop_updated");
        Ok(())
    }

    /// Removes the crop row only. Its category links and article placements go with it
    /// through the schema's `ON DELETE CASCADE`; nothing here deletes them explicitly.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: i32) -> Result<(), ServiceError> {
        self.deps.access.authorize(token, AccessPolicy::MODERATE).await?;
        repository::delete(self.deps.db(), id).await?;
        info!(crop_id = id, "crop_deleted");
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn add_relation(&self, token: &str, crop_id: i32, category_id: i32) -> Result<(), ServiceError> {
        self.deps.access.authorize(token, AccessPolicy::RELATE).await?;
        self.relations.link(crop_id, category_id).await
    }

    #[instrument(skip(self, token))]
    pub async fn remove_relation(&self, token: &str, crop_id: i32, category_id: i32) -> Result<(), ServiceError> {
        self.deps.access.authorize(token, AccessPolicy::RELATE).await?;
        self.relations.unlink(crop_id, category_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessLevel;
    use crate::test_support::{harness, harness_with, Harness, MOD_TOKEN, USER_TOKEN};
    use configs::PolicyConfig;
    use sea_orm::{EntityTrait, PaginatorTrait};

    fn body(name: &str, status: Option<&str>, author: Option<i64>) -> CropBody {
        CropBody { name: name.into(), description: None, img: None, status: status.map(Into::into), author }
    }

    async fn crop_count(h: &Harness) -> u64 {
        crop::Entity::find().count(&h.db).await.unwrap()
    }

    #[tokio::test]
    async fn pending_crop_is_self_serve_and_reads_back_enriched() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());

        let id = svc.create(USER_TOKEN, body("Tomato", Some("pending"), Some(7))).await.unwrap();
        assert_eq!(h.access.checked_levels(), vec![AccessLevel::User]);

        let crop = svc.get_by_id(id).await.unwrap();
        assert_eq!(crop.name, "Tomato");
        assert_eq!(crop.status, "pending");
        assert_eq!(crop.author.map(|a| a.id), Some(7));
    }

    #[tokio::test]
    async fn omitted_status_uses_create_default() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let id = svc.create(USER_TOKEN, body("Pepper", None, None)).await.unwrap();
        let crop = svc.get_by_id(id).await.unwrap();
        assert_eq!(crop.status, "pending");
        assert_eq!(crop.author, None);
    }

    #[tokio::test]
    async fn denied_create_writes_nothing() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let err = svc.create(USER_TOKEN, body("Tomato", Some("published"), None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));
        assert_eq!(h.access.checked_levels(), vec![AccessLevel::Moderator]);
        assert_eq!(crop_count(&h).await, 0);
    }

    #[tokio::test]
    async fn unknown_status_aborts_before_authorization() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let err = svc.create(MOD_TOKEN, body("Tomato", Some("archived"), None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(h.access.checked_levels().is_empty());
        assert_eq!(crop_count(&h).await, 0);
    }

    #[tokio::test]
    async fn duplicate_and_invalid_input() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        svc.create(MOD_TOKEN, body("Tomato", Some("published"), None)).await.unwrap();
        let dup = svc.create(MOD_TOKEN, body("Tomato", Some("published"), None)).await;
        assert!(matches!(dup, Err(ServiceError::AlreadyExists(_))));

        let blank = svc.create(MOD_TOKEN, body("  ", None, None)).await;
        assert!(matches!(blank, Err(ServiceError::InvalidArguments(_))));
        let mut bad_img = body("Onion", None, None);
        bad_img.img = Some("not a url".into());
        assert!(matches!(svc.create(MOD_TOKEN, bad_img).await, Err(ServiceError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn authorization_is_checked_before_field_validation() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let err = svc.create(USER_TOKEN, body("  ", Some("published"), None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));

        let id = svc.create(USER_TOKEN, body("Tomato", None, None)).await.unwrap();
        let blank = CropUpdate { name: Some(" ".into()), ..Default::default() };
        assert!(matches!(svc.update(USER_TOKEN, id, blank.clone()).await, Err(ServiceError::AccessDenied(_))));
        assert!(matches!(svc.update(MOD_TOKEN, id, blank).await, Err(ServiceError::InvalidArguments(_))));
        assert_eq!(crop_count(&h).await, 1);
    }

    #[tokio::test]
    async fn listing_defaults_to_published() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        svc.create(MOD_TOKEN, body("Tomato", Some("published"), None)).await.unwrap();
        svc.create(MOD_TOKEN, body("Potato", Some("published"), None)).await.unwrap();
        svc.create(USER_TOKEN, body("Carrot", Some("pending"), None)).await.unwrap();

        let published = svc.get_all(CropFilter::default()).await.unwrap();
        let names: Vec<_> = published.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Tomato", "Potato"]);
        assert!(published.iter().all(|c| c.status == "published"));

        let pending = svc.get_all(CropFilter { status: Some("pending".into()), ..Default::default() }).await.unwrap();
        assert_eq!(pending.len(), 1);

        let page = svc.get_all(CropFilter { limit: Some(1), offset: Some(1), ..Default::default() }).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Potato");
    }

    #[tokio::test]
    async fn failing_author_is_dropped_from_listing() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        svc.create(MOD_TOKEN, body("Tomato", Some("published"), Some(7))).await.unwrap();
        let potato = svc.create(MOD_TOKEN, body("Potato", Some("published"), Some(8))).await.unwrap();
        svc.create(MOD_TOKEN, body("Carrot", Some("published"), Some(9))).await.unwrap();
        h.users.fail_for(8);

        let listed = svc.get_all(CropFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|c| c.name != "Potato"));

        // single-item reads fail hard on the same lookup
        assert!(matches!(svc.get_by_id(potato).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn strict_listing_fails_whole_call() {
        let h = harness_with(PolicyConfig { strict_list_enrichment: true, ..PolicyConfig::default() }).await;
        let svc = CropService::new(h.deps.clone());
        svc.create(MOD_TOKEN, body("Tomato", Some("published"), Some(7))).await.unwrap();
        svc.create(MOD_TOKEN, body("Potato", Some("published"), Some(8))).await.unwrap();
        h.users.fail_for(8);
        assert!(svc.get_all(CropFilter::default()).await.is_err());
    }

    #[tokio::test]
    async fn empty_update_is_rejected_before_any_call() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let id = svc.create(MOD_TOKEN, body("Tomato", Some("published"), None)).await.unwrap();
        let before = svc.get_by_id(id).await.unwrap();
        let checks_before = h.access.checked_levels().len();

        let err = svc.update(MOD_TOKEN, id, CropUpdate::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArguments(_)));
        assert_eq!(h.access.checked_levels().len(), checks_before);
        assert_eq!(svc.get_by_id(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn partial_update_requires_moderator_and_keeps_omitted_fields() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let mut b = body("Tomato", Some("pending"), Some(7));
        b.description = Some("red".into());
        let id = svc.create(USER_TOKEN, b).await.unwrap();

        let rename = CropUpdate { name: Some("Cherry tomato".into()), ..Default::default() };
        assert!(matches!(svc.update(USER_TOKEN, id, rename.clone()).await, Err(ServiceError::AccessDenied(_))));
        assert_eq!(svc.get_by_id(id).await.unwrap().name, "Tomato");

        svc.update(MOD_TOKEN, id, rename).await.unwrap();
        svc.update(MOD_TOKEN, id, CropUpdate { status: Some("published".into()), ..Default::default() }).await.unwrap();
        let crop = svc.get_by_id(id).await.unwrap();
        assert_eq!(crop.name, "Cherry tomato");
        assert_eq!(crop.description.as_deref(), Some("red"));
        assert_eq!(crop.status, "published");

        let missing = svc.update(MOD_TOKEN, 999, CropUpdate { name: Some("x".into()), ..Default::default() }).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_requires_moderator() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let id = svc.create(USER_TOKEN, body("Tomato", None, None)).await.unwrap();
        assert!(matches!(svc.delete(USER_TOKEN, id).await, Err(ServiceError::AccessDenied(_))));
        svc.delete(MOD_TOKEN, id).await.unwrap();
        assert!(matches!(svc.delete(MOD_TOKEN, id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get_by_id(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_takes_category_links_with_it() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let id = svc.create(USER_TOKEN, body("Tomato", None, None)).await.unwrap();
        let category_id = h.seed_category("Diseases").await;
        svc.add_relation(USER_TOKEN, id, category_id).await.unwrap();

        svc.delete(MOD_TOKEN, id).await.unwrap();
        assert_eq!(models::crop_category::Entity::find().count(&h.db).await.unwrap(), 0);
        assert_eq!(models::category::Entity::find().count(&h.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn relations_link_and_unlink() {
        let h = harness().await;
        let svc = CropService::new(h.deps.clone());
        let crop_id = svc.create(USER_TOKEN, body("Tomato", None, None)).await.unwrap();
        let category_id = h.seed_category("Diseases").await;

        svc.add_relation(USER_TOKEN, crop_id, category_id).await.unwrap();
        assert!(matches!(svc.add_relation(USER_TOKEN, crop_id, category_id).await, Err(ServiceError::AlreadyExists(_))));
        assert!(matches!(svc.add_relation(USER_TOKEN, crop_id, 999).await, Err(ServiceError::InvalidArguments(_))));
        assert!(matches!(svc.add_relation("bogus", crop_id, category_id).await, Err(ServiceError::AccessDenied(_))));

        svc.remove_relation(USER_TOKEN, crop_id, category_id).await.unwrap();
        svc.remove_relation(USER_TOKEN, crop_id, category_id).await.unwrap();
        assert!(h.access.checked_levels().iter().all(|l| *l == AccessLevel::User));
    }
}
