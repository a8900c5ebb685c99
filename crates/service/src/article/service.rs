use tracing::{info, instrument};

use super::domain::{Article, ArticleBody, ArticleFilter, ArticleUpdate};
use super::repository::{self, NewArticle};
use crate::access::AccessPolicy;
use crate::enrich::{Enriched, RowKey};
use crate::errors::ServiceError;
use crate::relations;
use crate::workflow::WorkflowDeps;
use models::article;

fn key(row: &article::Model) -> RowKey {
    RowKey { id: row.id, status: row.status, author: row.author }
}

fn compose(row: article::Model, images: Vec<String>, e: Enriched) -> Article {
    Article {
        id: row.id,
        title: row.title,
        latin_name: row.latin_name,
        text: row.text,
        images,
        status: e.status,
        author: e.author,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[derive(Clone)]
pub struct ArticleService {
    deps: WorkflowDeps,
}

impl ArticleService {
    pub fn new(deps: WorkflowDeps) -> Self { Self { deps } }

    /// Article row, its placement under `(crop_id, category_id)` and its images
    /// commit together or not at all.
    #[instrument(skip(self, token, body), fields(title = %body.title))]
    pub async fn create(&self, token: &str, crop_id: i32, category_id: i32, body: ArticleBody) -> Result<i32, ServiceError> {
        let status = self.deps.authorize_create(token, body.status.as_deref()).await?;
        body.validate()?;
        let images = body.images;
        let new = NewArticle {
            title: body.title,
            latin_name: body.latin_name,
            text: body.text,
            author: body.author,
            status,
        };
        let id = self
            .deps
            .tx
            .run_atomic(move |txn| {
                Box::pin(async move {
                    let id = repository::insert(txn, new).await?;
                    relations::link_article(txn, crop_id, category_id, id).await?;
                    repository::insert_images(txn, id, images).await?;
                    Ok::<_, ServiceError>(id)
                })
            })
            .await?;
        info!(article_id = id, crop_id, category_id, status, "article_created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self, filter: ArticleFilter) -> Result<Vec<Article>, ServiceError> {
        let status = self.deps.statuses.resolve_or_default(filter.status.as_deref()).await?;
        let (limit, offset) = filter.page().normalize();
        let db = self.deps.db();
        let rows = repository::list(db, status, filter.crop_id, filter.category_id, limit, offset).await?;
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let images = repository::images_for(db, &ids).await?;
        self.deps
            .enricher
            .list(rows, key, |row, e| {
                let imgs = images.get(&row.id).cloned().unwrap_or_default();
                compose(row, imgs, e)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Article, ServiceError> {
        let db = self.deps.db();
        let row = repository::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("article"))?;
        let mut images = repository::images_for(db, &[id]).await?;
        let enriched = self.deps.enricher.detail(key(&row)).await?;
        Ok(compose(row, images.remove(&id).unwrap_or_default(), enriched))
    }

    /// Column changes and the image-set replacement share one transaction.
    #[instrument(skip(self, token, input))]
    pub async fn update(&self, token: &str, id: i32, input: ArticleUpdate) -> Result<(), ServiceError> {
        if input.is_empty() {
            return Err(ServiceError::InvalidArguments("empty update input".into()));
        }
        let status = self.deps.authorize_update(token, input.status.as_deref()).await?;
        input.validate()?;
        self.deps
            .tx
            .run_atomic(move |txn| {
                Box::pin(async move {
                    repository::update(txn, id, &input, status).await?;
                    if let Some(images) = input.images {
                        repository::replace_images(txn, id, images).await?;
                    }
                    Ok::<_, ServiceError>(())
                })
            })
            .await?;
        info!(article_id = id, "article_updated");
        Ok(())
    }

    /// Removes the article row only. Its placement and image rows go with it through
    /// the schema's `ON DELETE CASCADE`; nothing here deletes them explicitly.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: i32) -> Result<(), ServiceError> {
        self.deps.access.authorize(token, AccessPolicy::MODERATE).await?;
        repository::delete(self.deps.db(), id).await?;
        info!(article_id = id, "article_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{harness, Harness, MOD_TOKEN, USER_TOKEN};
    use models::{article_image, article_relation};
    use sea_orm::{EntityTrait, PaginatorTrait};

    fn body(title: &str, status: Option<&str>, images: &[&str]) -> ArticleBody {
        ArticleBody {
            title: title.into(),
            latin_name: None,
            text: Some("how to grow".into()),
            images: images.iter().map(|s| s.to_string()).collect(),
            status: status.map(Into::into),
            author: Some(7),
        }
    }

    async fn counts(h: &Harness) -> (u64, u64, u64) {
        (
            article::Entity::find().count(&h.db).await.unwrap(),
            article_relation::Entity::find().count(&h.db).await.unwrap(),
            article_image::Entity::find().count(&h.db).await.unwrap(),
        )
    }

    async fn placement(h: &Harness) -> (i32, i32) {
        let crop = h.seed_crop("Tomato").await;
        let category = h.seed_category("Pests").await;
        (crop, category)
    }

    #[tokio::test]
    async fn create_writes_row_relation_and_images() {
        let h = harness().await;
        let svc = ArticleService::new(h.deps.clone());
        let (crop, category) = placement(&h).await;

        let id = svc
            .create(USER_TOKEN, crop, category, body("Aphids", None, &["https://img.io/a.png", "https://img.io/b.png"]))
            .await
            .unwrap();
        assert_eq!(counts(&h).await, (1, 1, 2));

        let article = svc.get_by_id(id).await.unwrap();
        assert_eq!(article.images, vec!["https://img.io/a.png", "https://img.io/b.png"]);
        assert_eq!(article.status, "pending");
        assert_eq!(article.author.map(|a| a.id), Some(7));
    }

    #[tokio::test]
    async fn failing_image_insert_rolls_back_article_and_relation() {
        let h = harness().await;
        let svc = ArticleService::new(h.deps.clone());
        let (crop, category) = placement(&h).await;

        let dup = ["https://img.io/a.png", "https://img.io/a.png"];
        let err = svc.create(USER_TOKEN, crop, category, body("Aphids", None, &dup)).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(_)));
        assert_eq!(counts(&h).await, (0, 0, 0));
    }

    #[tokio::test]
    async fn failing_relation_insert_rolls_back_article() {
        let h = harness().await;
        let svc = ArticleService::new(h.deps.clone());
        let (crop, _) = placement(&h).await;

        let err = svc.create(USER_TOKEN, crop, 404, body("Aphids", None, &[])).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArguments(_)));
        assert_eq!(counts(&h).await, (0, 0, 0));
    }

    #[tokio::test]
    async fn denied_create_touches_nothing() {
        let h = harness().await;
        let svc = ArticleService::new(h.deps.clone());
        let (crop, category) = placement(&h).await;
        let err = svc
            .create(USER_TOKEN, crop, category, body("Aphids", Some("published"), &["https://img.io/a.png"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));
        assert_eq!(counts(&h).await, (0, 0, 0));
    }

    #[tokio::test]
    async fn update_replaces_image_set() {
        let h = harness().await;
        let svc = ArticleService::new(h.deps.clone());
        let (crop, category) = placement(&h).await;
        let id = svc.create(USER_TOKEN, crop, category, body("Aphids", None, &["https://img.io/a.png"])).await.unwrap();

        let upd = ArticleUpdate {
            latin_name: Some("Aphidoidea".into()),
            images: Some(vec!["https://img.io/c.png".into(), "https://img.io/d.png".into()]),
            ..Default::default()
        };
        svc.update(MOD_TOKEN, id, upd).await.unwrap();
        let article = svc.get_by_id(id).await.unwrap();
        assert_eq!(article.images, vec!["https://img.io/c.png", "https://img.io/d.png"]);
        assert_eq!(article.latin_name.as_deref(), Some("Aphidoidea"));
        assert_eq!(article.title, "Aphids");

        // untouched when images are omitted
        svc.update(MOD_TOKEN, id, ArticleUpdate { title: Some("Green aphids".into()), ..Default::default() }).await.unwrap();
        assert_eq!(svc.get_by_id(id).await.unwrap().images.len(), 2);

        let missing = svc.update(MOD_TOKEN, 999, ArticleUpdate { images: Some(vec![]), ..Default::default() }).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn denied_update_leaves_article_untouched() {
        let h = harness().await;
        let svc = ArticleService::new(h.deps.clone());
        let (crop, category) = placement(&h).await;
        let id = svc.create(USER_TOKEN, crop, category, body("Aphids", None, &["https://img.io/a.png"])).await.unwrap();

        let upd = ArticleUpdate {
            title: Some("Green aphids".into()),
            images: Some(vec!["https://img.io/b.png".into()]),
            ..Default::default()
        };
        let err = svc.update(USER_TOKEN, id, upd).await.unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));

        let article = svc.get_by_id(id).await.unwrap();
        assert_eq!(article.title, "Aphids");
        assert_eq!(article.images, vec!["https://img.io/a.png"]);
        assert_eq!(counts(&h).await, (1, 1, 1));
    }

    #[tokio::test]
    async fn listing_filters_by_placement() {
        let h = harness().await;
        let svc = ArticleService::new(h.deps.clone());
        let (tomato, pests) = placement(&h).await;
        let potato = h.seed_crop("Potato").await;

        svc.create(MOD_TOKEN, tomato, pests, body("Aphids", Some("published"), &["https://img.io/a.png"])).await.unwrap();
        svc.create(MOD_TOKEN, potato, pests, body("Beetles", Some("published"), &[])).await.unwrap();
        svc.create(USER_TOKEN, tomato, pests, body("Mites", None, &[])).await.unwrap();

        let filter = ArticleFilter { crop_id: Some(tomato), ..Default::default() };
        let listed = svc.get_all(filter).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Aphids");
        assert_eq!(listed[0].images, vec!["https://img.io/a.png"]);

        let filter = ArticleFilter { category_id: Some(pests), ..Default::default() };
        assert_eq!(svc.get_all(filter).await.unwrap().len(), 2);

        let filter = ArticleFilter { crop_id: Some(potato), category_id: Some(pests), status: Some("pending".into()), ..Default::default() };
        assert!(svc.get_all(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_dependent_rows() {
        let h = harness().await;
        let svc = ArticleService::new(h.deps.clone());
        let (crop, category) = placement(&h).await;
        let id = svc.create(USER_TOKEN, crop, category, body("Aphids", None, &["https://img.io/a.png"])).await.unwrap();

        assert!(matches!(svc.delete(USER_TOKEN, id).await, Err(ServiceError::AccessDenied(_))));
        svc.delete(MOD_TOKEN, id).await.unwrap();
        assert_eq!(counts(&h).await, (0, 0, 0));
    }
}
