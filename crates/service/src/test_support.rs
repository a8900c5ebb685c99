#![cfg(test)]
use std::sync::Arc;

use chrono::Utc;
use configs::PolicyConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};

use crate::access::{api::mock::MockAccessApi, AccessLevel};
use crate::users::api::mock::MockUserApi;
use crate::workflow::WorkflowDeps;
use models::{category, crop};

/// Refresh token of user 7, plain `User` level.
pub const USER_TOKEN: &str = "user-token";
/// Refresh token of user 1, `Moderator` level.
pub const MOD_TOKEN: &str = "mod-token";

/// Fresh in-memory SQLite database with the full schema and seeded statuses.
///
/// A single pooled connection keeps the in-memory database alive for the whole test.
pub async fn memory_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite");
    migration::Migrator::up(&db, None).await.expect("migrate up");
    db
}

pub struct Harness {
    pub db: DatabaseConnection,
    pub access: Arc<MockAccessApi>,
    pub users: Arc<MockUserApi>,
    pub deps: WorkflowDeps,
}

pub async fn harness() -> Harness {
    harness_with(PolicyConfig::default()).await
}

pub async fn harness_with(policy: PolicyConfig) -> Harness {
    let db = memory_db().await;
    let access = Arc::new(
        MockAccessApi::default()
            .with_grant(USER_TOKEN, 7, AccessLevel::User)
            .with_grant(MOD_TOKEN, 1, AccessLevel::Moderator),
    );
    let users = Arc::new(MockUserApi::default().with_user(1).with_user(7).with_user(8).with_user(9));
    let deps = WorkflowDeps::new(db.clone(), access.clone(), users.clone(), &policy);
    Harness { db, access, users, deps }
}

impl Harness {
    async fn published(&self) -> i32 {
        self.deps.statuses.resolve("published").await.expect("seeded status")
    }

    /// Insert a published category directly, bypassing authorization.
    pub async fn seed_category(&self, name: &str) -> i32 {
        let now = Utc::now().fixed_offset();
        let am = category::ActiveModel {
            name: Set(name.to_string()),
            description: Set(None),
            icon: Set(None),
            author: Set(None),
            status: Set(self.published().await),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        category::Entity::insert(am).exec(&self.db).await.expect("seed category").last_insert_id
    }

    /// Insert a published crop directly, bypassing authorization.
    pub async fn seed_crop(&self, name: &str) -> i32 {
        let now = Utc::now().fixed_offset();
        let am = crop::ActiveModel {
            name: Set(name.to_string()),
            description: Set(None),
            img: Set(None),
            author: Set(None),
            status: Set(self.published().await),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        crop::Entity::insert(am).exec(&self.db).await.expect("seed crop").last_insert_id
    }
}
