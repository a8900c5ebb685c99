//! Migrator registering catalog migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_entity_status;
mod m20240301_000002_create_crops;
mod m20240301_000003_create_categories;
mod m20240301_000004_create_articles;
mod m20240301_000005_create_crops_categories;
mod m20240301_000006_create_articles_relations;
mod m20240301_000007_create_articles_images;
mod m20240301_000008_add_indexes;

pub use m20240301_000001_create_entity_status::SEEDED_STATUSES;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_entity_status::Migration),
            Box::new(m20240301_000002_create_crops::Migration),
            Box::new(m20240301_000003_create_categories::Migration),
            Box::new(m20240301_000004_create_articles::Migration),
            Box::new(m20240301_000005_create_crops_categories::Migration),
            Box::new(m20240301_000006_create_articles_relations::Migration),
            Box::new(m20240301_000007_create_articles_images::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000008_add_indexes::Migration),
        ]
    }
}
