//! Create `entity_status` lookup table and seed the moderation statuses.
use sea_orm_migration::{prelude::*, schema::*};
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Seeded labels; ids follow insertion order and are never reused.
pub const SEEDED_STATUSES: [&str; 3] = ["published", "pending", "rejected"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EntityStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(EntityStatus::Id))
                    .col(string_len_uniq(EntityStatus::Status, 64))
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(EntityStatus::Table).columns([EntityStatus::Status]);
        for label in SEEDED_STATUSES {
            seed.values_panic([label.into()]);
        }
        let db = manager.get_connection();
        db.execute(db.get_database_backend().build(&seed)).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EntityStatus::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum EntityStatus {
    Table,
    Id,
    Status,
}
