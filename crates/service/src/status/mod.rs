//! Status resolver: moderation labels ↔ stable numeric ids.

pub mod repository;
pub mod resolver;

pub use repository::{SeaOrmStatusRepository, StatusRepository};
pub use resolver::StatusResolver;
