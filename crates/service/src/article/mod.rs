//! Article workflow: article row, its (crop, category) placement and its image set.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::ArticleService;
