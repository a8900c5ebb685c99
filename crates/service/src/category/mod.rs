//! Category workflow. A category may be linked to crops at creation time.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CategoryService;
