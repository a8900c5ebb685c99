//! Crop workflow: the root of the catalog hierarchy.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CropService;
