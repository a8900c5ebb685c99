//! Remote user profiles: author enrichment for reads and the profile workflow.

pub mod api;
pub mod domain;
pub mod enricher;
pub mod service;

pub use api::UserApi;
pub use domain::{AuthorSnapshot, UserPatch};
pub use enricher::AuthorEnricher;
pub use service::UserService;
