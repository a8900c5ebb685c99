//! Access gateway: delegates every authorization decision to the remote access service.

pub mod api;
pub mod gateway;
pub mod policy;

pub use api::AccessApi;
pub use gateway::AccessGateway;
pub use policy::{AccessLevel, AccessPolicy};
