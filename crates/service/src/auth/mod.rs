//! Auth module: registration, login and token refresh forwarded to the auth service.

pub mod api;
pub mod domain;
pub mod service;

pub use api::AuthApi;
pub use service::AuthService;
