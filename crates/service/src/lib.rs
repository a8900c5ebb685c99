//! Moderated write coordination for the crop catalog.
//! - Workflows (`crop`, `category`, `article`) own validation, authorization and persistence.
//! - Remote collaborators (access checks, user profiles, auth) sit behind traits in
//!   `access`, `users` and `auth`, with HTTP implementations in `clients`.
//! - `tx` runs multi-row writes atomically; `status` and `enrich` shape read results.

pub mod access;
pub mod article;
pub mod auth;
pub mod category;
pub mod clients;
pub mod crop;
pub mod enrich;
pub mod errors;
pub mod pagination;
pub mod relations;
pub mod status;
pub mod tx;
pub mod users;
pub mod workflow;

#[cfg(test)]
pub mod test_support;
