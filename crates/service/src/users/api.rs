use async_trait::async_trait;

use super::domain::{AuthorSnapshot, UserPatch};
use crate::clients::ClientError;

/// Remote user-service operations.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn get_by_id(&self, user_id: i64) -> Result<AuthorSnapshot, ClientError>;
    async fn update(&self, user_id: i64, patch: &UserPatch) -> Result<(), ClientError>;
}

/// Simple in-memory user service for tests
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct MockUserApi {
        users: Mutex<HashMap<i64, AuthorSnapshot>>,
        failing: Mutex<HashSet<i64>>,
        lookups: AtomicUsize,
    }

    impl MockUserApi {
        /// Register a user with a generated email and the `user` role.
        pub fn with_user(self, id: i64) -> Self {
            self.insert(AuthorSnapshot {
                id,
                name: Some(format!("user{id}")),
                email: format!("user{id}@example.com"),
                avatar: None,
                role: "user".into(),
            });
            self
        }

        pub fn insert(&self, user: AuthorSnapshot) {
            self.users.lock().unwrap_or_else(PoisonError::into_inner).insert(user.id, user);
        }

        /// Lookups for `id` fail with a server error from now on.
        pub fn fail_for(&self, id: i64) {
            self.failing.lock().unwrap_or_else(PoisonError::into_inner).insert(id);
        }

        pub fn lookups(&self) -> usize { self.lookups.load(Ordering::SeqCst) }

        pub fn get(&self, id: i64) -> Option<AuthorSnapshot> {
            self.users.lock().unwrap_or_else(PoisonError::into_inner).get(&id).cloned()
        }
    }

    #[async_trait]
    impl UserApi for MockUserApi {
        async fn get_by_id(&self, user_id: i64) -> Result<AuthorSnapshot, ClientError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.failing.lock().unwrap_or_else(PoisonError::into_inner).contains(&user_id) {
                return Err(ClientError::Status(500));
            }
            self.get(user_id).ok_or(ClientError::Status(404))
        }

        async fn update(&self, user_id: i64, patch: &UserPatch) -> Result<(), ClientError> {
            let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
            let user = users.get_mut(&user_id).ok_or(ClientError::Status(404))?;
            if let Some(name) = &patch.name { user.name = Some(name.clone()); }
            if let Some(email) = &patch.email { user.email = email.clone(); }
            if let Some(avatar) = &patch.avatar { user.avatar = Some(avatar.clone()); }
            if let Some(role) = &patch.role { user.role = role.clone(); }
            Ok(())
        }
    }
}
