use async_trait::async_trait;

use super::policy::AccessLevel;
use crate::clients::ClientError;

/// Remote auth/access operations the gateway depends on.
#[async_trait]
pub trait AccessApi: Send + Sync {
    /// Exchange the caller's refresh token for a short-lived access token.
    async fn exchange_token(&self, refresh_token: &str) -> Result<String, ClientError>;
    /// `Ok(false)` is an explicit denial; `Err` is a transport or protocol failure.
    async fn check(&self, access_token: &str, level: AccessLevel) -> Result<bool, ClientError>;
    /// Whether `refresh_token` belongs to `user_id`.
    async fn is_user(&self, refresh_token: &str, user_id: i64) -> Result<bool, ClientError>;
}

/// Simple in-memory access service for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, PoisonError};

    const ACCESS_PREFIX: &str = "access:";

    #[derive(Default)]
    pub struct MockAccessApi {
        grants: Mutex<HashMap<String, (i64, AccessLevel)>>, // key: refresh token
        checks: Mutex<Vec<AccessLevel>>,
        unavailable: AtomicBool,
    }

    impl MockAccessApi {
        pub fn with_grant(self, token: &str, user_id: i64, level: AccessLevel) -> Self {
            self.grant(token, user_id, level);
            self
        }

        pub fn grant(&self, token: &str, user_id: i64, level: AccessLevel) {
            let mut grants = self.grants.lock().unwrap_or_else(PoisonError::into_inner);
            grants.insert(token.to_string(), (user_id, level));
        }

        /// Make every call fail as if the service were unreachable.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Levels requested through `check`, in call order.
        pub fn checked_levels(&self) -> Vec<AccessLevel> {
            self.checks.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        fn lookup(&self, refresh_token: &str) -> Option<(i64, AccessLevel)> {
            let grants = self.grants.lock().unwrap_or_else(PoisonError::into_inner);
            grants.get(refresh_token).copied()
        }

        fn ensure_available(&self) -> Result<(), ClientError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ClientError::Connect("mock access service down".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AccessApi for MockAccessApi {
        async fn exchange_token(&self, refresh_token: &str) -> Result<String, ClientError> {
            self.ensure_available()?;
            match self.lookup(refresh_token) {
                Some(_) => Ok(format!("{ACCESS_PREFIX}{refresh_token}")),
                None => Err(ClientError::Status(401)),
            }
        }

        async fn check(&self, access_token: &str, level: AccessLevel) -> Result<bool, ClientError> {
            self.ensure_available()?;
            self.checks.lock().unwrap_or_else(PoisonError::into_inner).push(level);
            let refresh = access_token.strip_prefix(ACCESS_PREFIX).ok_or(ClientError::Status(401))?;
            Ok(self.lookup(refresh).is_some_and(|(_, held)| held >= level))
        }

        async fn is_user(&self, refresh_token: &str, user_id: i64) -> Result<bool, ClientError> {
            self.ensure_available()?;
            Ok(self.lookup(refresh_token).is_some_and(|(uid, _)| uid == user_id))
        }
    }
}
