use async_trait::async_trait;

use crate::clients::ClientError;

/// Remote auth-service operations used by the pass-through workflow.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, email: &str, password: &str) -> Result<i64, ClientError>;
    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError>;
    async fn refresh(&self, refresh_token: &str) -> Result<String, ClientError>;
}

/// Simple in-memory auth service for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    const TOKEN_PREFIX: &str = "refresh-";

    #[derive(Default)]
    pub struct MockAuthApi {
        accounts: Mutex<HashMap<String, (i64, String)>>, // key: email
    }

    #[async_trait]
    impl AuthApi for MockAuthApi {
        async fn register(&self, email: &str, password: &str) -> Result<i64, ClientError> {
            let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
            if accounts.contains_key(email) {
                return Err(ClientError::Status(409));
            }
            let id = accounts.len() as i64 + 1;
            accounts.insert(email.to_string(), (id, password.to_string()));
            Ok(id)
        }

        async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
            let accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
            match accounts.get(email) {
                Some((id, stored)) if stored == password => Ok(format!("{TOKEN_PREFIX}{id}")),
                _ => Err(ClientError::Status(401)),
            }
        }

        async fn refresh(&self, refresh_token: &str) -> Result<String, ClientError> {
            match refresh_token.strip_prefix(TOKEN_PREFIX) {
                Some(id) if !id.is_empty() => Ok(format!("{TOKEN_PREFIX}{id}")),
                _ => Err(ClientError::Status(401)),
            }
        }
    }
}
