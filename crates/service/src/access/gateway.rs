use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::api::AccessApi;
use super::policy::AccessLevel;
use crate::errors::ServiceError;

/// Confirms a caller holds a privilege level before any write happens.
///
/// Every failure mode (unknown token, explicit denial, unreachable service) becomes
/// [`ServiceError::AccessDenied`].
#[derive(Clone)]
pub struct AccessGateway {
    api: Arc<dyn AccessApi>,
}

impl AccessGateway {
    pub fn new(api: Arc<dyn AccessApi>) -> Self { Self { api } }

    #[instrument(skip(self, token), fields(level = %level))]
    pub async fn authorize(&self, token: &str, level: AccessLevel) -> Result<(), ServiceError> {
        if token.trim().is_empty() {
            return Err(ServiceError::AccessDenied("missing token".into()));
        }
        let access_token = self.api.exchange_token(token).await.map_err(|e| {
            warn!(error = %e, "token_exchange_failed");
            ServiceError::AccessDenied("token cannot be validated".into())
        })?;
        match self.api.check(&access_token, level).await {
            Ok(true) => {
                debug!("access_granted");
                Ok(())
            }
            Ok(false) => {
                info!("access_denied");
                Err(ServiceError::AccessDenied(format!("{level} level required")))
            }
            Err(e) => {
                warn!(error = %e, "access_check_failed");
                Err(ServiceError::AccessDenied("access check failed".into()))
            }
        }
    }

    /// Ownership probe. Any remote failure counts as "not this user".
    #[instrument(skip(self, token))]
    pub async fn is_user(&self, token: &str, user_id: i64) -> bool {
        match self.api.is_user(token, user_id).await {
            Ok(owned) => owned,
            Err(e) => {
                warn!(error = %e, "is_user_check_failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::api::mock::MockAccessApi;

    fn gateway(mock: MockAccessApi) -> (AccessGateway, Arc<MockAccessApi>) {
        let mock = Arc::new(mock);
        (AccessGateway::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn grants_when_level_held() {
        let (gw, mock) = gateway(MockAccessApi::default().with_grant("mod-token", 3, AccessLevel::Moderator));
        gw.authorize("mod-token", AccessLevel::User).await.unwrap();
        gw.authorize("mod-token", AccessLevel::Moderator).await.unwrap();
        assert_eq!(mock.checked_levels(), vec![AccessLevel::User, AccessLevel::Moderator]);
    }

    #[tokio::test]
    async fn denies_insufficient_level() {
        let (gw, _) = gateway(MockAccessApi::default().with_grant("user-token", 3, AccessLevel::User));
        let err = gw.authorize("user-token", AccessLevel::Moderator).await.unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn unknown_token_and_transport_errors_deny() {
        let (gw, mock) = gateway(MockAccessApi::default().with_grant("t", 1, AccessLevel::Creator));
        assert!(matches!(gw.authorize("nope", AccessLevel::User).await, Err(ServiceError::AccessDenied(_))));
        assert!(matches!(gw.authorize("", AccessLevel::User).await, Err(ServiceError::AccessDenied(_))));
        mock.set_unavailable(true);
        assert!(matches!(gw.authorize("t", AccessLevel::User).await, Err(ServiceError::AccessDenied(_))));
        assert!(!gw.is_user("t", 1).await);
    }

    #[tokio::test]
    async fn is_user_matches_owner() {
        let (gw, _) = gateway(MockAccessApi::default().with_grant("t", 7, AccessLevel::User));
        assert!(gw.is_user("t", 7).await);
        assert!(!gw.is_user("t", 8).await);
    }
}
