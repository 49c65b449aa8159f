//! Bearer token resolution through the auth platform.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{IdentityProvider, IdentityProviderError, IdentityResolver};
use crate::domain::{AccessToken, Error, UserId};

/// Resolves tokens by asking the auth platform who they belong to.
pub struct PlatformIdentityResolver<P> {
    identity: Arc<P>,
}

impl<P> PlatformIdentityResolver<P> {
    /// Create a resolver over the auth platform port.
    pub fn new(identity: Arc<P>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl<P> IdentityResolver for PlatformIdentityResolver<P>
where
    P: IdentityProvider,
{
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error> {
        match self.identity.user_for_token(token).await {
            Ok(user) => Ok(user.id),
            Err(IdentityProviderError::InvalidToken | IdentityProviderError::InvalidCredentials) => {
                debug!("auth platform rejected bearer token");
                Err(Error::unauthorized("invalid or expired token"))
            }
            Err(err) => {
                error!(error = %err, "token resolution failed");
                Err(Error::internal("failed to verify access token"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockIdentityProvider, PlatformUser};
    use rstest::rstest;

    fn token() -> AccessToken {
        AccessToken::new("token-123").expect("token")
    }

    #[tokio::test]
    async fn resolves_platform_user_id() {
        let user_id = UserId::random();
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_user_for_token()
            .times(1)
            .withf(|token: &AccessToken| token.expose() == "token-123")
            .return_once(move |_| {
                Ok(PlatformUser {
                    id: user_id,
                    email: Some("ada@example.com".into()),
                    name: None,
                    lastname: None,
                })
            });

        let resolver = PlatformIdentityResolver::new(Arc::new(identity));
        assert_eq!(resolver.resolve(&token()).await.expect("resolved"), user_id);
    }

    #[rstest]
    #[case(IdentityProviderError::invalid_token(), ErrorCode::Unauthorized)]
    #[case(IdentityProviderError::transport("timeout"), ErrorCode::InternalError)]
    #[case(IdentityProviderError::decode("bad json"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn maps_platform_failures(
        #[case] failure: IdentityProviderError,
        #[case] expected: ErrorCode,
    ) {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_user_for_token()
            .times(1)
            .return_once(move |_| Err(failure));

        let resolver = PlatformIdentityResolver::new(Arc::new(identity));
        let err = resolver.resolve(&token()).await.expect_err("rejected");
        assert_eq!(err.code(), expected);
    }
}
