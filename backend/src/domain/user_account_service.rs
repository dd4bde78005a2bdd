//! Login hand-off service: records verified identities as users.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::repository_error_mapping::map_user_error;
use crate::domain::{Error, LoginIdentity, User};

/// [`LoginService`] that upserts the user on every login, so a changed
/// display name at the provider is picked up.
#[derive(Clone)]
pub struct UserAccountService<U> {
    users: Arc<U>,
}

impl<U> UserAccountService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> LoginService for UserAccountService<U>
where
    U: UserRepository,
{
    async fn login(&self, identity: LoginIdentity) -> Result<User, Error> {
        let user = identity.into_user();
        self.users.upsert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "user logged in");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockUserRepository, UserPersistenceError};

    #[tokio::test]
    async fn login_upserts_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_upsert()
            .withf(|user| user.id().get() == 0 && user.username().as_ref() == "testuser")
            .times(1)
            .returning(|_| Ok(()));

        let service = UserAccountService::new(Arc::new(users));
        let identity = LoginIdentity::try_from_parts(0, "testuser").expect("valid identity");
        let user = service.login(identity).await.expect("login succeeds");
        assert_eq!(user.username().as_ref(), "testuser");
    }

    #[tokio::test]
    async fn storage_outage_is_service_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_upsert()
            .returning(|_| Err(UserPersistenceError::connection("refused")));

        let service = UserAccountService::new(Arc::new(users));
        let identity = LoginIdentity::try_from_parts(0, "testuser").expect("valid identity");
        let err = service.login(identity).await.expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
