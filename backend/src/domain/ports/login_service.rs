//! Driving port for the login hand-off.
//!
//! Inbound adapters call it once the external provider has verified a
//! person. Implementations record the user so later schedules, comments and
//! availability rows can reference them.

use async_trait::async_trait;

use crate::domain::{Error, LoginIdentity, User};

/// Domain use-case port for logging a verified identity in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Upsert the user behind `identity` and return it.
    async fn login(&self, identity: LoginIdentity) -> Result<User, Error>;
}

/// Login service that accepts every identity without persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, identity: LoginIdentity) -> Result<User, Error> {
        Ok(identity.into_user())
    }
}
