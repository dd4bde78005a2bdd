//! Identity hand-off from the external login provider.
//!
//! Provider integration lives outside this crate. Once the provider has
//! verified a person it posts their stable numeric id and display name; the
//! values are validated here before any port is called.

use std::fmt;

use super::{User, UserId, UserValidationError, Username};

/// Returned when a handed-over identity is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// The provider id was negative.
    InvalidUserId,
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeded the stored column width.
    UsernameTooLong { max: usize },
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUserId => write!(f, "userId must be a non-negative integer"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<UserValidationError> for LoginValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::NegativeId => Self::InvalidUserId,
            UserValidationError::EmptyUsername => Self::EmptyUsername,
            UserValidationError::UsernameTooLong { max } => Self::UsernameTooLong { max },
        }
    }
}

/// A verified identity ready to be upserted as a [`User`].
///
/// ## Invariants
/// - `username` is trimmed, non-empty and at most 255 characters.
///
/// # Examples
/// ```
/// use schedule_backend::domain::LoginIdentity;
///
/// let identity = LoginIdentity::try_from_parts(0, "  testuser ").unwrap();
/// assert_eq!(identity.username().as_ref(), "testuser");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentity {
    user_id: UserId,
    username: Username,
}

impl LoginIdentity {
    /// Validate raw provider values.
    pub fn try_from_parts(user_id: i64, username: &str) -> Result<Self, LoginValidationError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
            username: Username::new(username.trim())?,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// The user record this identity maps to.
    pub fn into_user(self) -> User {
        User::new(self.user_id, self.username)
    }
}
