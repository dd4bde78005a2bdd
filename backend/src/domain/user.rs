//! User identity as handed over by the external identity provider.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::text::{MAX_TEXT_CHARS, strip_nul_chars};

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Provider identifiers are never negative.
    #[error("user id must not be negative")]
    NegativeId,
    /// The username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The username exceeds the stored column width.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
}

/// Stable user identifier issued by the identity provider.
///
/// The same person keeps the same id across logins, which is what makes the
/// login-time upsert idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a provider identifier.
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id < 0 {
            return Err(UserValidationError::NegativeId);
        }
        Ok(Self(id))
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Name shown next to a user's availability and comments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate a username: non-blank and at most 255 characters.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = strip_nul_chars(username.into());
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > MAX_TEXT_CHARS {
            return Err(UserValidationError::UsernameTooLong {
                max: MAX_TEXT_CHARS,
            });
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is a non-negative provider identifier.
/// - `username` is non-blank and at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userId")]
    id: UserId,
    username: Username,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Fallible constructor from raw values.
    ///
    /// # Examples
    /// ```
    /// use schedule_backend::domain::User;
    ///
    /// let user = User::try_from_parts(0, "testuser").expect("valid user");
    /// assert_eq!(user.id().get(), 0);
    /// assert_eq!(user.username().as_ref(), "testuser");
    /// ```
    pub fn try_from_parts(
        id: i64,
        username: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, Username::new(username)?))
    }

    /// Provider identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }
}
