//! Free-text remarks attached to a schedule, one per user.

use serde::{Deserialize, Serialize};

use super::text::truncate_to_limit;
use super::{ScheduleId, UserId};

/// Comment body without NUL characters, truncated to 255 characters. Empty text is allowed and
/// clears a previous comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(truncate_to_limit(text.into()))
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for CommentText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

/// One stored comment, keyed by (schedule, user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub schedule_id: ScheduleId,
    pub user_id: UserId,
    pub text: CommentText,
}
