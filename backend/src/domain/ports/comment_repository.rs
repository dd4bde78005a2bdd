//! Port for schedule comments keyed by (schedule, user).
use async_trait::async_trait;

use crate::domain::{Comment, ScheduleId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
        /// The schedule or user does not exist.
        MissingReference { message: String } =>
            "comment repository reference missing: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert the comment or overwrite the text stored for its key.
    async fn upsert(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;

    /// Every comment left on a schedule.
    async fn list_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;
}
