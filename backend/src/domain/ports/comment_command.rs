//! Driving port for leaving a comment on a schedule.

use async_trait::async_trait;

use crate::domain::{CommentText, Error, ScheduleId, User, UserId};

/// Store `caller`'s comment on a schedule, replacing any earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCommentRequest {
    pub schedule_id: ScheduleId,
    pub caller: User,
    /// User named in the request path; must match the caller.
    pub target_user: UserId,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCommentResponse {
    /// The text as stored, after truncation.
    pub comment: CommentText,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    async fn set_comment(&self, request: SetCommentRequest) -> Result<SetCommentResponse, Error>;
}

/// Fixture command that truncates and echoes the comment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentCommand;

#[async_trait]
impl CommentCommand for FixtureCommentCommand {
    async fn set_comment(&self, request: SetCommentRequest) -> Result<SetCommentResponse, Error> {
        if request.caller.id() != request.target_user {
            return Err(Error::forbidden("cannot comment as another user"));
        }
        Ok(SetCommentResponse {
            comment: CommentText::new(request.comment),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_echoes_truncated_comment() {
        let caller = User::try_from_parts(0, "testuser").expect("valid user");
        let response = FixtureCommentCommand
            .set_comment(SetCommentRequest {
                schedule_id: ScheduleId::new(1),
                target_user: caller.id(),
                caller,
                comment: "x".repeat(300),
            })
            .await
            .expect("fixture accepts own comment");
        assert_eq!(response.comment.as_ref().len(), 255);
    }
}
