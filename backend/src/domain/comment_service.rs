//! Comment upsert service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CommentCommand, CommentRepository, ScheduleRepository, SetCommentRequest, SetCommentResponse,
    UserRepository,
};
use crate::domain::repository_error_mapping::{
    map_comment_error, map_schedule_error, map_user_error,
};
use crate::domain::{Comment, CommentText, Error};

/// Stores one comment per (schedule, user), replacing earlier text.
#[derive(Clone)]
pub struct CommentService<S, U, C> {
    schedules: Arc<S>,
    users: Arc<U>,
    comments: Arc<C>,
}

impl<S, U, C> CommentService<S, U, C> {
    pub fn new(schedules: Arc<S>, users: Arc<U>, comments: Arc<C>) -> Self {
        Self {
            schedules,
            users,
            comments,
        }
    }
}

#[async_trait]
impl<S, U, C> CommentCommand for CommentService<S, U, C>
where
    S: ScheduleRepository,
    U: UserRepository,
    C: CommentRepository,
{
    async fn set_comment(&self, request: SetCommentRequest) -> Result<SetCommentResponse, Error> {
        let SetCommentRequest {
            schedule_id,
            caller,
            target_user,
            comment,
        } = request;

        if caller.id() != target_user {
            return Err(Error::forbidden("cannot comment as another user"));
        }
        if self
            .schedules
            .find_by_id(schedule_id)
            .await
            .map_err(map_schedule_error)?
            .is_none()
        {
            return Err(Error::not_found(format!("schedule {schedule_id} not found")));
        }

        self.users.upsert(&caller).await.map_err(map_user_error)?;
        let comment = Comment {
            schedule_id,
            user_id: caller.id(),
            text: CommentText::new(comment),
        };
        self.comments
            .upsert(&comment)
            .await
            .map_err(map_comment_error)?;

        info!(schedule_id = %schedule_id, user_id = %caller.id(), "comment recorded");
        Ok(SetCommentResponse {
            comment: comment.text,
        })
    }
}
