//! Schedule aggregate service.
//!
//! Implements [`ScheduleCommand`] and [`ScheduleQuery`] over the driven
//! repositories. Validation and ownership checks happen here; atomicity of
//! create, update and cascade delete is the repository's job.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AvailabilityRepository, CommentRepository, CreateScheduleRequest, CreateScheduleResponse,
    DeleteScheduleRequest, DeleteScheduleResponse, ScheduleCommand, ScheduleQuery,
    ScheduleRepository, UpdateScheduleRequest, UserRepository,
};
use crate::domain::repository_error_mapping::{
    map_availability_error, map_comment_error, map_schedule_error, map_user_error,
};
use crate::domain::text::strip_nul_chars;
use crate::domain::{
    Error, ErrorCode, Schedule, ScheduleDetail, ScheduleDetailParts, ScheduleDraft, ScheduleId,
    ScheduleName, ScheduleRevision, User, UserId, parse_candidate_names,
};

/// Schedule service implementing the schedule driving ports.
#[derive(Clone)]
pub struct ScheduleService<S, U, A, C> {
    schedules: Arc<S>,
    users: Arc<U>,
    availabilities: Arc<A>,
    comments: Arc<C>,
}

impl<S, U, A, C> ScheduleService<S, U, A, C> {
    pub fn new(schedules: Arc<S>, users: Arc<U>, availabilities: Arc<A>, comments: Arc<C>) -> Self {
        Self {
            schedules,
            users,
            availabilities,
            comments,
        }
    }
}

fn validate_name(raw: String) -> Result<ScheduleName, Error> {
    ScheduleName::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "scheduleName",
            "code": "empty_schedule_name",
        }))
    })
}

fn schedule_not_found(id: ScheduleId) -> Error {
    Error::not_found(format!("schedule {id} not found"))
}

impl<S, U, A, C> ScheduleService<S, U, A, C>
where
    S: ScheduleRepository,
    U: UserRepository,
    A: AvailabilityRepository,
    C: CommentRepository,
{
    async fn load_schedule(&self, id: ScheduleId) -> Result<Schedule, Error> {
        self.schedules
            .find_by_id(id)
            .await
            .map_err(map_schedule_error)?
            .ok_or_else(|| schedule_not_found(id))
    }

    async fn load_owned(&self, id: ScheduleId, requested_by: UserId) -> Result<Schedule, Error> {
        let schedule = self.load_schedule(id).await?;
        if !schedule.is_owned_by(requested_by) {
            return Err(Error::forbidden("only the creator may change this schedule"));
        }
        Ok(schedule)
    }
}

#[async_trait]
impl<S, U, A, C> ScheduleCommand for ScheduleService<S, U, A, C>
where
    S: ScheduleRepository,
    U: UserRepository,
    A: AvailabilityRepository,
    C: CommentRepository,
{
    async fn create(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, Error> {
        let name = validate_name(request.name)?;
        let owner = request.owner;
        if self
            .users
            .find_by_id(&owner)
            .await
            .map_err(map_user_error)?
            .is_none()
        {
            return Err(Error::not_found(format!("user {owner} not found")));
        }

        let draft = ScheduleDraft {
            owner,
            name,
            memo: strip_nul_chars(request.memo),
            candidates: parse_candidate_names(&request.candidates),
            updated_at: Utc::now(),
        };
        let schedule = self
            .schedules
            .create(&draft)
            .await
            .map_err(map_schedule_error)?;

        info!(
            schedule_id = %schedule.id(),
            owner = %owner,
            candidates = draft.candidates.len(),
            "schedule created"
        );
        Ok(CreateScheduleResponse {
            schedule_id: schedule.id(),
        })
    }

    async fn update(&self, request: UpdateScheduleRequest) -> Result<Schedule, Error> {
        let id = request.schedule_id;
        self.load_owned(id, request.requested_by).await?;
        let name = validate_name(request.name)?;

        let revision = ScheduleRevision {
            schedule_id: id,
            name,
            memo: strip_nul_chars(request.memo),
            appended_candidates: request
                .candidates
                .as_deref()
                .map(parse_candidate_names)
                .unwrap_or_default(),
            updated_at: Utc::now(),
        };
        let schedule = self
            .schedules
            .update(&revision)
            .await
            .map_err(map_schedule_error)?
            .ok_or_else(|| schedule_not_found(id))?;

        info!(
            schedule_id = %id,
            appended = revision.appended_candidates.len(),
            "schedule updated"
        );
        Ok(schedule)
    }

    async fn delete(
        &self,
        request: DeleteScheduleRequest,
    ) -> Result<DeleteScheduleResponse, Error> {
        let id = request.schedule_id;
        match self.load_owned(id, request.requested_by).await {
            Ok(_) => {}
            Err(err) if err.code() == ErrorCode::NotFound => {
                return Ok(DeleteScheduleResponse { deleted: false });
            }
            Err(err) => return Err(err),
        }

        let deleted = self
            .schedules
            .delete_aggregate(id)
            .await
            .map_err(map_schedule_error)?;
        info!(schedule_id = %id, deleted, "schedule deleted");
        Ok(DeleteScheduleResponse { deleted })
    }
}

#[async_trait]
impl<S, U, A, C> ScheduleQuery for ScheduleService<S, U, A, C>
where
    S: ScheduleRepository,
    U: UserRepository,
    A: AvailabilityRepository,
    C: CommentRepository,
{
    async fn detail(
        &self,
        id: ScheduleId,
        viewer: Option<&User>,
    ) -> Result<ScheduleDetail, Error> {
        let schedule = self.load_schedule(id).await?;
        let creator = self
            .users
            .find_by_id(&schedule.created_by())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::internal("schedule creator is missing"))?;
        let candidates = self
            .schedules
            .list_candidates(id)
            .await
            .map_err(map_schedule_error)?;
        let availabilities = self
            .availabilities
            .list_by_schedule(id)
            .await
            .map_err(map_availability_error)?;
        let comments = self
            .comments
            .list_by_schedule(id)
            .await
            .map_err(map_comment_error)?;

        let participant_ids: Vec<UserId> = availabilities
            .iter()
            .map(|entry| entry.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let participants = if participant_ids.is_empty() {
            Vec::new()
        } else {
            self.users
                .find_by_ids(&participant_ids)
                .await
                .map_err(map_user_error)?
        };

        let parts = ScheduleDetailParts {
            schedule,
            creator,
            candidates,
            participants,
            availabilities,
            comments,
        };
        Ok(ScheduleDetail::assemble(parts, viewer))
    }

    async fn list_owned(&self, owner: &UserId) -> Result<Vec<Schedule>, Error> {
        self.schedules
            .list_by_owner(owner)
            .await
            .map_err(map_schedule_error)
    }
}

#[cfg(test)]
#[path = "schedule_service_tests.rs"]
mod tests;
