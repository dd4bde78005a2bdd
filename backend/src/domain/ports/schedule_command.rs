//! Driving port for schedule mutations.
//!
//! Requests carry raw text as submitted; implementations validate the schedule
//! name, split the candidate text into lines and enforce ownership.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, Schedule, ScheduleId, ScheduleName, UserId};

/// Create a schedule owned by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateScheduleRequest {
    pub owner: UserId,
    pub name: String,
    pub memo: String,
    /// One candidate per line.
    pub candidates: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateScheduleResponse {
    pub schedule_id: ScheduleId,
}

/// Rename a schedule, replace its memo and append candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateScheduleRequest {
    pub schedule_id: ScheduleId,
    pub requested_by: UserId,
    pub name: String,
    pub memo: String,
    /// New candidates to append, one per line. `None` appends nothing.
    pub candidates: Option<String>,
}

/// Delete a schedule and everything attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteScheduleRequest {
    pub schedule_id: ScheduleId,
    pub requested_by: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteScheduleResponse {
    /// `false` when the schedule was already gone.
    pub deleted: bool,
}

/// Driving port for creating, editing and deleting schedules.
///
/// # Errors
///
/// - `invalid_request` for a blank schedule name.
/// - `not_found` when the owner or the schedule does not exist.
/// - `forbidden` when someone other than the creator edits or deletes.
/// - `service_unavailable` / `internal_error` for persistence failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleCommand: Send + Sync {
    async fn create(&self, request: CreateScheduleRequest)
    -> Result<CreateScheduleResponse, Error>;

    async fn update(&self, request: UpdateScheduleRequest) -> Result<Schedule, Error>;

    async fn delete(&self, request: DeleteScheduleRequest)
    -> Result<DeleteScheduleResponse, Error>;
}

/// Fixture implementation that validates input but stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScheduleCommand;

fn fixture_name(raw: String) -> Result<ScheduleName, Error> {
    ScheduleName::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

#[async_trait]
impl ScheduleCommand for FixtureScheduleCommand {
    async fn create(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, Error> {
        fixture_name(request.name)?;
        Ok(CreateScheduleResponse {
            schedule_id: ScheduleId::new(1),
        })
    }

    async fn update(&self, request: UpdateScheduleRequest) -> Result<Schedule, Error> {
        let name = fixture_name(request.name)?;
        Ok(Schedule::new(
            request.schedule_id,
            name,
            request.memo,
            request.requested_by,
            Utc::now(),
        ))
    }

    async fn delete(
        &self,
        _request: DeleteScheduleRequest,
    ) -> Result<DeleteScheduleResponse, Error> {
        Ok(DeleteScheduleResponse { deleted: true })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner() -> UserId {
        UserId::new(0).expect("valid id")
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_rejects_blank_names(owner: UserId) {
        let err = FixtureScheduleCommand
            .create(CreateScheduleRequest {
                owner,
                name: "  ".into(),
                memo: String::new(),
                candidates: String::new(),
            })
            .await
            .expect_err("blank name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_update_echoes_request(owner: UserId) {
        let schedule = FixtureScheduleCommand
            .update(UpdateScheduleRequest {
                schedule_id: ScheduleId::new(9),
                requested_by: owner,
                name: "renamed".into(),
                memo: "memo".into(),
                candidates: None,
            })
            .await
            .expect("fixture update succeeds");
        assert_eq!(schedule.id(), ScheduleId::new(9));
        assert_eq!(schedule.name().as_ref(), "renamed");
        assert!(schedule.is_owned_by(owner));
    }
}
