//! Port for the schedule aggregate: schedules and their candidates.
//!
//! Adapters must apply [`ScheduleRepository::create`],
//! [`ScheduleRepository::update`] and [`ScheduleRepository::delete_aggregate`]
//! atomically. The aggregate delete removes availability and comment rows,
//! then candidates, then the schedule itself.

use async_trait::async_trait;

use crate::domain::{
    Candidate, CandidateId, Schedule, ScheduleDraft, ScheduleId, ScheduleRevision, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by schedule repository adapters.
    pub enum ScheduleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "schedule repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "schedule repository query failed: {message}",
        /// A foreign key pointed at a row that does not exist.
        MissingReference { message: String } =>
            "schedule repository reference missing: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Insert the schedule and its initial candidates in one transaction.
    async fn create(&self, draft: &ScheduleDraft) -> Result<Schedule, ScheduleRepositoryError>;

    /// Fetch a schedule header.
    async fn find_by_id(&self, id: ScheduleId)
    -> Result<Option<Schedule>, ScheduleRepositoryError>;

    /// Schedules created by `owner`, most recently updated first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Schedule>, ScheduleRepositoryError>;

    /// Apply a revision in one transaction.
    ///
    /// Returns `None` when the schedule no longer exists.
    async fn update(
        &self,
        revision: &ScheduleRevision,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError>;

    /// Delete the schedule and every dependent row in one transaction.
    ///
    /// Returns `false` when there was no schedule to delete.
    async fn delete_aggregate(&self, id: ScheduleId) -> Result<bool, ScheduleRepositoryError>;

    /// Candidates of a schedule in ascending id order.
    async fn list_candidates(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<Candidate>, ScheduleRepositoryError>;

    /// Fetch one candidate regardless of its schedule.
    async fn find_candidate(
        &self,
        id: CandidateId,
    ) -> Result<Option<Candidate>, ScheduleRepositoryError>;
}
