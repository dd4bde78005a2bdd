//! Driving port for reading schedules.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Error, Schedule, ScheduleDetail, ScheduleDetailParts, ScheduleId, ScheduleName, User, UserId,
};

/// Read-side use cases: the schedule page and the owner's listing.
#[async_trait]
pub trait ScheduleQuery: Send + Sync {
    /// Assemble the schedule page as seen by `viewer`.
    ///
    /// Fails with `not_found` when the schedule does not exist.
    async fn detail(&self, id: ScheduleId, viewer: Option<&User>)
    -> Result<ScheduleDetail, Error>;

    /// Schedules created by `owner`, most recently updated first.
    async fn list_owned(&self, owner: &UserId) -> Result<Vec<Schedule>, Error>;
}

/// Fixture query that returns an empty schedule created by the viewer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScheduleQuery;

#[async_trait]
impl ScheduleQuery for FixtureScheduleQuery {
    async fn detail(
        &self,
        id: ScheduleId,
        viewer: Option<&User>,
    ) -> Result<ScheduleDetail, Error> {
        let viewer = viewer.ok_or_else(|| Error::not_found("schedule not found"))?;
        let name = ScheduleName::new("fixture schedule")
            .map_err(|err| Error::internal(err.to_string()))?;
        let parts = ScheduleDetailParts {
            schedule: Schedule::new(id, name, "", viewer.id(), Utc::now()),
            creator: viewer.clone(),
            candidates: Vec::new(),
            participants: Vec::new(),
            availabilities: Vec::new(),
            comments: Vec::new(),
        };
        Ok(ScheduleDetail::assemble(parts, Some(viewer)))
    }

    async fn list_owned(&self, _owner: &UserId) -> Result<Vec<Schedule>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_detail_lists_viewer_only() {
        let viewer = User::try_from_parts(3, "carol").expect("valid user");
        let detail = FixtureScheduleQuery
            .detail(ScheduleId::new(4), Some(&viewer))
            .await
            .expect("fixture detail");
        assert_eq!(detail.schedule().id(), ScheduleId::new(4));
        assert_eq!(detail.users(), std::slice::from_ref(&viewer));
        assert!(detail.candidates().is_empty());
    }

    #[tokio::test]
    async fn fixture_list_is_empty() {
        let owner = UserId::new(3).expect("valid id");
        let schedules = FixtureScheduleQuery
            .list_owned(&owner)
            .await
            .expect("fixture list");
        assert!(schedules.is_empty());
    }
}
