//! Availability upsert service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AvailabilityCommand, AvailabilityRepository, ScheduleRepository, SetAvailabilityRequest,
    SetAvailabilityResponse, UserRepository,
};
use crate::domain::repository_error_mapping::{
    map_availability_error, map_schedule_error, map_user_error,
};
use crate::domain::{AvailabilityEntry, Error};

/// Records a user's availability for one candidate of a schedule.
#[derive(Clone)]
pub struct AvailabilityService<S, U, A> {
    schedules: Arc<S>,
    users: Arc<U>,
    availabilities: Arc<A>,
}

impl<S, U, A> AvailabilityService<S, U, A> {
    pub fn new(schedules: Arc<S>, users: Arc<U>, availabilities: Arc<A>) -> Self {
        Self {
            schedules,
            users,
            availabilities,
        }
    }
}

#[async_trait]
impl<S, U, A> AvailabilityCommand for AvailabilityService<S, U, A>
where
    S: ScheduleRepository,
    U: UserRepository,
    A: AvailabilityRepository,
{
    async fn set_availability(
        &self,
        request: SetAvailabilityRequest,
    ) -> Result<SetAvailabilityResponse, Error> {
        let SetAvailabilityRequest {
            schedule_id,
            caller,
            target_user,
            candidate_id,
            availability,
        } = request;

        if caller.id() != target_user {
            return Err(Error::forbidden("cannot set availability for another user"));
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
        let candidate = self
            .schedules
            .find_candidate(candidate_id)
            .await
            .map_err(map_schedule_error)?
            .ok_or_else(|| Error::not_found(format!("candidate {candidate_id} not found")))?;
        if candidate.schedule_id() != schedule_id {
            return Err(Error::invalid_request(format!(
                "candidate {candidate_id} does not belong to schedule {schedule_id}"
            )));
        }

        self.users.upsert(&caller).await.map_err(map_user_error)?;
        let entry = AvailabilityEntry {
            schedule_id,
            user_id: caller.id(),
            candidate_id,
            availability,
        };
        self.availabilities
            .upsert(&entry)
            .await
            .map_err(map_availability_error)?;

        info!(
            schedule_id = %schedule_id,
            user_id = %caller.id(),
            candidate_id = %candidate_id,
            availability = availability.as_i16(),
            "availability recorded"
        );
        Ok(SetAvailabilityResponse { availability })
    }
}
