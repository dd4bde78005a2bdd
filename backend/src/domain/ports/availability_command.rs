//! Driving port for recording a user's availability for one candidate.

use async_trait::async_trait;

use crate::domain::{Availability, CandidateId, Error, ScheduleId, User, UserId};

/// Set `caller`'s availability for a candidate.
///
/// `target_user` is the user named in the request path and must match the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAvailabilityRequest {
    pub schedule_id: ScheduleId,
    pub caller: User,
    pub target_user: UserId,
    pub candidate_id: CandidateId,
    pub availability: Availability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetAvailabilityResponse {
    /// The value now stored.
    pub availability: Availability,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityCommand: Send + Sync {
    async fn set_availability(
        &self,
        request: SetAvailabilityRequest,
    ) -> Result<SetAvailabilityResponse, Error>;
}

/// Fixture command that enforces the path check and echoes the value.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAvailabilityCommand;

#[async_trait]
impl AvailabilityCommand for FixtureAvailabilityCommand {
    async fn set_availability(
        &self,
        request: SetAvailabilityRequest,
    ) -> Result<SetAvailabilityResponse, Error> {
        if request.caller.id() != request.target_user {
            return Err(Error::forbidden("cannot set availability for another user"));
        }
        Ok(SetAvailabilityResponse {
            availability: request.availability,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(0, Ok(Availability::Present))]
    #[case(1, Err(ErrorCode::Forbidden))]
    #[tokio::test]
    async fn fixture_checks_path_user(
        #[case] target: i64,
        #[case] expected: Result<Availability, ErrorCode>,
    ) {
        let request = SetAvailabilityRequest {
            schedule_id: ScheduleId::new(1),
            caller: User::try_from_parts(0, "testuser").expect("valid user"),
            target_user: UserId::new(target).expect("valid id"),
            candidate_id: CandidateId::new(1),
            availability: Availability::Present,
        };
        let result = FixtureAvailabilityCommand
            .set_availability(request)
            .await
            .map(|response| response.availability)
            .map_err(|err| err.code());
        assert_eq!(result, expected);
    }
}
