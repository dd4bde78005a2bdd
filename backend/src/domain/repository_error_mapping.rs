//! Translation of driven-port errors into domain errors.
//!
//! Connection failures surface as `service_unavailable`, query failures as
//! `internal_error`, and foreign-key violations as `not_found`.

use crate::domain::Error;
use crate::domain::ports::{
    AvailabilityRepositoryError, CommentRepositoryError, ScheduleRepositoryError,
    UserPersistenceError,
};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_schedule_error(error: ScheduleRepositoryError) -> Error {
    match error {
        ScheduleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("schedule repository unavailable: {message}"))
        }
        ScheduleRepositoryError::Query { message } => {
            Error::internal(format!("schedule repository error: {message}"))
        }
        ScheduleRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

pub(crate) fn map_availability_error(error: AvailabilityRepositoryError) -> Error {
    match error {
        AvailabilityRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("availability repository unavailable: {message}"))
        }
        AvailabilityRepositoryError::Query { message } => {
            Error::internal(format!("availability repository error: {message}"))
        }
        AvailabilityRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

pub(crate) fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(ScheduleRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ScheduleRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(ScheduleRepositoryError::missing_reference("user 9"), ErrorCode::NotFound)]
    fn schedule_errors_map_by_kind(
        #[case] error: ScheduleRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_schedule_error(error).code(), expected);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    fn user_errors_map_by_kind(#[case] error: UserPersistenceError, #[case] expected: ErrorCode) {
        assert_eq!(map_user_error(error).code(), expected);
    }

    #[rstest]
    fn availability_and_comment_missing_references_are_not_found() {
        assert_eq!(
            map_availability_error(AvailabilityRepositoryError::missing_reference("c")).code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            map_comment_error(CommentRepositoryError::missing_reference("s")).code(),
            ErrorCode::NotFound
        );
    }
}
