//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by the persistence adapter and
//! the in-memory test store. Driving ports (commands, queries and the login
//! service) are called by the HTTP adapter; each ships a `Fixture*`
//! implementation for handler tests.

mod macros;
pub(crate) use macros::define_port_error;

mod availability_command;
mod availability_repository;
mod comment_command;
mod comment_repository;
mod login_service;
mod schedule_command;
mod schedule_query;
mod schedule_repository;
mod user_repository;

#[cfg(test)]
pub use availability_command::MockAvailabilityCommand;
pub use availability_command::{
    AvailabilityCommand, FixtureAvailabilityCommand, SetAvailabilityRequest,
    SetAvailabilityResponse,
};
#[cfg(test)]
pub use availability_repository::MockAvailabilityRepository;
pub use availability_repository::{AvailabilityRepository, AvailabilityRepositoryError};
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_command::{
    CommentCommand, FixtureCommentCommand, SetCommentRequest, SetCommentResponse,
};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use schedule_command::MockScheduleCommand;
pub use schedule_command::{
    CreateScheduleRequest, CreateScheduleResponse, DeleteScheduleRequest, DeleteScheduleResponse,
    FixtureScheduleCommand, ScheduleCommand, UpdateScheduleRequest,
};
pub use schedule_query::{FixtureScheduleQuery, ScheduleQuery};
#[cfg(test)]
pub use schedule_repository::MockScheduleRepository;
pub use schedule_repository::{ScheduleRepository, ScheduleRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
