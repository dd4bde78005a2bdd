//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed schedule model used by the API and
//! persistence layers, plus the services implementing the driving ports.
//! Types are immutable once constructed; constructors enforce invariants.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `UserId`, `Username`, `LoginIdentity`: identities.
//! - `Schedule`, `Candidate`, `ScheduleDetail`: the schedule aggregate.
//! - `Availability`, `Comment`: per-user responses to a schedule.
//! - `ScheduleService`, `AvailabilityService`, `CommentService`,
//!   `UserAccountService`: driving-port implementations.

pub mod auth;
pub mod availability;
pub mod availability_service;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod ports;
mod repository_error_mapping;
pub mod schedule;
pub mod schedule_detail;
pub mod schedule_service;
pub mod text;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::auth::{LoginIdentity, LoginValidationError};
pub use self::availability::{Availability, AvailabilityEntry, InvalidAvailability};
pub use self::availability_service::AvailabilityService;
pub use self::comment::{Comment, CommentText};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::schedule::{
    Candidate, CandidateId, CandidateName, Schedule, ScheduleDraft, ScheduleId, ScheduleName,
    ScheduleRevision, ScheduleValidationError, parse_candidate_names,
};
pub use self::schedule_detail::{ScheduleDetail, ScheduleDetailParts};
pub use self::schedule_service::ScheduleService;
pub use self::text::MAX_TEXT_CHARS;
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserValidationError, Username};
pub use self::user_account_service::UserAccountService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use schedule_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
