//! Shared error classification for the Diesel repositories.
//!
//! Every adapter funnels pool and Diesel failures through [`DbFailure`], then
//! converts into its own port error. Raw database messages are logged at
//! debug level and never copied into port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    AvailabilityRepositoryError, CommentRepositoryError, ScheduleRepositoryError,
    UserPersistenceError,
};

use super::pool::PoolError;

/// Storage failure classified by how callers should react to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    Connection(String),
    Query(String),
    /// A foreign key pointed at a row that does not exist.
    MissingReference(String),
}

impl From<PoolError> for DbFailure {
    fn from(error: PoolError) -> Self {
        Self::Connection(error.into_message())
    }
}

impl From<DieselError> for DbFailure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                let constraint = info.constraint_name().unwrap_or("unknown constraint");
                Self::MissingReference(format!("referenced row does not exist ({constraint})"))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            _ => Self::Query("database error".to_owned()),
        }
    }
}

/// Row conversion failures mean the stored data is corrupt.
pub(crate) fn corrupt_row(message: String) -> DbFailure {
    debug!(%message, "stored row failed validation");
    DbFailure::Query(message)
}

/// Collect row conversion results, mapping the first error to a query failure.
pub(crate) fn collect_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, DbFailure>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(corrupt_row)
}

/// Convert an optional row, mapping a conversion error to a query failure.
pub(crate) fn convert_optional<R, T>(row: Option<R>) -> Result<Option<T>, DbFailure>
where
    T: TryFrom<R, Error = String>,
{
    row.map(T::try_from).transpose().map_err(corrupt_row)
}

macro_rules! impl_from_db_failure {
    ($error:ident) => {
        impl From<DbFailure> for $error {
            fn from(failure: DbFailure) -> Self {
                match failure {
                    DbFailure::Connection(message) => Self::connection(message),
                    DbFailure::Query(message) => Self::query(message),
                    DbFailure::MissingReference(message) => Self::missing_reference(message),
                }
            }
        }
    };
}

impl_from_db_failure!(ScheduleRepositoryError);
impl_from_db_failure!(AvailabilityRepositoryError);
impl_from_db_failure!(CommentRepositoryError);

impl From<DbFailure> for UserPersistenceError {
    fn from(failure: DbFailure) -> Self {
        match failure {
            DbFailure::Connection(message) => Self::connection(message),
            DbFailure::Query(message) | DbFailure::MissingReference(message) => {
                Self::query(message)
            }
        }
    }
}
