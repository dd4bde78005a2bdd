//! Port for availability rows keyed by (schedule, user, candidate).
use async_trait::async_trait;

use crate::domain::{AvailabilityEntry, ScheduleId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by availability repository adapters.
    pub enum AvailabilityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "availability repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "availability repository query failed: {message}",
        /// The schedule, user or candidate does not exist.
        MissingReference { message: String } =>
            "availability repository reference missing: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Insert the entry or overwrite the value stored for its key.
    async fn upsert(&self, entry: &AvailabilityEntry) -> Result<(), AvailabilityRepositoryError>;

    /// Every stored entry for a schedule.
    async fn list_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<AvailabilityEntry>, AvailabilityRepositoryError>;
}
