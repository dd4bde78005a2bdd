//! Per-candidate attendance status.

use serde::{Deserialize, Serialize};

use super::{CandidateId, ScheduleId, UserId};

/// Attendance status a user reports for one candidate.
///
/// Stored as a small integer. Users without a stored row are treated as
/// [`Availability::Undecided`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Availability {
    Absent = 0,
    #[default]
    Undecided = 1,
    Present = 2,
}

/// Raised when a stored or submitted value is outside `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("availability must be 0, 1 or 2 (got {0})")]
pub struct InvalidAvailability(pub i64);

impl Availability {
    /// Numeric wire and storage representation.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for Availability {
    type Error = InvalidAvailability;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Undecided),
            2 => Ok(Self::Present),
            other => Err(InvalidAvailability(i64::from(other))),
        }
    }
}

impl TryFrom<i64> for Availability {
    type Error = InvalidAvailability;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        i16::try_from(value)
            .map_err(|_| InvalidAvailability(value))
            .and_then(Self::try_from)
    }
}

impl From<Availability> for i16 {
    fn from(value: Availability) -> Self {
        value.as_i16()
    }
}

/// One stored availability row, keyed by (schedule, user, candidate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityEntry {
    pub schedule_id: ScheduleId,
    pub user_id: UserId,
    pub candidate_id: CandidateId,
    pub availability: Availability,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Availability::Absent)]
    #[case(1, Availability::Undecided)]
    #[case(2, Availability::Present)]
    fn accepts_known_values(#[case] raw: i16, #[case] expected: Availability) {
        assert_eq!(Availability::try_from(raw), Ok(expected));
        assert_eq!(expected.as_i16(), raw);
    }

    #[rstest]
    #[case(-1)]
    #[case(3)]
    #[case(i64::from(i16::MAX) + 1)]
    fn rejects_out_of_range_values(#[case] raw: i64) {
        assert_eq!(Availability::try_from(raw), Err(InvalidAvailability(raw)));
    }

    #[rstest]
    fn defaults_to_undecided() {
        assert_eq!(Availability::default(), Availability::Undecided);
    }

    #[rstest]
    fn serialises_as_integer() {
        let value = serde_json::to_value(Availability::Present).expect("serialise");
        assert_eq!(value, serde_json::json!(2));
        assert!(serde_json::from_value::<Availability>(serde_json::json!(5)).is_err());
    }
}
