//! Schedule aggregate: the event proposal and its date candidates.
//!
//! Candidates are only ever appended. Their identifiers are allocated by the
//! store in insertion order, so ascending [`CandidateId`] is display order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::text::{strip_nul_chars, truncate_to_limit};
use super::UserId;

/// Validation errors for schedule and candidate text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleValidationError {
    #[error("schedule name must not be empty")]
    EmptyScheduleName,
    #[error("candidate name must not be empty")]
    EmptyCandidateName,
}

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a store-generated identifier.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Raw numeric value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

store_id!(
    /// Identifier of a schedule, generated by the store.
    ScheduleId
);
store_id!(
    /// Identifier of a candidate, generated by the store in insertion order.
    CandidateId
);

/// Display name of a schedule: non-blank, truncated to 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleName(String);

impl ScheduleName {
    /// Validate and truncate a schedule name.
    ///
    /// # Examples
    /// ```
    /// use schedule_backend::domain::ScheduleName;
    ///
    /// let name = ScheduleName::new("テスト予定1").expect("non-blank");
    /// assert_eq!(name.as_ref(), "テスト予定1");
    /// assert!(ScheduleName::new("  ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, ScheduleValidationError> {
        let name = strip_nul_chars(name.into());
        if name.trim().is_empty() {
            return Err(ScheduleValidationError::EmptyScheduleName);
        }
        Ok(Self(truncate_to_limit(name)))
    }
}

impl AsRef<str> for ScheduleName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ScheduleName> for String {
    fn from(value: ScheduleName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ScheduleName {
    type Error = ScheduleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Label of one candidate date: trimmed, non-blank, truncated to 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CandidateName(String);

impl CandidateName {
    pub fn new(name: impl Into<String>) -> Result<Self, ScheduleValidationError> {
        let name = strip_nul_chars(name.into());
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ScheduleValidationError::EmptyCandidateName);
        }
        Ok(Self(truncate_to_limit(trimmed.to_owned())))
    }
}

impl AsRef<str> for CandidateName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CandidateName> for String {
    fn from(value: CandidateName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CandidateName {
    type Error = ScheduleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Split free-form candidate text into candidate names.
///
/// One candidate per line (`\n` or `\r\n`); lines are trimmed and blank lines
/// dropped. Submission order is preserved.
///
/// # Examples
/// ```
/// use schedule_backend::domain::parse_candidate_names;
///
/// let names = parse_candidate_names("テスト候補1\r\n\n  テスト候補2 \n");
/// let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
/// assert_eq!(names, ["テスト候補1", "テスト候補2"]);
/// ```
#[must_use]
pub fn parse_candidate_names(text: &str) -> Vec<CandidateName> {
    text.lines()
        .filter_map(|line| CandidateName::new(line).ok())
        .collect()
}

/// Persisted schedule header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(rename = "scheduleId")]
    id: ScheduleId,
    #[serde(rename = "scheduleName")]
    name: ScheduleName,
    memo: String,
    created_by: UserId,
    updated_at: DateTime<Utc>,
}

impl Schedule {
    #[must_use]
    pub fn new(
        id: ScheduleId,
        name: ScheduleName,
        memo: impl Into<String>,
        created_by: UserId,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            memo: memo.into(),
            created_by,
            updated_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> ScheduleId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &ScheduleName {
        &self.name
    }

    #[must_use]
    pub fn memo(&self) -> &str {
        self.memo.as_str()
    }

    #[must_use]
    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user` created this schedule.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.created_by == user
    }
}

/// One proposed date/time option under a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(rename = "candidateId")]
    id: CandidateId,
    #[serde(rename = "candidateName")]
    name: CandidateName,
    schedule_id: ScheduleId,
}

impl Candidate {
    #[must_use]
    pub fn new(id: CandidateId, name: CandidateName, schedule_id: ScheduleId) -> Self {
        Self {
            id,
            name,
            schedule_id,
        }
    }

    #[must_use]
    pub fn id(&self) -> CandidateId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &CandidateName {
        &self.name
    }

    #[must_use]
    pub fn schedule_id(&self) -> ScheduleId {
        self.schedule_id
    }
}

/// A schedule about to be inserted together with its initial candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub owner: UserId,
    pub name: ScheduleName,
    pub memo: String,
    pub candidates: Vec<CandidateName>,
    pub updated_at: DateTime<Utc>,
}

/// An edit to an existing schedule: rename, new memo and appended candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRevision {
    pub schedule_id: ScheduleId,
    pub name: ScheduleName,
    pub memo: String,
    pub appended_candidates: Vec<CandidateName>,
    pub updated_at: DateTime<Utc>,
}
