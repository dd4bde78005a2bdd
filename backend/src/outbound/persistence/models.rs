//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-validate stored values and report corrupt rows as `String`
//! messages, which repositories surface as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Availability, AvailabilityEntry, Candidate, CandidateId, CandidateName, Comment, CommentText,
    Schedule, ScheduleId, ScheduleName, User, UserId,
};

use super::schema::{availabilities, candidates, comments, schedules, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::try_from_parts(row.id, row.username)
            .map_err(|err| format!("invalid user row {}: {err}", row.id))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: i64,
    pub username: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScheduleRow {
    pub id: i64,
    pub schedule_name: String,
    pub memo: String,
    pub created_by: i64,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ScheduleRow> for Schedule {
    type Error = String;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        let name = ScheduleName::new(row.schedule_name)
            .map_err(|err| format!("invalid schedule row {}: {err}", row.id))?;
        let created_by = UserId::new(row.created_by)
            .map_err(|err| format!("invalid schedule row {}: {err}", row.id))?;
        Ok(Schedule::new(
            ScheduleId::new(row.id),
            name,
            row.memo,
            created_by,
            row.updated_at,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schedules)]
pub(crate) struct NewScheduleRow<'a> {
    pub schedule_name: &'a str,
    pub memo: &'a str,
    pub created_by: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schedules)]
pub(crate) struct ScheduleUpdate<'a> {
    pub schedule_name: &'a str,
    pub memo: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = candidates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CandidateRow {
    pub id: i64,
    pub candidate_name: String,
    pub schedule_id: i64,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = String;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        let name = CandidateName::new(row.candidate_name)
            .map_err(|err| format!("invalid candidate row {}: {err}", row.id))?;
        Ok(Candidate::new(
            CandidateId::new(row.id),
            name,
            ScheduleId::new(row.schedule_id),
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = candidates)]
pub(crate) struct NewCandidateRow<'a> {
    pub candidate_name: &'a str,
    pub schedule_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = availabilities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AvailabilityRow {
    pub candidate_id: i64,
    pub user_id: i64,
    pub schedule_id: i64,
    pub availability: i16,
}

impl From<&AvailabilityEntry> for AvailabilityRow {
    fn from(entry: &AvailabilityEntry) -> Self {
        Self {
            candidate_id: entry.candidate_id.get(),
            user_id: entry.user_id.get(),
            schedule_id: entry.schedule_id.get(),
            availability: entry.availability.as_i16(),
        }
    }
}

impl TryFrom<AvailabilityRow> for AvailabilityEntry {
    type Error = String;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|err| format!("invalid availability row: {err}"))?;
        let availability = Availability::try_from(row.availability)
            .map_err(|err| format!("invalid availability row: {err}"))?;
        Ok(AvailabilityEntry {
            schedule_id: ScheduleId::new(row.schedule_id),
            user_id,
            candidate_id: CandidateId::new(row.candidate_id),
            availability,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub schedule_id: i64,
    pub user_id: i64,
    pub comment: String,
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            schedule_id: comment.schedule_id.get(),
            user_id: comment.user_id.get(),
            comment: comment.text.as_ref().to_owned(),
        }
    }
}

impl TryFrom<CommentRow> for Comment {
    type Error = String;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        let user_id =
            UserId::new(row.user_id).map_err(|err| format!("invalid comment row: {err}"))?;
        Ok(Comment {
            schedule_id: ScheduleId::new(row.schedule_id),
            user_id,
            text: CommentText::new(row.comment),
        })
    }
}
