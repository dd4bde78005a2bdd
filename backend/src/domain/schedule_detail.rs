//! Read model for the schedule page.
//!
//! Built from the rows the repositories return. Lookups are get-or-default:
//! a missing availability row reads as [`Availability::Undecided`] and a
//! missing comment reads as the empty string.

use std::collections::HashMap;

use super::{
    Availability, AvailabilityEntry, Candidate, CandidateId, Comment, CommentText, Schedule, User,
    UserId,
};

/// Rows loaded for one schedule, before assembly.
#[derive(Debug, Clone)]
pub struct ScheduleDetailParts {
    pub schedule: Schedule,
    pub creator: User,
    pub candidates: Vec<Candidate>,
    /// Users referenced by `availabilities`.
    pub participants: Vec<User>,
    pub availabilities: Vec<AvailabilityEntry>,
    pub comments: Vec<Comment>,
}

/// Everything needed to render one schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDetail {
    schedule: Schedule,
    creator: User,
    candidates: Vec<Candidate>,
    users: Vec<User>,
    availabilities: HashMap<(UserId, CandidateId), Availability>,
    comments: HashMap<UserId, CommentText>,
}

impl ScheduleDetail {
    /// Assemble the read model.
    ///
    /// Candidates are ordered by id. Users are everyone with at least one
    /// availability row, ordered by id, with `viewer` moved (or added) to the
    /// front.
    #[must_use]
    pub fn assemble(parts: ScheduleDetailParts, viewer: Option<&User>) -> Self {
        let ScheduleDetailParts {
            schedule,
            creator,
            mut candidates,
            mut participants,
            availabilities,
            comments,
        } = parts;

        candidates.sort_by_key(Candidate::id);

        participants.sort_by_key(User::id);
        participants.dedup_by_key(|user| user.id());
        let users = match viewer {
            Some(viewer) => std::iter::once(viewer.clone())
                .chain(participants.into_iter().filter(|u| u.id() != viewer.id()))
                .collect(),
            None => participants,
        };

        let availabilities = availabilities
            .into_iter()
            .map(|entry| ((entry.user_id, entry.candidate_id), entry.availability))
            .collect();
        let comments = comments
            .into_iter()
            .map(|comment| (comment.user_id, comment.text))
            .collect();

        Self {
            schedule,
            creator,
            candidates,
            users,
            availabilities,
            comments,
        }
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[must_use]
    pub fn creator(&self) -> &User {
        &self.creator
    }

    /// Candidates in insertion order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Users to display, viewer first.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Stored availability, or [`Availability::Undecided`] when unset.
    #[must_use]
    pub fn availability_for(&self, user: UserId, candidate: CandidateId) -> Availability {
        self.availabilities
            .get(&(user, candidate))
            .copied()
            .unwrap_or_default()
    }

    /// Stored comment, or `""` when the user has not commented.
    #[must_use]
    pub fn comment_for(&self, user: UserId) -> &str {
        self.comments.get(&user).map_or("", AsRef::as_ref)
    }

    /// Comments keyed by author.
    pub fn comments(&self) -> impl Iterator<Item = (UserId, &str)> {
        self.comments
            .iter()
            .map(|(user, text)| (*user, text.as_ref()))
    }
}
