//! Test utilities for the backend crate.
//!
//! [`InMemoryScheduleStore`] implements every driven port over a single mutex
//! so unit tests (in `src/`) and integration tests (in `tests/`) can exercise
//! the real services without PostgreSQL. It mirrors the relational rules the
//! persistence adapter relies on: generated ids increase monotonically,
//! composite keys are unique, and writes that reference missing rows fail with
//! `MissingReference`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AvailabilityRepository, AvailabilityRepositoryError, CommentRepository,
    CommentRepositoryError, ScheduleRepository, ScheduleRepositoryError, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AvailabilityEntry, Candidate, CandidateId, CandidateName, Comment, Schedule, ScheduleDraft,
    ScheduleId, ScheduleRevision, User, UserId,
};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    schedules: BTreeMap<ScheduleId, Schedule>,
    candidates: BTreeMap<CandidateId, Candidate>,
    availabilities: HashMap<(ScheduleId, UserId, CandidateId), AvailabilityEntry>,
    comments: HashMap<(ScheduleId, UserId), Comment>,
    next_schedule_id: i64,
    next_candidate_id: i64,
    unavailable: bool,
}

impl State {
    fn push_candidates(&mut self, schedule_id: ScheduleId, names: &[CandidateName]) {
        for name in names {
            self.next_candidate_id += 1;
            let id = CandidateId::new(self.next_candidate_id);
            self.candidates
                .insert(id, Candidate::new(id, name.clone(), schedule_id));
        }
    }
}

/// Shared in-memory implementation of the driven ports.
#[derive(Debug, Default)]
pub struct InMemoryScheduleStore {
    state: Mutex<State>,
}

/// Row counts for one schedule, for cascade assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRowCounts {
    pub schedules: usize,
    pub candidates: usize,
    pub availabilities: usize,
    pub comments: usize,
}

impl InMemoryScheduleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store that already knows `users`.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.lock() {
            state
                .users
                .extend(users.into_iter().map(|user| (user.id(), user)));
        }
        store
    }

    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.unavailable = unavailable;
        }
    }

    /// Count the rows stored for `schedule_id` in each table.
    #[must_use]
    pub fn row_counts(&self, schedule_id: ScheduleId) -> ScheduleRowCounts {
        let Ok(state) = self.state.lock() else {
            return ScheduleRowCounts {
                schedules: 0,
                candidates: 0,
                availabilities: 0,
                comments: 0,
            };
        };
        ScheduleRowCounts {
            schedules: usize::from(state.schedules.contains_key(&schedule_id)),
            candidates: state
                .candidates
                .values()
                .filter(|c| c.schedule_id() == schedule_id)
                .count(),
            availabilities: state
                .availabilities
                .keys()
                .filter(|(s, _, _)| *s == schedule_id)
                .count(),
            comments: state
                .comments
                .keys()
                .filter(|(s, _)| *s == schedule_id)
                .count(),
        }
    }

    /// Availability rows stored for `schedule_id`, in no particular order.
    #[must_use]
    pub fn availability_rows(&self, schedule_id: ScheduleId) -> Vec<AvailabilityEntry> {
        self.state
            .lock()
            .map(|state| {
                state
                    .availabilities
                    .values()
                    .filter(|entry| entry.schedule_id == schedule_id)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        let state = self
            .state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())?;
        if state.unavailable {
            return Err("in-memory store marked unavailable".to_owned());
        }
        Ok(state)
    }
}

#[async_trait]
impl UserRepository for InMemoryScheduleStore {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::connection)?;
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleStore {
    async fn create(&self, draft: &ScheduleDraft) -> Result<Schedule, ScheduleRepositoryError> {
        let mut state = self.lock().map_err(ScheduleRepositoryError::connection)?;
        if !state.users.contains_key(&draft.owner) {
            return Err(ScheduleRepositoryError::missing_reference(format!(
                "user {} does not exist",
                draft.owner
            )));
        }
        state.next_schedule_id += 1;
        let id = ScheduleId::new(state.next_schedule_id);
        let schedule = Schedule::new(
            id,
            draft.name.clone(),
            draft.memo.clone(),
            draft.owner,
            draft.updated_at,
        );
        state.schedules.insert(id, schedule.clone());
        state.push_candidates(id, &draft.candidates);
        Ok(schedule)
    }

    async fn find_by_id(
        &self,
        id: ScheduleId,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        let state = self.lock().map_err(ScheduleRepositoryError::connection)?;
        Ok(state.schedules.get(&id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError> {
        let state = self.lock().map_err(ScheduleRepositoryError::connection)?;
        let mut schedules: Vec<Schedule> = state
            .schedules
            .values()
            .filter(|s| s.created_by() == *owner)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| {
            b.updated_at()
                .cmp(&a.updated_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(schedules)
    }

    async fn update(
        &self,
        revision: &ScheduleRevision,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        let mut state = self.lock().map_err(ScheduleRepositoryError::connection)?;
        let Some(existing) = state.schedules.get(&revision.schedule_id) else {
            return Ok(None);
        };
        let updated = Schedule::new(
            revision.schedule_id,
            revision.name.clone(),
            revision.memo.clone(),
            existing.created_by(),
            revision.updated_at,
        );
        state.schedules.insert(revision.schedule_id, updated.clone());
        state.push_candidates(revision.schedule_id, &revision.appended_candidates);
        Ok(Some(updated))
    }

    async fn delete_aggregate(&self, id: ScheduleId) -> Result<bool, ScheduleRepositoryError> {
        let mut state = self.lock().map_err(ScheduleRepositoryError::connection)?;
        state.availabilities.retain(|(s, _, _), _| *s != id);
        state.comments.retain(|(s, _), _| *s != id);
        state.candidates.retain(|_, c| c.schedule_id() != id);
        Ok(state.schedules.remove(&id).is_some())
    }

    async fn list_candidates(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<Candidate>, ScheduleRepositoryError> {
        let state = self.lock().map_err(ScheduleRepositoryError::connection)?;
        Ok(state
            .candidates
            .values()
            .filter(|c| c.schedule_id() == schedule_id)
            .cloned()
            .collect())
    }

    async fn find_candidate(
        &self,
        id: CandidateId,
    ) -> Result<Option<Candidate>, ScheduleRepositoryError> {
        let state = self.lock().map_err(ScheduleRepositoryError::connection)?;
        Ok(state.candidates.get(&id).cloned())
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryScheduleStore {
    async fn upsert(&self, entry: &AvailabilityEntry) -> Result<(), AvailabilityRepositoryError> {
        let mut state = self
            .lock()
            .map_err(AvailabilityRepositoryError::connection)?;
        let references_exist = state.schedules.contains_key(&entry.schedule_id)
            && state.users.contains_key(&entry.user_id)
            && state.candidates.contains_key(&entry.candidate_id);
        if !references_exist {
            return Err(AvailabilityRepositoryError::missing_reference(
                "schedule, user or candidate does not exist",
            ));
        }
        state.availabilities.insert(
            (entry.schedule_id, entry.user_id, entry.candidate_id),
            *entry,
        );
        Ok(())
    }

    async fn list_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<AvailabilityEntry>, AvailabilityRepositoryError> {
        Ok(self
            .lock()
            .map_err(AvailabilityRepositoryError::connection)?
            .availabilities
            .values()
            .filter(|entry| entry.schedule_id == schedule_id)
            .copied()
            .collect())
    }
}

#[async_trait]
impl CommentRepository for InMemoryScheduleStore {
    async fn upsert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut state = self.lock().map_err(CommentRepositoryError::connection)?;
        if !state.schedules.contains_key(&comment.schedule_id)
            || !state.users.contains_key(&comment.user_id)
        {
            return Err(CommentRepositoryError::missing_reference(
                "schedule or user does not exist",
            ));
        }
        state
            .comments
            .insert((comment.schedule_id, comment.user_id), comment.clone());
        Ok(())
    }

    async fn list_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        Ok(self
            .lock()
            .map_err(CommentRepositoryError::connection)?
            .comments
            .values()
            .filter(|comment| comment.schedule_id == schedule_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Availability, CommentText, ScheduleName, parse_candidate_names};
    use chrono::Utc;

    fn owner() -> User {
        User::try_from_parts(0, "testuser").expect("valid user")
    }

    fn draft(candidates: &str) -> ScheduleDraft {
        ScheduleDraft {
            owner: owner().id(),
            name: ScheduleName::new("テスト予定1").expect("valid name"),
            memo: String::new(),
            candidates: parse_candidate_names(candidates),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn candidate_ids_increase_across_schedules() {
        let store = InMemoryScheduleStore::with_users([owner()]);
        let first = store.create(&draft("a\nb")).await.expect("create");
        let second = store.create(&draft("c")).await.expect("create");

        let ids: Vec<i64> = store
            .list_candidates(second.id())
            .await
            .expect("list")
            .iter()
            .map(|c| c.id().get())
            .collect();
        assert_eq!(ids, [3]);
        assert!(second.id() > first.id());
    }

    #[tokio::test]
    async fn create_rejects_unknown_owner() {
        let store = InMemoryScheduleStore::new();
        let err = store.create(&draft("a")).await.expect_err("no owner");
        assert!(matches!(
            err,
            ScheduleRepositoryError::MissingReference { .. }
        ));
    }

    #[tokio::test]
    async fn delete_removes_every_dependent_row() {
        let store = InMemoryScheduleStore::with_users([owner()]);
        let schedule = store.create(&draft("a")).await.expect("create");
        let candidate = store.list_candidates(schedule.id()).await.expect("list")[0].clone();
        AvailabilityRepository::upsert(
            &store,
            &AvailabilityEntry {
                schedule_id: schedule.id(),
                user_id: owner().id(),
                candidate_id: candidate.id(),
                availability: Availability::Present,
            },
        )
        .await
        .expect("availability");
        CommentRepository::upsert(
            &store,
            &Comment {
                schedule_id: schedule.id(),
                user_id: owner().id(),
                text: CommentText::new("hi"),
            },
        )
        .await
        .expect("comment");

        assert!(store.delete_aggregate(schedule.id()).await.expect("delete"));
        assert_eq!(
            store.row_counts(schedule.id()),
            ScheduleRowCounts {
                schedules: 0,
                candidates: 0,
                availabilities: 0,
                comments: 0,
            }
        );
        assert!(!store.delete_aggregate(schedule.id()).await.expect("repeat"));
    }

    #[tokio::test]
    async fn unavailable_store_reports_connection_errors() {
        let store = InMemoryScheduleStore::new();
        store.set_unavailable(true);
        let err = UserRepository::find_by_id(&store, &owner().id())
            .await
            .expect_err("unavailable");
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }
}
