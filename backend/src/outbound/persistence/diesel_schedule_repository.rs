//! PostgreSQL-backed `ScheduleRepository` implementation using Diesel ORM.
//!
//! Writes that touch more than one table run in a single transaction so a
//! failure never leaves a schedule without its candidates, or candidates
//! without their schedule.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{ScheduleRepository, ScheduleRepositoryError};
use crate::domain::{
    Candidate, CandidateId, CandidateName, Schedule, ScheduleDraft, ScheduleId,
    ScheduleRevision, UserId,
};

use super::diesel_helpers::{DbFailure, collect_rows, convert_optional, corrupt_row};
use super::models::{CandidateRow, NewCandidateRow, NewScheduleRow, ScheduleRow, ScheduleUpdate};
use super::pool::DbPool;
use super::schema::{availabilities, candidates, comments, schedules};

/// Diesel-backed implementation of the `ScheduleRepository` port.
#[derive(Clone)]
pub struct DieselScheduleRepository {
    pool: DbPool,
}

impl DieselScheduleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn insert_candidates<C>(
    conn: &mut C,
    schedule_id: ScheduleId,
    names: &[CandidateName],
) -> Result<(), DbFailure>
where
    C: AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    if names.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewCandidateRow<'_>> = names
        .iter()
        .map(|name| NewCandidateRow {
            candidate_name: name.as_ref(),
            schedule_id: schedule_id.get(),
        })
        .collect();

    diesel::insert_into(candidates::table)
        .values(&rows)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ScheduleRepository for DieselScheduleRepository {
    async fn create(&self, draft: &ScheduleDraft) -> Result<Schedule, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let new_row = NewScheduleRow {
            schedule_name: draft.name.as_ref(),
            memo: &draft.memo,
            created_by: draft.owner.get(),
            updated_at: draft.updated_at,
        };

        let row = conn
            .transaction::<_, DbFailure, _>(|conn| {
                async move {
                    let row: ScheduleRow = diesel::insert_into(schedules::table)
                        .values(&new_row)
                        .returning(ScheduleRow::as_returning())
                        .get_result(conn)
                        .await?;
                    insert_candidates(conn, ScheduleId::new(row.id), &draft.candidates).await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;

        debug!(
            schedule_id = row.id,
            candidates = draft.candidates.len(),
            "schedule created"
        );
        Ok(Schedule::try_from(row).map_err(corrupt_row)?)
    }

    async fn find_by_id(
        &self,
        id: ScheduleId,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;

        let row = schedules::table
            .find(id.get())
            .select(ScheduleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbFailure::from)?;

        Ok(convert_optional(row)?)
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;

        let rows: Vec<ScheduleRow> = schedules::table
            .filter(schedules::created_by.eq(owner.get()))
            .select(ScheduleRow::as_select())
            .order_by((schedules::updated_at.desc(), schedules::id.desc()))
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;

        Ok(collect_rows(rows)?)
    }

    async fn update(
        &self,
        revision: &ScheduleRevision,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let changes = ScheduleUpdate {
            schedule_name: revision.name.as_ref(),
            memo: &revision.memo,
            updated_at: revision.updated_at,
        };
        let schedule_id = revision.schedule_id;

        let row = conn
            .transaction::<_, DbFailure, _>(|conn| {
                async move {
                    let updated: Option<ScheduleRow> =
                        diesel::update(schedules::table.find(schedule_id.get()))
                            .set(&changes)
                            .returning(ScheduleRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?;
                    if updated.is_some() {
                        insert_candidates(conn, schedule_id, &revision.appended_candidates)
                            .await?;
                    }
                    Ok(updated)
                }
                .scope_boxed()
            })
            .await?;

        Ok(convert_optional(row)?)
    }

    async fn delete_aggregate(&self, id: ScheduleId) -> Result<bool, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let raw_id = id.get();

        let deleted = conn
            .transaction::<_, DbFailure, _>(|conn| {
                async move {
                    // Children reference the schedule row, so this lock makes
                    // concurrent child inserts wait for the delete to finish.
                    let locked = schedules::table
                        .find(raw_id)
                        .select(schedules::id)
                        .for_update()
                        .first::<i64>(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(false);
                    }
                    diesel::delete(
                        availabilities::table.filter(availabilities::schedule_id.eq(raw_id)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(comments::table.filter(comments::schedule_id.eq(raw_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(candidates::table.filter(candidates::schedule_id.eq(raw_id)))
                        .execute(conn)
                        .await?;
                    let removed = diesel::delete(schedules::table.find(raw_id))
                        .execute(conn)
                        .await?;
                    Ok(removed > 0)
                }
                .scope_boxed()
            })
            .await?;

        debug!(schedule_id = raw_id, deleted, "schedule aggregate delete finished");
        Ok(deleted)
    }

    async fn list_candidates(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<Candidate>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;

        let rows: Vec<CandidateRow> = candidates::table
            .filter(candidates::schedule_id.eq(schedule_id.get()))
            .select(CandidateRow::as_select())
            .order_by(candidates::id.asc())
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;

        Ok(collect_rows(rows)?)
    }

    async fn find_candidate(
        &self,
        id: CandidateId,
    ) -> Result<Option<Candidate>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;

        let row = candidates::table
            .find(id.get())
            .select(CandidateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbFailure::from)?;

        Ok(convert_optional(row)?)
    }
}
