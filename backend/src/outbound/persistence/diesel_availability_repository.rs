//! PostgreSQL-backed `AvailabilityRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AvailabilityRepository, AvailabilityRepositoryError};
use crate::domain::{AvailabilityEntry, ScheduleId};

use super::diesel_helpers::{DbFailure, collect_rows};
use super::models::AvailabilityRow;
use super::pool::DbPool;
use super::schema::availabilities;

/// Diesel-backed implementation of the `AvailabilityRepository` port.
#[derive(Clone)]
pub struct DieselAvailabilityRepository {
    pool: DbPool,
}

impl DieselAvailabilityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for DieselAvailabilityRepository {
    async fn upsert(&self, entry: &AvailabilityEntry) -> Result<(), AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row = AvailabilityRow::from(entry);

        diesel::insert_into(availabilities::table)
            .values(&row)
            .on_conflict((availabilities::candidate_id, availabilities::user_id))
            .do_update()
            .set(availabilities::availability.eq(excluded(availabilities::availability)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| DbFailure::from(err).into())
    }

    async fn list_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<AvailabilityEntry>, AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;

        let rows: Vec<AvailabilityRow> = availabilities::table
            .filter(availabilities::schedule_id.eq(schedule_id.get()))
            .select(AvailabilityRow::as_select())
            .order_by((availabilities::user_id.asc(), availabilities::candidate_id.asc()))
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;

        Ok(collect_rows(rows)?)
    }
}
