//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, ScheduleId};

use super::diesel_helpers::{DbFailure, collect_rows};
use super::models::CommentRow;
use super::pool::DbPool;
use super::schema::comments;

/// Diesel-backed implementation of the `CommentRepository` port.
///
/// One row per (schedule, user); saving again replaces the text.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn upsert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row = CommentRow::from(comment);

        diesel::insert_into(comments::table)
            .values(&row)
            .on_conflict((comments::schedule_id, comments::user_id))
            .do_update()
            .set(comments::comment.eq(excluded(comments::comment)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| DbFailure::from(err).into())
    }

    async fn list_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;

        let rows: Vec<CommentRow> = comments::table
            .filter(comments::schedule_id.eq(schedule_id.get()))
            .select(CommentRow::as_select())
            .order_by(comments::user_id.asc())
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;

        Ok(collect_rows(rows)?)
    }
}
