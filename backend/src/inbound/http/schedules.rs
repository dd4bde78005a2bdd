//! Schedule API handlers.
//!
//! ```text
//! GET    /api/v1/schedules                  Schedules created by the session user
//! POST   /api/v1/schedules                  Create a schedule with candidates
//! GET    /api/v1/schedules/{scheduleId}     Schedule page read model
//! PUT    /api/v1/schedules/{scheduleId}     Rename, edit memo, append candidates
//! DELETE /api/v1/schedules/{scheduleId}     Delete the schedule aggregate
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CreateScheduleRequest, DeleteScheduleRequest, UpdateScheduleRequest};
use crate::domain::{Candidate, Schedule, ScheduleDetail, ScheduleId, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{SCHEDULE_NAME, require};

/// Request body for `POST /api/v1/schedules`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleBody {
    #[schema(example = "テスト予定1")]
    pub schedule_name: Option<String>,
    #[serde(default)]
    pub memo: String,
    /// Candidate names, one per line.
    #[serde(default)]
    #[schema(example = "テスト候補1\r\nテスト候補2\r\nテスト候補3")]
    pub candidates: String,
}

/// Request body for `PUT /api/v1/schedules/{scheduleId}`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleBody {
    pub schedule_name: Option<String>,
    #[serde(default)]
    pub memo: String,
    /// Candidate names to append, one per line.
    #[serde(default)]
    pub candidates: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSchedule {
    pub schedule_id: i64,
}

/// Schedule header as listed and returned after an edit.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub schedule_id: i64,
    pub schedule_name: String,
    pub memo: String,
    pub created_by: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<&Schedule> for ScheduleSummary {
    fn from(schedule: &Schedule) -> Self {
        Self {
            schedule_id: schedule.id().get(),
            schedule_name: schedule.name().as_ref().to_owned(),
            memo: schedule.memo().to_owned(),
            created_by: schedule.created_by().get(),
            updated_at: schedule.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().get(),
            username: user.username().as_ref().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub candidate_id: i64,
    pub candidate_name: String,
}

impl From<&Candidate> for CandidateSummary {
    fn from(candidate: &Candidate) -> Self {
        Self {
            candidate_id: candidate.id().get(),
            candidate_name: candidate.name().as_ref().to_owned(),
        }
    }
}

/// One cell of the user × candidate matrix.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCell {
    pub user_id: i64,
    pub candidate_id: i64,
    /// 0 absent, 1 undecided, 2 present.
    #[schema(minimum = 0, maximum = 2)]
    pub availability: i16,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentEntry {
    pub user_id: i64,
    pub comment: String,
}

/// Everything the schedule page renders.
///
/// `availabilities` holds one cell per (user, candidate) pair in display
/// order; unset cells read as undecided. `comments` holds one entry per
/// displayed user (empty when they have not commented), followed by any
/// other commenters.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetailResponse {
    pub schedule: ScheduleSummary,
    pub creator: UserSummary,
    pub candidates: Vec<CandidateSummary>,
    pub users: Vec<UserSummary>,
    pub availabilities: Vec<AvailabilityCell>,
    pub comments: Vec<CommentEntry>,
}

impl From<&ScheduleDetail> for ScheduleDetailResponse {
    fn from(detail: &ScheduleDetail) -> Self {
        let users = detail.users();
        let availabilities = users
            .iter()
            .flat_map(|user| {
                detail.candidates().iter().map(move |candidate| AvailabilityCell {
                    user_id: user.id().get(),
                    candidate_id: candidate.id().get(),
                    availability: detail.availability_for(user.id(), candidate.id()).as_i16(),
                })
            })
            .collect();

        let mut comments: Vec<CommentEntry> = users
            .iter()
            .map(|user| CommentEntry {
                user_id: user.id().get(),
                comment: detail.comment_for(user.id()).to_owned(),
            })
            .collect();
        let mut others: Vec<CommentEntry> = detail
            .comments()
            .filter(|(author, _)| users.iter().all(|user| user.id() != *author))
            .map(|(author, text)| CommentEntry {
                user_id: author.get(),
                comment: text.to_owned(),
            })
            .collect();
        others.sort_by_key(|entry| entry.user_id);
        comments.extend(others);

        Self {
            schedule: ScheduleSummary::from(detail.schedule()),
            creator: UserSummary::from(detail.creator()),
            candidates: detail.candidates().iter().map(CandidateSummary::from).collect(),
            users: users.iter().map(UserSummary::from).collect(),
            availabilities,
            comments,
        }
    }
}

/// List schedules created by the session user, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/v1/schedules",
    responses(
        (status = 200, description = "Owned schedules", body = [ScheduleSummary]),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["schedules"],
    operation_id = "listSchedules"
)]
#[get("/schedules")]
pub async fn list_schedules(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ScheduleSummary>>> {
    let user = session.require_user()?;
    let schedules = state.schedules_query.list_owned(&user.id()).await?;
    Ok(web::Json(schedules.iter().map(ScheduleSummary::from).collect()))
}

/// Create a schedule and its initial candidates.
#[utoipa::path(
    post,
    path = "/api/v1/schedules",
    request_body = CreateScheduleBody,
    responses(
        (status = 201, description = "Schedule created", body = CreatedSchedule,
            headers(("Location" = String, description = "URL of the new schedule"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["schedules"],
    operation_id = "createSchedule"
)]
#[post("/schedules")]
pub async fn create_schedule(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateScheduleBody>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;
    let CreateScheduleBody {
        schedule_name,
        memo,
        candidates,
    } = payload.into_inner();
    let response = state
        .schedules
        .create(CreateScheduleRequest {
            owner: user.id(),
            name: require(schedule_name, SCHEDULE_NAME)?,
            memo,
            candidates,
        })
        .await?;

    let id = response.schedule_id.get();
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/schedules/{id}")))
        .json(CreatedSchedule { schedule_id: id }))
}

/// Fetch the schedule page: candidates, participants, availability and comments.
#[utoipa::path(
    get,
    path = "/api/v1/schedules/{scheduleId}",
    params(("scheduleId" = i64, Path, description = "Schedule identifier")),
    responses(
        (status = 200, description = "Schedule detail", body = ScheduleDetailResponse),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Schedule not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["schedules"],
    operation_id = "getSchedule"
)]
#[get("/schedules/{schedule_id}")]
pub async fn get_schedule(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ScheduleDetailResponse>> {
    let user = session.require_user()?;
    let schedule_id = ScheduleId::new(path.into_inner());
    let detail = state.schedules_query.detail(schedule_id, Some(&user)).await?;
    Ok(web::Json(ScheduleDetailResponse::from(&detail)))
}

/// Edit a schedule owned by the session user.
#[utoipa::path(
    put,
    path = "/api/v1/schedules/{scheduleId}",
    params(("scheduleId" = i64, Path, description = "Schedule identifier")),
    request_body = UpdateScheduleBody,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleSummary),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Not the creator", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Schedule not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["schedules"],
    operation_id = "updateSchedule"
)]
#[put("/schedules/{schedule_id}")]
pub async fn update_schedule(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<UpdateScheduleBody>,
) -> ApiResult<web::Json<ScheduleSummary>> {
    let user = session.require_user()?;
    let UpdateScheduleBody {
        schedule_name,
        memo,
        candidates,
    } = payload.into_inner();
    let schedule = state
        .schedules
        .update(UpdateScheduleRequest {
            schedule_id: ScheduleId::new(path.into_inner()),
            requested_by: user.id(),
            name: require(schedule_name, SCHEDULE_NAME)?,
            memo,
            candidates,
        })
        .await?;
    Ok(web::Json(ScheduleSummary::from(&schedule)))
}

/// Delete a schedule with its candidates, availability and comments.
///
/// Deleting a schedule that no longer exists succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/schedules/{scheduleId}",
    params(("scheduleId" = i64, Path, description = "Schedule identifier")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Not the creator", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["schedules"],
    operation_id = "deleteSchedule"
)]
#[delete("/schedules/{schedule_id}")]
pub async fn delete_schedule(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;
    state
        .schedules
        .delete(DeleteScheduleRequest {
            schedule_id: ScheduleId::new(path.into_inner()),
            requested_by: user.id(),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "schedules_tests.rs"]
mod tests;
