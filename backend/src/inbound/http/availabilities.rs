//! Availability API handler.
//!
//! ```text
//! POST /api/v1/schedules/{scheduleId}/users/{userId}/candidates/{candidateId} {"availability":2}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::SetAvailabilityRequest;
use crate::domain::{CandidateId, Error, ScheduleId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{AVAILABILITY, parse_availability, require};

/// Request body carrying the raw availability value.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityBody {
    /// 0 absent, 1 undecided, 2 present.
    #[schema(example = 2)]
    pub availability: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdated {
    #[schema(example = "OK")]
    pub status: String,
    pub availability: i16,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPath {
    schedule_id: i64,
    user_id: i64,
    candidate_id: i64,
}

/// Record the session user's availability for one candidate.
#[utoipa::path(
    post,
    path = "/api/v1/schedules/{scheduleId}/users/{userId}/candidates/{candidateId}",
    params(
        ("scheduleId" = i64, Path, description = "Schedule identifier"),
        ("userId" = i64, Path, description = "Must be the session user"),
        ("candidateId" = i64, Path, description = "Candidate identifier")
    ),
    request_body = AvailabilityBody,
    responses(
        (status = 200, description = "Availability stored", body = AvailabilityUpdated),
        (status = 400, description = "Invalid availability or candidate", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Path user is not the session user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Schedule or candidate not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["availabilities"],
    operation_id = "setAvailability"
)]
#[post("/schedules/{scheduleId}/users/{userId}/candidates/{candidateId}")]
pub async fn set_availability(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AvailabilityPath>,
    payload: web::Json<AvailabilityBody>,
) -> ApiResult<web::Json<AvailabilityUpdated>> {
    let caller = session.require_user()?;
    let AvailabilityPath {
        schedule_id,
        user_id,
        candidate_id,
    } = path.into_inner();
    let raw = require(payload.into_inner().availability, AVAILABILITY)?;
    let availability = parse_availability(raw)?;
    let target_user = UserId::new(user_id)
        .map_err(|_| Error::forbidden("cannot set availability for another user"))?;

    let response = state
        .availability
        .set_availability(SetAvailabilityRequest {
            schedule_id: ScheduleId::new(schedule_id),
            caller,
            target_user,
            candidate_id: CandidateId::new(candidate_id),
            availability,
        })
        .await?;

    Ok(web::Json(AvailabilityUpdated {
        status: "OK".to_owned(),
        availability: response.availability.as_i16(),
    }))
}
