//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the wrapper
//! schemas that describe domain types without coupling them to utoipa, and
//! the session cookie security scheme.
//!
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary for external tooling.

use crate::inbound::http::availabilities::{AvailabilityBody, AvailabilityUpdated};
use crate::inbound::http::comments::{CommentBody, CommentUpdated};
use crate::inbound::http::schedules::{
    AvailabilityCell, CandidateSummary, CommentEntry, CreateScheduleBody, CreatedSchedule,
    ScheduleDetailResponse, ScheduleSummary, UpdateScheduleBody, UserSummary,
};
use crate::inbound::http::schemas::{
    CandidateSchema, ErrorCodeSchema, ErrorSchema, ScheduleSchema, UserSchema,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Schedule backend API",
        description = "Create event schedules, collect availability per date candidate and leave comments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::schedules::list_schedules,
        crate::inbound::http::schedules::create_schedule,
        crate::inbound::http::schedules::get_schedule,
        crate::inbound::http::schedules::update_schedule,
        crate::inbound::http::schedules::delete_schedule,
        crate::inbound::http::availabilities::set_availability,
        crate::inbound::http::comments::set_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        ScheduleSchema,
        CandidateSchema,
        LoginRequest,
        CreateScheduleBody,
        UpdateScheduleBody,
        CreatedSchedule,
        ScheduleSummary,
        UserSummary,
        CandidateSummary,
        AvailabilityCell,
        CommentEntry,
        ScheduleDetailResponse,
        AvailabilityBody,
        AvailabilityUpdated,
        CommentBody,
        CommentUpdated,
    )),
    tags(
        (name = "users", description = "Login, logout and the session user"),
        (name = "schedules", description = "Schedules and their date candidates"),
        (name = "availabilities", description = "Attendance per candidate"),
        (name = "comments", description = "One comment per user and schedule"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
