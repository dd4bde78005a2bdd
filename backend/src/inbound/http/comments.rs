//! Comment API handler.
//!
//! ```text
//! POST /api/v1/schedules/{scheduleId}/users/{userId}/comments {"comment":"testcomment"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::SetCommentRequest;
use crate::domain::{Error, ScheduleId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    /// Stored truncated to 255 characters. Missing means empty.
    #[serde(default)]
    #[schema(example = "testcomment")]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdated {
    #[schema(example = "OK")]
    pub status: String,
    /// The comment as stored.
    pub comment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPath {
    schedule_id: i64,
    user_id: i64,
}

/// Store the session user's comment on a schedule, replacing any earlier one.
#[utoipa::path(
    post,
    path = "/api/v1/schedules/{scheduleId}/users/{userId}/comments",
    params(
        ("scheduleId" = i64, Path, description = "Schedule identifier"),
        ("userId" = i64, Path, description = "Must be the session user")
    ),
    request_body = CommentBody,
    responses(
        (status = 200, description = "Comment stored", body = CommentUpdated),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Path user is not the session user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Schedule not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "setComment"
)]
#[post("/schedules/{scheduleId}/users/{userId}/comments")]
pub async fn set_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CommentPath>,
    payload: web::Json<CommentBody>,
) -> ApiResult<web::Json<CommentUpdated>> {
    let caller = session.require_user()?;
    let CommentPath {
        schedule_id,
        user_id,
    } = path.into_inner();
    let target_user =
        UserId::new(user_id).map_err(|_| Error::forbidden("cannot comment as another user"))?;

    let response = state
        .comments
        .set_comment(SetCommentRequest {
            schedule_id: ScheduleId::new(schedule_id),
            caller,
            target_user,
            comment: payload.into_inner().comment,
        })
        .await?;

    Ok(web::Json(CommentUpdated {
        status: "OK".to_owned(),
        comment: response.comment.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_TEXT_CHARS;
    use crate::domain::ports::MockCommentCommand;
    use crate::inbound::http::test_utils::{login_request, session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn post_comment(state: HttpState, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api/v1")
                    .wrap(test_session_middleware())
                    .service(crate::inbound::http::users::login)
                    .service(set_comment),
            ),
        )
        .await;
        let login = actix_test::call_service(&app, login_request(0, "testuser")).await;
        let cookie = session_cookie(&login);
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    #[actix_web::test]
    async fn echoes_stored_comment() {
        let (status, body) = post_comment(
            HttpState::fixtures(),
            "/api/v1/schedules/3/users/0/comments",
            json!({ "comment": "testcomment" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "OK", "comment": "testcomment" }));
    }

    #[actix_web::test]
    async fn echoes_truncated_comment() {
        let (status, body) = post_comment(
            HttpState::fixtures(),
            "/api/v1/schedules/3/users/0/comments",
            json!({ "comment": "あ".repeat(MAX_TEXT_CHARS + 20) }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let stored = body["comment"].as_str().expect("comment string");
        assert_eq!(stored.chars().count(), MAX_TEXT_CHARS);
    }

    #[rstest]
    #[case("/api/v1/schedules/3/users/1/comments")]
    #[case("/api/v1/schedules/3/users/-1/comments")]
    #[actix_web::test]
    async fn rejects_other_users(#[case] uri: &str) {
        let (status, body) =
            post_comment(HttpState::fixtures(), uri, json!({ "comment": "x" })).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "forbidden");
    }

    #[actix_web::test]
    async fn surfaces_missing_schedules() {
        let mut command = MockCommentCommand::new();
        command
            .expect_set_comment()
            .withf(|request| request.schedule_id.get() == 42 && request.comment.is_empty())
            .times(1)
            .returning(|_| Err(Error::not_found("schedule not found")));
        let state = HttpState::fixtures().with_comments(Arc::new(command));

        let (status, body) =
            post_comment(state, "/api/v1/schedules/42/users/0/comments", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }
}
