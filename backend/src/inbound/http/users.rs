//! Users API handlers.
//!
//! ```text
//! POST /api/v1/login {"userId":0,"username":"testuser"}   (x-login-token required)
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::login_token::LOGIN_TOKEN_HEADER;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_login_identity;

/// Login request body for `POST /api/v1/login`.
///
/// Carries the identity an external provider has already verified.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = 0)]
    pub user_id: i64,
    #[schema(example = "testuser")]
    pub username: String,
}

/// Record a verified identity and establish a session.
///
/// The request must carry the identity provider's token; anything else is
/// rejected before the identity is looked at.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    params(
        ("x-login-token" = String, Header, description = "Token shared with the identity provider")
    ),
    responses(
        (status = 200, description = "Login success", body = crate::inbound::http::schemas::UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Missing or wrong identity provider token", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let presented = req
        .headers()
        .get(LOGIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    state.login_token.verify(presented)?;
    let LoginRequest { user_id, username } = payload.into_inner();
    let identity = parse_login_identity(user_id, &username)?;
    let user = state.login.login(identity).await?;
    session.persist_user(&user)?;
    info!(user_id = %user.id(), "user logged in");
    Ok(web::Json(user))
}

/// Forget the session user.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = crate::inbound::http::schemas::UserSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(session: SessionContext) -> ApiResult<web::Json<User>> {
    Ok(web::Json(session.require_user()?))
}
