//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use super::login_token::{FIXTURE_LOGIN_TOKEN, LOGIN_TOKEN_HEADER};

/// Name of the session cookie issued by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response, panicking when absent.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Build a `POST /api/v1/login` request handing over the given identity
/// with the fixture provider token.
pub fn login_request(user_id: i64, username: &str) -> actix_http::Request {
    actix_web::test::TestRequest::post()
        .uri("/api/v1/login")
        .insert_header((LOGIN_TOKEN_HEADER, FIXTURE_LOGIN_TOKEN))
        .set_json(serde_json::json!({ "userId": user_id, "username": username }))
        .to_request()
}
