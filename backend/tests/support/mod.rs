//! Shared helpers for backend integration tests.
//!
//! Builds the production route table over the real domain services backed by
//! [`InMemoryScheduleStore`], and provides small request helpers.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use schedule_backend::Trace;
use schedule_backend::domain::{
    AvailabilityService, CommentService, ScheduleService, UserAccountService,
};
use schedule_backend::inbound::http::availabilities::set_availability;
use schedule_backend::inbound::http::comments::set_comment;
use schedule_backend::inbound::http::error::{json_error_handler, path_error_handler};
use schedule_backend::inbound::http::login_token::{
    FIXTURE_LOGIN_TOKEN, LOGIN_TOKEN_HEADER, LoginTokenVerifier,
};
use schedule_backend::inbound::http::schedules::{
    create_schedule, delete_schedule, get_schedule, list_schedules, update_schedule,
};
use schedule_backend::inbound::http::state::HttpState;
use schedule_backend::inbound::http::users::{current_user, login, logout};
use schedule_backend::test_support::InMemoryScheduleStore;
use serde_json::Value;

/// Handler state wired to the real services over one shared store.
pub fn http_state(store: &Arc<InMemoryScheduleStore>) -> HttpState {
    let schedules = Arc::new(ScheduleService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    HttpState {
        login: Arc::new(UserAccountService::new(store.clone())),
        schedules: schedules.clone(),
        schedules_query: schedules,
        availability: Arc::new(AvailabilityService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        comments: Arc::new(CommentService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        login_token: LoginTokenVerifier::fixture(),
    }
}

/// The `/api/v1` routes behind trace and cookie-session middleware.
pub fn app(
    store: &Arc<InMemoryScheduleStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(http_state(store)))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .service(login)
                .service(logout)
                .service(current_user)
                .service(list_schedules)
                .service(create_schedule)
                .service(get_schedule)
                .service(update_schedule)
                .service(delete_schedule)
                .service(set_availability)
                .service(set_comment),
        )
}

/// Extract the session cookie set by a login response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Build a `POST /api/v1/login` request for the given identity, forwarded
/// with the fixture provider token.
pub fn login_request(user_id: i64, username: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/v1/login")
        .insert_header((LOGIN_TOKEN_HEADER, FIXTURE_LOGIN_TOKEN))
        .set_json(serde_json::json!({ "userId": user_id, "username": username }))
        .to_request()
}

/// Read a JSON response body.
pub async fn json_body<B>(response: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}
