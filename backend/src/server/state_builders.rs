//! Builders wiring the Diesel repositories into the domain services behind
//! the HTTP driving ports.

use std::sync::Arc;

use actix_web::web;

use schedule_backend::domain::ports::{
    AvailabilityRepository, CommentRepository, ScheduleRepository, UserRepository,
};
use schedule_backend::domain::{
    AvailabilityService, CommentService, ScheduleService, UserAccountService,
};
use schedule_backend::inbound::http::login_token::LoginTokenVerifier;
use schedule_backend::inbound::http::state::HttpState;
use schedule_backend::outbound::persistence::{
    DbPool, DieselAvailabilityRepository, DieselCommentRepository, DieselScheduleRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Driven ports shared by every service.
struct Repositories<S, U, A, C> {
    schedules: Arc<S>,
    users: Arc<U>,
    availabilities: Arc<A>,
    comments: Arc<C>,
}

type DieselRepositories = Repositories<
    DieselScheduleRepository,
    DieselUserRepository,
    DieselAvailabilityRepository,
    DieselCommentRepository,
>;

impl DieselRepositories {
    fn diesel(pool: &DbPool) -> Self {
        Self {
            schedules: Arc::new(DieselScheduleRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            availabilities: Arc::new(DieselAvailabilityRepository::new(pool.clone())),
            comments: Arc::new(DieselCommentRepository::new(pool.clone())),
        }
    }
}

/// Build handler state over the real services.
///
/// The schedule service backs both the command and the query port.
fn state_from_repositories<S, U, A, C>(
    repos: Repositories<S, U, A, C>,
    login_token: LoginTokenVerifier,
) -> HttpState
where
    S: ScheduleRepository + 'static,
    U: UserRepository + 'static,
    A: AvailabilityRepository + 'static,
    C: CommentRepository + 'static,
{
    let Repositories {
        schedules,
        users,
        availabilities,
        comments,
    } = repos;

    let schedule_service = Arc::new(ScheduleService::new(
        schedules.clone(),
        users.clone(),
        availabilities.clone(),
        comments.clone(),
    ));

    HttpState {
        login: Arc::new(UserAccountService::new(users.clone())),
        schedules: schedule_service.clone(),
        schedules_query: schedule_service,
        availability: Arc::new(AvailabilityService::new(
            schedules.clone(),
            users.clone(),
            availabilities,
        )),
        comments: Arc::new(CommentService::new(schedules, users, comments)),
        login_token,
    }
}

/// Build handler state from configuration.
///
/// Uses the Diesel adapters when a pool is configured and the fixture ports
/// otherwise. Login always checks the configured provider token.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let login_token = config.login_token.clone();
    let state = match &config.db_pool {
        Some(pool) => state_from_repositories(Repositories::diesel(pool), login_token),
        None => HttpState::fixtures().with_login_token(login_token),
    };
    web::Data::new(state)
}
