//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use super::login_token::LoginTokenVerifier;

use crate::domain::ports::{
    AvailabilityCommand, CommentCommand, FixtureAvailabilityCommand, FixtureCommentCommand,
    FixtureLoginService, FixtureScheduleCommand, FixtureScheduleQuery, LoginService,
    ScheduleCommand, ScheduleQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub schedules: Arc<dyn ScheduleCommand>,
    pub schedules_query: Arc<dyn ScheduleQuery>,
    pub availability: Arc<dyn AvailabilityCommand>,
    pub comments: Arc<dyn CommentCommand>,
    /// Checks the identity provider's token on login.
    pub login_token: LoginTokenVerifier,
}

impl HttpState {
    /// State backed entirely by fixture ports, for handler tests and docs.
    ///
    /// Login accepts only [`FIXTURE_LOGIN_TOKEN`](super::login_token::FIXTURE_LOGIN_TOKEN)
    /// until [`with_login_token`](Self::with_login_token) replaces it.
    ///
    /// # Examples
    /// ```
    /// use actix_web::web;
    /// use schedule_backend::inbound::http::state::HttpState;
    ///
    /// let state = web::Data::new(HttpState::fixtures());
    /// # let _ = state;
    /// ```
    pub fn fixtures() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            schedules: Arc::new(FixtureScheduleCommand),
            schedules_query: Arc::new(FixtureScheduleQuery),
            availability: Arc::new(FixtureAvailabilityCommand),
            comments: Arc::new(FixtureCommentCommand),
            login_token: LoginTokenVerifier::fixture(),
        }
    }

    /// Replace the login port.
    pub fn with_login(mut self, login: Arc<dyn LoginService>) -> Self {
        self.login = login;
        self
    }

    /// Replace the login token verifier.
    #[must_use]
    pub fn with_login_token(mut self, login_token: LoginTokenVerifier) -> Self {
        self.login_token = login_token;
        self
    }

    /// Replace the schedule command port.
    pub fn with_schedules(mut self, schedules: Arc<dyn ScheduleCommand>) -> Self {
        self.schedules = schedules;
        self
    }

    /// Replace the schedule query port.
    pub fn with_schedules_query(mut self, schedules_query: Arc<dyn ScheduleQuery>) -> Self {
        self.schedules_query = schedules_query;
        self
    }

    /// Replace the availability command port.
    pub fn with_availability(mut self, availability: Arc<dyn AvailabilityCommand>) -> Self {
        self.availability = availability;
        self
    }

    /// Replace the comment command port.
    pub fn with_comments(mut self, comments: Arc<dyn CommentCommand>) -> Self {
        self.comments = comments;
        self
    }
}
