//! Everything `create_server` needs beyond the health state.

use schedule_backend::inbound::http::login_token::LoginTokenVerifier;
use schedule_backend::inbound::http::session_config::SessionSettings;
use schedule_backend::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Listener address, cookie-session parameters, the login token and the
/// optional database pool.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) login_token: LoginTokenVerifier,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        session: SessionSettings,
        login_token: LoginTokenVerifier,
        bind_addr: SocketAddr,
    ) -> Self {
        Self {
            session,
            login_token,
            bind_addr,
            db_pool: None,
        }
    }

    /// Serve the ports from PostgreSQL.
    ///
    /// Without a pool every port is served by its fixture implementation.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
