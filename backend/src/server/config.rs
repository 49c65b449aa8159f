//! HTTP server configuration object.

use std::net::SocketAddr;

use reelmark::config::AppSettings;
use reelmark::outbound::persistence::DbPool;

/// Everything [`super::create_server`] needs to wire adapters and bind.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) settings: AppSettings,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, settings: AppSettings, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            settings,
            db_pool,
        }
    }
}
