//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use students_backend::domain::UpdateValidation;
use students_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) update_validation: UpdateValidation,
}

impl ServerConfig {
    /// Construct a configuration using the in-memory store and permissive
    /// update validation.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            update_validation: UpdateValidation::default(),
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, student records are stored in PostgreSQL instead of
    /// process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Select how strictly replacement records are validated.
    #[must_use]
    pub fn with_update_validation(mut self, update_validation: UpdateValidation) -> Self {
        self.update_validation = update_validation;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
