//! bb8 pool of `diesel-async` PostgreSQL connections for the student store.
//!
//! A pool exists only when `STUDENTS_DATABASE_URL` is set; without one the
//! server falls back to the in-memory store and this module is never touched.
//! Opening the pool does not contact the database unless idle connections are
//! requested. A checkout that cannot produce a connection within the timeout
//! yields [`PoolError::Checkout`], which the repository reports as a
//! connection failure and the API answers with 503.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::info;

/// Connections opened when the settings do not say otherwise.
pub const DEFAULT_MAX_SIZE: u32 = 10;
/// Idle connections kept warm, capped at the pool size.
pub const DEFAULT_MIN_IDLE: u32 = 2;
/// Longest wait for a connection before a request gives up.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure to obtain database connections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available for a request.
    #[error("student database unavailable: {message}")]
    Checkout { message: String },

    /// The pool could not be opened at startup.
    #[error("student database pool could not start: {message}")]
    Startup { message: String },
}

impl PoolError {
    /// Checkout failure carrying the driver's explanation.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Startup failure carrying the driver's explanation.
    pub fn startup(message: impl Into<String>) -> Self {
        Self::Startup {
            message: message.into(),
        }
    }
}

/// Sizing and timeout settings for [`DbPool`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    checkout_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: Some(DEFAULT_MIN_IDLE),
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Keep `min_idle` connections open; `None` opens connections on demand
    /// only.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Idle floor as handed to bb8, which rejects a floor above the pool size.
    pub fn min_idle(&self) -> Option<u32> {
        self.min_idle.map(|idle| idle.min(self.max_size))
    }

    pub fn checkout_timeout(&self) -> Duration {
        self.checkout_timeout
    }
}

/// Shared handle to the student database connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Open the pool, establishing the idle floor before returning.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Startup`] when bb8 rejects the sizing or the idle
    /// connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size())
            .min_idle(config.min_idle())
            .connection_timeout(config.checkout_timeout())
            .build(manager)
            .await
            .map_err(|err| PoolError::startup(err.to_string()))?;

        info!(
            max_size = config.max_size(),
            min_idle = ?config.min_idle(),
            checkout_timeout_ms = config.checkout_timeout().as_millis(),
            "student database pool ready"
        );
        Ok(Self { inner })
    }

    /// Borrow a connection for one repository call.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when the checkout timeout elapses or
    /// the connection cannot be established.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const UNREACHABLE: &str = "postgres://students@127.0.0.1:1/students";

    #[rstest]
    fn unconfigured_pool_uses_service_defaults() {
        let config = PoolConfig::new(UNREACHABLE);

        assert_eq!(config.database_url(), UNREACHABLE);
        assert_eq!(config.max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(config.min_idle(), Some(DEFAULT_MIN_IDLE));
        assert_eq!(config.checkout_timeout(), DEFAULT_CHECKOUT_TIMEOUT);
    }

    #[rstest]
    #[case::single_connection(1, Some(2), Some(1))]
    #[case::floor_fits(4, Some(2), Some(2))]
    #[case::on_demand_only(4, None, None)]
    fn idle_floor_never_exceeds_pool_size(
        #[case] max_size: u32,
        #[case] requested: Option<u32>,
        #[case] expected: Option<u32>,
    ) {
        let config = PoolConfig::new(UNREACHABLE)
            .with_max_size(max_size)
            .with_min_idle(requested);

        assert_eq!(config.min_idle(), expected);
    }

    #[rstest]
    fn checkout_timeout_is_configurable() {
        let config = PoolConfig::new(UNREACHABLE).with_checkout_timeout(Duration::from_secs(3));

        assert_eq!(config.checkout_timeout(), Duration::from_secs(3));
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_database_fails_checkout_not_startup() {
        let config = PoolConfig::new(UNREACHABLE)
            .with_min_idle(None)
            .with_checkout_timeout(Duration::from_millis(200));

        let pool = DbPool::new(config).await.expect("lazy pool opens");
        let err = pool.get().await.err().expect("nothing listens on port 1");

        assert!(matches!(err, PoolError::Checkout { .. }));
        assert!(err.to_string().starts_with("student database unavailable"));
    }
}
