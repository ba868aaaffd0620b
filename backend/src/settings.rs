//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `STUDENTS_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::UpdateValidation;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Errors raised when configured values cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    /// The pool must allow at least one connection.
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
    /// A zero checkout timeout would fail every database request.
    #[error("pool_timeout_secs must be at least 1")]
    ZeroPoolTimeout,
}

/// Configuration values for the student records service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDENTS")]
pub struct ServiceSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds a request waits for a pooled connection before answering 503.
    pub pool_timeout_secs: Option<u64>,
    /// Apply create-time field validation to updates.
    #[ortho_config(default = false)]
    pub strict_updates: bool,
}

impl ServiceSettings {
    /// Return the socket address to bind, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the pool size, falling back to 10.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyPool`] for a configured size of zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    /// Return the connection checkout timeout, falling back to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroPoolTimeout`] for a configured timeout of
    /// zero.
    pub fn pool_timeout(&self) -> Result<Duration, SettingsError> {
        match self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS) {
            0 => Err(SettingsError::ZeroPoolTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Return the update validation mode selected by `strict_updates`.
    pub fn update_validation(&self) -> UpdateValidation {
        if self.strict_updates {
            UpdateValidation::Strict
        } else {
            UpdateValidation::Permissive
        }
    }
}
