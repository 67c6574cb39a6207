//! Error types for listkeep-server

use std::net::SocketAddr;

use thiserror::Error;

/// Failure inside the item store. The message is passed through to clients.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Invalid runtime configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(var: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidValue {
            var,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Server lifecycle error (startup and serve loop)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
