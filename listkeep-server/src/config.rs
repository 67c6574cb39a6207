//! Runtime configuration
//!
//! Values come from the environment, falling back to per-mode defaults:
//!
//!   APP_ENV         "production" selects the packaged layout (default: local)
//!   PORT            TCP port (default: 4000)
//!   BIND_ADDR       IP address to bind (default: 0.0.0.0)
//!   DATABASE_PATH   SQLite data file (default depends on mode)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::ConfigError;

pub const ENV_MODE: &str = "APP_ENV";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";

pub const DEFAULT_PORT: u16 = 4000;
pub const PRODUCTION_DB_PATH: &str = "/app/data/database.sqlite";
pub const LOCAL_DB_PATH: &str = "./database.sqlite";

/// Deployment mode. Only changes the default data file location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Production,
    #[default]
    Local,
}

impl Mode {
    /// Anything other than "production" (case-insensitive) is a local run.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Local,
        }
    }

    pub fn default_db_path(self) -> PathBuf {
        match self {
            Self::Production => PathBuf::from(PRODUCTION_DB_PATH),
            Self::Local => PathBuf::from(LOCAL_DB_PATH),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Local => "local",
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub mode: Mode,
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let mode = Mode::default();
        Self {
            mode,
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            db_path: mode.default_db_path(),
        }
    }
}

impl ServerConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = Mode::from_env_value(get(ENV_MODE).as_deref());

        let port = match get(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid(ENV_PORT, raw.as_str(), e))?,
            None => DEFAULT_PORT,
        };

        let ip = match get(ENV_BIND_ADDR) {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::invalid(ENV_BIND_ADDR, raw.as_str(), e))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let db_path = get(ENV_DATABASE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| mode.default_db_path());

        Ok(Self {
            mode,
            bind_addr: SocketAddr::new(ip, port),
            db_path,
        })
    }
}
