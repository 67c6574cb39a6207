//! listkeep-server: HTTP API over a single-table SQLite item store
//!
//! Clients list, create, and delete short text items. The store handle is
//! opened once at startup, injected into the router as state, and closed
//! after graceful shutdown.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod store;

pub use config::{Mode, ServerConfig};
pub use error::{ConfigError, ServerError, StoreError, StoreResult};
pub use http::{build_router, run_server, serve, ApiError, AppState};
pub use models::{Item, ItemText};
pub use store::ItemStore;
