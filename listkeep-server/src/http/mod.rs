//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS (any origin)
//! - Request tracing
//! - Graceful shutdown that closes the item store
//! - JSON bodies on every response, errors included

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, serve, AppState};
