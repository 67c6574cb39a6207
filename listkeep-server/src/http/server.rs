//! Axum server setup
//!
//! Opens the item store, binds the listener, and serves until Ctrl+C or
//! SIGTERM. The store is closed only after in-flight requests drain.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::error::ApiError;
use super::routes;
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::store::ItemStore;

/// Shared application state.
///
/// `store` is `None` when the data file could not be opened at startup;
/// item endpoints then answer 500 while `/health` keeps working.
#[derive(Clone)]
pub struct AppState {
    store: Option<ItemStore>,
}

impl AppState {
    pub fn new(store: ItemStore) -> Self {
        Self { store: Some(store) }
    }

    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn store(&self) -> Result<&ItemStore, ApiError> {
        self.store.as_ref().ok_or(ApiError::StoreUnavailable)
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::items::router())
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    info!(
        mode = config.mode.as_str(),
        db_path = %config.db_path.display(),
        "Opening item store"
    );

    let store = match ItemStore::open(&config.db_path).await {
        Ok(store) => Some(store),
        Err(e) => {
            error!(
                db_path = %config.db_path.display(),
                "Database initialization error: {}", e
            );
            None
        }
    };

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    info!("Server listening on http://{}", config.bind_addr);

    serve(listener, store, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves, then
/// close the store.
pub async fn serve<F>(
    listener: TcpListener,
    store: Option<ItemStore>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = match &store {
        Some(store) => AppState::new(store.clone()),
        None => AppState::unavailable(),
    };

    let served = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await;

    if let Some(store) = store {
        store.close().await;
    }

    served?;
    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_works_without_store() {
        let app = build_router(AppState::unavailable());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let store = ItemStore::open_in_memory().await.unwrap();
        let app = build_router(AppState::new(store));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/items")
                    .header("origin", "http://example.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn serve_closes_store_after_shutdown() {
        let store = ItemStore::open_in_memory().await.unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        serve(listener, Some(store.clone()), async {}).await.unwrap();

        assert!(store.is_closed());
    }
}
