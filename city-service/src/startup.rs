//! Application startup and lifecycle management.
//!
//! The store client is acquired in [`Application::build`] and released once
//! when [`Application::run_until_stopped`] returns, however serving ended.

use crate::config::CityConfig;
use crate::handlers;
use crate::services::{self, CityStore};
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CityConfig>,
    pub store: Arc<dyn CityStore>,
}

impl AppState {
    pub fn new(config: CityConfig, store: Arc<dyn CityStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/cities",
            put(handlers::upsert_city).get(handlers::list_cities),
        )
        .route(
            "/cities/:name",
            get(handlers::get_city).delete(handlers::delete_city),
        )
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Connect to Elasticsearch (waiting for it if needed) and bind the
    /// HTTP listener.
    pub async fn build(config: CityConfig) -> Result<Self, AppError> {
        let store = services::connect(&config.elasticsearch)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to connect to Elasticsearch");
                AppError::InternalError(e.into())
            })?;

        Self::build_with_store(config, store).await
    }

    /// Bind the HTTP listener around an already connected store.
    pub async fn build_with_store(
        config: CityConfig,
        store: Arc<dyn CityStore>,
    ) -> Result<Self, AppError> {
        // port 0 = random port for testing
        let addr = config.common.listen_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, store = %store.describe(), "City service listening");

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, store),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then close the store.
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let store = self.state.store.clone();
        let app = build_router(self.state);

        let result = axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }

        store.close().await;
        tracing::info!(store = %store.describe(), "Elasticsearch connection closed");

        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
