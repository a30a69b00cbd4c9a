//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, CORS)
//! - Inject the record store into handlers via state
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    BoxError, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::request_span;
use crate::http::response::ApiError;
use crate::http::{health, users};
use crate::lifecycle::shutdown_signal;
use crate::observability::metrics;
use crate::store::{DeadlineStore, UserStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

/// HTTP server for the user service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    ///
    /// Every statement is bounded by `timeouts.query_secs`.
    pub fn new(config: ServiceConfig, store: Arc<dyn UserStore>) -> Self {
        let query_deadline = Duration::from_secs(config.timeouts.query_secs);
        let state = AppState {
            store: Arc::new(DeadlineStore::new(store, query_deadline)),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let api = users::routes().route_layer(middleware::from_fn(metrics::track_requests));
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);

        let router = Router::new()
            .nest("/api", api)
            .route("/health", get(health::health))
            .route("/ready", get(health::ready))
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.http.max_body_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(request_timed_out))
                    .layer(TimeoutLayer::new(request_timeout)),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        if config.http.cors_permissive {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// A handle to the router, for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

// Only the timeout layer can fail here; routes themselves are infallible.
async fn request_timed_out(err: BoxError) -> ApiError {
    tracing::warn!(error = %err, "Request timed out");
    ApiError::RequestTimeout
}
