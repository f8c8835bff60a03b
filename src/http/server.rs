//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the URL report handler
//! - Wire up middleware (request ID, tracing, timeout, transport marker)
//! - Serve plain TCP via axum or TLS via axum-server
//! - Stop on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::FromRef,
    http::Request,
    routing::any,
    Extension, Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, ForwardingConfig};
use crate::forwarding::{QueryParams, ResolvedBase, Transport};
use crate::http::request::{request_id_of, MakeRequestUuid, X_REQUEST_ID};
use crate::lifecycle::wait_for_shutdown;
use crate::net::tls::load_tls_config;

/// Time given to in-flight TLS connections after shutdown is signalled.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for ForwardingConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.forwarding
    }
}

/// Derived URLs for one request, as returned to the client.
#[derive(Debug, Serialize)]
pub struct UrlReport {
    pub current: String,
    pub origin: String,
    pub parent: String,
    pub path: String,
    pub query: QueryParams,
}

impl From<&ResolvedBase> for UrlReport {
    fn from(base: &ResolvedBase) -> Self {
        Self {
            current: base.current(),
            origin: base.scheme_and_host(),
            parent: base.join_path(".."),
            path: base.path().to_string(),
            query: base.query(),
        }
    }
}

/// HTTP server reporting the resolved URLs of each request.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: Arc::clone(&config),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let transport = if config.listener.tls.is_some() {
            Transport::Tls
        } else {
            Transport::Plain
        };

        Router::new()
            .route("/", any(report_handler))
            .route("/{*path}", any(report_handler))
            .with_state(state)
            .layer(Extension(transport))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id_of(request),
                        )
                    }))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The router, for serving it elsewhere or testing it directly.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server on `listener` until `shutdown` fires or Ctrl+C.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;

        match self.config.listener.tls.clone() {
            Some(tls) => {
                let rustls = load_tls_config(&tls).await?;
                tracing::info!(address = %addr, "HTTPS server starting");

                let handle = axum_server::Handle::new();
                let shutdown_handle = handle.clone();
                tokio::spawn(async move {
                    wait_for_shutdown(shutdown).await;
                    shutdown_handle.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
                });

                axum_server::from_tcp_rustls(listener.into_std()?, rustls)
                    .handle(handle)
                    .serve(self.router.into_make_service())
                    .await?;
            }
            None => {
                tracing::info!(address = %addr, "HTTP server starting");
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(wait_for_shutdown(shutdown))
                    .await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Report the derived URLs of the request.
async fn report_handler(base: ResolvedBase) -> Json<UrlReport> {
    tracing::debug!(current = %base, "Reporting resolved URLs");
    Json(UrlReport::from(&base))
}
