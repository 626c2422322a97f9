//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router whose only handler dispatches through the mux
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Write redirect / 405 / 404 responses for unmatched requests
//! - Swap in a new route table when the config changes

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handler::BoxedHandler;
use crate::http::request::{attach_params, decode_captures, RequestIdExt};
use crate::http::{responder, response};
use crate::observability::metrics;
use crate::routing::{Mux, Resolution};

/// The route table currently being served. Replaced whole on reload.
pub type SharedMux = Arc<ArcSwap<Mux<BoxedHandler>>>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mux: SharedMux,
}

/// HTTP server dispatching every request through a [`Mux`].
pub struct HttpServer {
    router: Router,
    mux: SharedMux,
    reloadable: bool,
}

impl HttpServer {
    /// Create a server answering the config's route table.
    ///
    /// The table is rebuilt whenever a new config arrives on the update channel.
    pub fn new(config: ServerConfig) -> Self {
        let mux = responder::build_mux(&config.routes);
        Self::build(&config, mux, true)
    }

    /// Create a server around a mux built in code.
    ///
    /// Config updates are ignored for such a server: its handlers cannot be
    /// reconstructed from a route table.
    pub fn with_mux(config: ServerConfig, mux: Mux<BoxedHandler>) -> Self {
        Self::build(&config, mux, false)
    }

    fn build(config: &ServerConfig, mux: Mux<BoxedHandler>, reloadable: bool) -> Self {
        tracing::info!(registrations = mux.len(), reloadable, "Route table ready");
        let mux: SharedMux = Arc::new(ArcSwap::from_pointee(mux));
        let state = AppState { mux: mux.clone() };
        let router = Self::build_router(config, state);
        Self {
            router,
            mux,
            reloadable,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = request.request_id().unwrap_or("unknown"),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, e.g. for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the live route table.
    pub fn mux(&self) -> SharedMux {
        self.mux.clone()
    }

    /// Run the server until `shutdown` fires, applying route-table updates
    /// as they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<ServerConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let reloader = tokio::spawn(apply_updates(
            self.mux.clone(),
            config_updates,
            self.reloadable,
        ));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Consume config updates, swapping in a freshly built route table.
async fn apply_updates(
    mux: SharedMux,
    mut updates: mpsc::UnboundedReceiver<ServerConfig>,
    reloadable: bool,
) {
    while let Some(config) = updates.recv().await {
        if !reloadable {
            tracing::warn!("Ignoring route reload: route table was built in code");
            continue;
        }
        let next = responder::build_mux(&config.routes);
        tracing::info!(registrations = next.len(), "Route table swapped");
        metrics::record_reload(next.len());
        mux.store(Arc::new(next));
    }
}

/// Single entry point: resolve through the current route table.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let mux = state.mux.load_full();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    let resolution = mux.resolve(&method, &path, query.as_deref());
    let mut outcome = resolution.outcome();

    let response = match resolution {
        Resolution::Matched {
            handler,
            pattern,
            captures,
            ..
        } => match decode_captures(&captures, query.as_deref()) {
            Ok((captures, params)) => {
                tracing::debug!(method = %method, path = %path, pattern = %pattern, "Route matched");
                let handler = handler.clone();
                handler(attach_params(request, &captures, params)).await
            }
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Captured path text is not UTF-8");
                outcome = "bad_request";
                response::bad_request()
            }
        },
        Resolution::Redirect { location } => {
            tracing::debug!(path = %path, location = %location, "Redirecting to trailing slash");
            response::redirect(&location)
        }
        Resolution::MethodNotAllowed { allowed } => {
            tracing::debug!(method = %method, path = %path, "Method not allowed");
            response::method_not_allowed(&allowed)
        }
        Resolution::NotFound => match mux.not_found_handler() {
            Some(fallback) => fallback(request).await,
            None => {
                tracing::debug!(method = %method, path = %path, "No route matched");
                response::not_found()
            }
        },
    };

    metrics::record_request(outcome, method.as_str(), start);
    response
}
