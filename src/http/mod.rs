//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → routing layer resolves (method, path, query)
//!     → request.rs (attach params, fold captures into the query)
//!     → handler.rs (matched handler runs)
//!     → response.rs (301 / 405 / 404 when no handler runs)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod responder;
pub mod response;
pub mod server;

pub use handler::{handler_fn, BoxedHandler};
pub use request::{RequestIdExt, RequestParamsExt, X_REQUEST_ID};
pub use server::HttpServer;
