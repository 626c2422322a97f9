//! Pattern-based HTTP request multiplexer.
//!
//! Routes are `(method, pattern, handler)` registrations tried in the order
//! they were added. Patterns are plain paths with `:name` placeholders; a
//! pattern ending in `/` also matches everything below it.
//!
//! ```
//! use axum::http::Method;
//! use pattern_mux::routing::{Mux, Resolution};
//!
//! let mut mux = Mux::new();
//! mux.get("/hello/:name", "hello");
//!
//! match mux.resolve(&Method::GET, "/hello/keith", Some("lang=en")) {
//!     Resolution::Matched { handler, params, .. } => {
//!         assert_eq!(*handler, "hello");
//!         assert_eq!(params.get(":name"), Some("keith"));
//!         assert_eq!(params.get("lang"), Some("en"));
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{tail, MethodFilter, Mux, Params, Pattern, Resolution};
