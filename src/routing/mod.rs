//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → router.rs (scan registrations in order)
//!     → matcher.rs (test one pattern, collect captures)
//!     → segment.rs (consume placeholder names and values)
//!     → Return: Matched | Redirect | MethodNotAllowed | NotFound
//!
//! Registration (at startup or on reload):
//!     (method, pattern, handler)
//!     → appended to the registration table
//!     → table frozen behind an Arc, swapped whole on reload
//! ```
//!
//! # Design Decisions
//! - Patterns are kept as plain strings and walked byte by byte on every request
//! - First registration that matches wins, regardless of specificity
//! - Allowed methods are collected over the whole table before answering 405
//! - A missing trailing slash is answered with a 301, never matched silently
//! - Resolution never fails: "no route" is an ordinary outcome

pub mod matcher;
pub mod params;
pub mod router;
pub mod segment;

pub use matcher::{tail, Pattern};
pub use params::Params;
pub use router::{InvalidMethod, MethodFilter, Mux, Registration, Resolution};
