//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store registrations in the order they were added
//! - Resolve a request to a handler, a redirect, a 405 or a 404
//! - Merge placeholder captures with the request's query parameters
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over registrations (acceptable for typical route counts)
//! - Explicit NotFound rather than silent default

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use thiserror::Error;

use crate::routing::matcher::Pattern;
use crate::routing::params::Params;

/// Which request methods a registration answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFilter {
    /// Every method.
    Any,
    /// Exactly one method.
    Only(Method),
}

impl MethodFilter {
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            MethodFilter::Any => true,
            MethodFilter::Only(m) => m == method,
        }
    }
}

impl From<Method> for MethodFilter {
    fn from(method: Method) -> Self {
        MethodFilter::Only(method)
    }
}

impl fmt::Display for MethodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodFilter::Any => f.write_str("ANY"),
            MethodFilter::Only(m) => f.write_str(m.as_str()),
        }
    }
}

/// Error returned when a method name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid HTTP method: {0:?}")]
pub struct InvalidMethod(pub String);

impl FromStr for MethodFilter {
    type Err = InvalidMethod;

    /// Accepts `ANY` or `*` for every method, otherwise a method token
    /// (case-insensitive for the standard methods).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "" => Err(InvalidMethod(s.to_string())),
            "ANY" | "*" => Ok(MethodFilter::Any),
            _ => Method::from_bytes(upper.as_bytes())
                .map(MethodFilter::Only)
                .map_err(|_| InvalidMethod(s.to_string())),
        }
    }
}

/// One `(method, pattern, handler)` binding.
#[derive(Debug, Clone)]
pub struct Registration<H> {
    pub method: MethodFilter,
    pub pattern: Pattern,
    pub handler: H,
}

/// Outcome of [`Mux::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a, H> {
    /// A registration matched both path and method.
    Matched {
        handler: &'a H,
        pattern: &'a Pattern,
        /// Placeholder values only.
        captures: Params,
        /// Captures followed by the request's own query parameters.
        params: Params,
    },
    /// The path matches only with a trailing slash appended (301).
    Redirect { location: String },
    /// The path matches, but not for this method (405). Sorted, no duplicates.
    MethodNotAllowed { allowed: Vec<Method> },
    /// Nothing matches (404).
    NotFound,
}

impl<H> Resolution<'_, H> {
    /// Short label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Matched { .. } => "matched",
            Resolution::Redirect { .. } => "redirect",
            Resolution::MethodNotAllowed { .. } => "method_not_allowed",
            Resolution::NotFound => "not_found",
        }
    }
}

/// Pattern-based request multiplexer.
///
/// Registrations are tried in the order they were added; the first one whose
/// pattern matches the path and whose method filter allows the request
/// method wins.
#[derive(Debug, Clone)]
pub struct Mux<H> {
    routes: Vec<Registration<H>>,
    not_found: Option<H>,
}

impl<H> Default for Mux<H> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            not_found: None,
        }
    }
}

impl<H> Mux<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration. Patterns are not validated.
    pub fn add(
        &mut self,
        method: impl Into<MethodFilter>,
        pattern: impl Into<Pattern>,
        handler: H,
    ) -> &mut Self {
        let registration = Registration {
            method: method.into(),
            pattern: pattern.into(),
            handler,
        };
        tracing::debug!(
            method = %registration.method,
            pattern = %registration.pattern,
            position = self.routes.len(),
            "Route registered"
        );
        self.routes.push(registration);
        self
    }

    pub fn head(&mut self, pattern: impl Into<Pattern>, handler: H) -> &mut Self {
        self.add(Method::HEAD, pattern, handler)
    }

    pub fn post(&mut self, pattern: impl Into<Pattern>, handler: H) -> &mut Self {
        self.add(Method::POST, pattern, handler)
    }

    pub fn put(&mut self, pattern: impl Into<Pattern>, handler: H) -> &mut Self {
        self.add(Method::PUT, pattern, handler)
    }

    pub fn delete(&mut self, pattern: impl Into<Pattern>, handler: H) -> &mut Self {
        self.add(Method::DELETE, pattern, handler)
    }

    pub fn options(&mut self, pattern: impl Into<Pattern>, handler: H) -> &mut Self {
        self.add(Method::OPTIONS, pattern, handler)
    }

    pub fn patch(&mut self, pattern: impl Into<Pattern>, handler: H) -> &mut Self {
        self.add(Method::PATCH, pattern, handler)
    }

    /// Register for every request method.
    pub fn any(&mut self, pattern: impl Into<Pattern>, handler: H) -> &mut Self {
        self.add(MethodFilter::Any, pattern, handler)
    }

    /// Handler the HTTP layer falls back to when nothing matches.
    pub fn not_found(&mut self, handler: H) -> &mut Self {
        self.not_found = Some(handler);
        self
    }

    pub fn not_found_handler(&self) -> Option<&H> {
        self.not_found.as_ref()
    }

    pub fn registrations(&self) -> &[Registration<H>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve a request.
    ///
    /// `query` is the raw query string (without `?`). Its parameters are
    /// merged after the captures on a match, and it is carried over
    /// verbatim into the redirect location.
    pub fn resolve(&self, method: &Method, path: &str, query: Option<&str>) -> Resolution<'_, H> {
        let mut allowed: Vec<Method> = Vec::new();

        for route in &self.routes {
            let Some(captures) = route.pattern.try_match(path) else {
                continue;
            };
            if route.method.allows(method) {
                let mut params = captures.clone();
                if let Some(query) = query {
                    params.merge(Params::from_query(query));
                }
                return Resolution::Matched {
                    handler: &route.handler,
                    pattern: &route.pattern,
                    captures,
                    params,
                };
            }
            if let MethodFilter::Only(other) = &route.method {
                push_unique(&mut allowed, other);
            }
        }

        if allowed.is_empty() && !path.ends_with('/') {
            let slashed = format!("{}/", path);
            for route in self.routes.iter().filter(|r| r.pattern.ends_with_slash()) {
                if route.pattern.try_match(&slashed).is_none() {
                    continue;
                }
                if route.method.allows(method) {
                    let location = match query {
                        Some(q) if !q.is_empty() => format!("{}?{}", slashed, q),
                        _ => slashed,
                    };
                    return Resolution::Redirect { location };
                }
                if let MethodFilter::Only(other) = &route.method {
                    push_unique(&mut allowed, other);
                }
            }
        }

        if allowed.is_empty() {
            return Resolution::NotFound;
        }
        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Resolution::MethodNotAllowed { allowed }
    }
}

impl<H: Clone> Mux<H> {
    /// Register for GET, and for HEAD with the same handler.
    pub fn get(&mut self, pattern: impl Into<Pattern>, handler: H) -> &mut Self {
        let pattern = pattern.into();
        self.add(Method::GET, pattern.clone(), handler.clone());
        self.add(Method::HEAD, pattern, handler)
    }
}

fn push_unique(allowed: &mut Vec<Method>, method: &Method) {
    if !allowed.contains(method) {
        allowed.push(method.clone());
    }
}
