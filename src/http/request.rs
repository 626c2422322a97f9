//! Request handling and transformation.
//!
//! # Responsibilities
//! - Expose the request ID set by the outer layer
//! - Attach resolved parameters to a matched request
//! - Percent-decode captured path text before handlers see it
//! - Fold placeholder captures into the request's query string
//!
//! # Design Decisions
//! - Captures go in front of the original query so `:name` lookups see them first
//! - Requests without captures keep their query string untouched

use std::str::Utf8Error;

use axum::http::{uri::PathAndQuery, HeaderName, Request, Uri};

use crate::routing::Params;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Access to the request ID header.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(&X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }
}

/// Access to the parameters resolved for a matched request.
///
/// The same value is available to axum extractors as `Extension<Params>`.
pub trait RequestParamsExt {
    fn params(&self) -> Option<&Params>;

    /// First value of `key`, e.g. `req.param(":name")`.
    fn param(&self, key: &str) -> Option<&str> {
        self.params().and_then(|p| p.get(key))
    }
}

impl<B> RequestParamsExt for Request<B> {
    fn params(&self) -> Option<&Params> {
        self.extensions().get::<Params>()
    }
}

/// Decode raw path captures and rebuild the merged parameters from them.
///
/// Patterns match the path as sent, so captures hold percent-encoded text.
/// Returns `(captures, captures followed by query parameters)`.
pub fn decode_captures(raw: &Params, query: Option<&str>) -> Result<(Params, Params), Utf8Error> {
    let captures = raw.percent_decoded()?;
    let mut params = captures.clone();
    if let Some(query) = query {
        params.merge(Params::from_query(query));
    }
    Ok((captures, params))
}

/// Store `params` on the request and, if there are captures, prepend them to
/// the URI query.
pub fn attach_params<B>(mut request: Request<B>, captures: &Params, params: Params) -> Request<B> {
    if !captures.is_empty() {
        match rewrite_query(request.uri(), captures) {
            Some(uri) => *request.uri_mut() = uri,
            None => tracing::warn!(uri = %request.uri(), "Could not fold captures into query"),
        }
    }
    request.extensions_mut().insert(params);
    request
}

/// Build `path?<encoded captures>[&<original query>]`.
pub fn rewrite_query(uri: &Uri, captures: &Params) -> Option<Uri> {
    let mut query = captures.encode();
    if let Some(original) = uri.query().filter(|q| !q.is_empty()) {
        query.push('&');
        query.push_str(original);
    }

    let path_and_query: PathAndQuery = format!("{}?{}", uri.path(), query).parse().ok()?;
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    Uri::from_parts(parts).ok()
}
