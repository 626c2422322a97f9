//! Responses for outcomes that never reach a route handler.
//!
//! # Design Decisions
//! - Redirects are permanent (301) and carry the original query string
//! - 405 responses always list the allowed methods in the `Allow` header
//! - Bodies are short plain-text messages

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

/// 301 to `location`.
pub fn redirect(location: &str) -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}

/// 405 with an `Allow` header.
pub fn method_not_allowed(allowed: &[Method]) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, allow_header(allowed))],
        "Method Not Allowed\n",
    )
        .into_response()
}

/// 400 for a request path that cannot be decoded.
pub fn bad_request() -> Response {
    (StatusCode::BAD_REQUEST, "400 bad request\n").into_response()
}

/// Plain 404.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}

/// `Allow` header value: methods joined with ", ".
pub fn allow_header(allowed: &[Method]) -> String {
    allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_header() {
        assert_eq!(allow_header(&[Method::POST, Method::PUT]), "POST, PUT");
        assert_eq!(allow_header(&[Method::GET]), "GET");
        assert_eq!(allow_header(&[]), "");
    }

    #[test]
    fn test_redirect() {
        let res = redirect("/foo/?a=b");
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[header::LOCATION], "/foo/?a=b");
    }

    #[test]
    fn test_method_not_allowed() {
        let res = method_not_allowed(&[Method::POST, Method::PUT]);
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[header::ALLOW], "POST, PUT");
    }

    #[test]
    fn test_bad_request() {
        assert_eq!(bad_request().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found() {
        assert_eq!(not_found().status(), StatusCode::NOT_FOUND);
    }
}
