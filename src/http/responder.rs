//! Config-driven responders.
//!
//! Turns the `[[routes]]` table of a [`ServerConfig`](crate::config::ServerConfig)
//! into a [`Mux`] whose handlers answer with a fixed status, content type and
//! a body template.
//!
//! Templates substitute `{:name}` with the placeholder capture `:name` and
//! `{?name}` with the query parameter `name`. Missing values render empty.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
};

use crate::config::RouteConfig;
use crate::http::handler::{handler_fn, BoxedHandler};
use crate::http::request::{RequestIdExt, RequestParamsExt};
use crate::routing::{MethodFilter, Mux, Params};

/// Build a mux from a route table, one registration per route.
///
/// `GET` routes also answer `HEAD`. Routes with an unparseable method are
/// skipped with a warning (validation normally rejects them earlier).
pub fn register_routes<H, F>(routes: &[RouteConfig], mut make_handler: F) -> Mux<H>
where
    H: Clone,
    F: FnMut(usize, &RouteConfig) -> H,
{
    let mut mux = Mux::new();
    for (index, route) in routes.iter().enumerate() {
        let filter = match route.method.parse::<MethodFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                tracing::warn!(route = %route.label(), error = %e, "Skipping route");
                continue;
            }
        };
        let handler = make_handler(index, route);
        match filter {
            MethodFilter::Only(method) if method == Method::GET => {
                mux.get(route.pattern.as_str(), handler);
            }
            filter => {
                mux.add(filter, route.pattern.as_str(), handler);
            }
        }
    }
    mux
}

/// Build the mux served by the `pattern-mux` binary.
pub fn build_mux(routes: &[RouteConfig]) -> Mux<BoxedHandler> {
    register_routes(routes, |_, route| responder(route))
}

/// Handler answering with the route's status, content type and rendered body.
pub fn responder(route: &RouteConfig) -> BoxedHandler {
    let status = StatusCode::from_u16(route.status).unwrap_or_else(|_| {
        tracing::warn!(route = %route.label(), status = route.status, "Invalid status, using 500");
        StatusCode::INTERNAL_SERVER_ERROR
    });
    let content_type = HeaderValue::from_str(&route.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("text/plain; charset=utf-8"));
    let template: Arc<str> = Arc::from(route.body.as_str());
    let label: Arc<str> = Arc::from(route.label().as_str());

    handler_fn(move |request: Request<Body>| {
        let body = render(&template, request.params());
        tracing::debug!(
            route = %label,
            request_id = request.request_id().unwrap_or("unknown"),
            "Responding"
        );
        let content_type = content_type.clone();
        async move { (status, [(header::CONTENT_TYPE, content_type)], body) }
    })
}

/// Expand `{:name}` and `{?name}` references in `template`.
pub fn render(template: &str, params: Option<&Params>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let reference = match (after.as_bytes().first(), after.find('}')) {
            (Some(b':'), Some(close)) => Some((&after[..close], close)),
            (Some(b'?'), Some(close)) => Some((&after[1..close], close)),
            _ => None,
        };
        match reference {
            Some((key, close)) => {
                if let Some(value) = params.and_then(|p| p.get(key)) {
                    out.push_str(value);
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Params {
        let mut params: Params = [(":name", "keith"), (":name", "second")].into_iter().collect();
        params.merge(Params::from_query("lang=en"));
        params
    }

    #[test]
    fn test_render_captures_and_query() {
        assert_eq!(
            render("hello, {:name} ({?lang})!", Some(&params())),
            "hello, keith (en)!"
        );
    }

    #[test]
    fn test_render_missing_values() {
        assert_eq!(render("[{:nope}][{?nope}]", Some(&params())), "[][]");
        assert_eq!(render("hi {:name}", None), "hi ");
    }

    #[test]
    fn test_render_leaves_other_braces() {
        assert_eq!(render("{\"a\": 1}", Some(&params())), "{\"a\": 1}");
        assert_eq!(render("open {:name", Some(&params())), "open {:name");
        assert_eq!(render("{}{:name}", Some(&params())), "{}keith");
    }

    #[test]
    fn test_register_routes_order_and_methods() {
        let routes = vec![
            RouteConfig::new("GET", "/a/:id"),
            RouteConfig::new("post", "/a/:id"),
            RouteConfig::new("ANY", "/hook"),
            RouteConfig::new("BAD METHOD", "/skipped"),
        ];
        let mux = register_routes(&routes, |index, _| index);

        let methods: Vec<String> = mux
            .registrations()
            .iter()
            .map(|r| format!("{} {} {}", r.method, r.pattern, r.handler))
            .collect();
        assert_eq!(
            methods,
            ["GET /a/:id 0", "HEAD /a/:id 0", "POST /a/:id 1", "ANY /hook 2"]
        );
    }
}
