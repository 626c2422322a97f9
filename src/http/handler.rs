//! Type-erased request handlers stored in the multiplexer.

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;

/// A handler the HTTP layer can invoke for a matched route.
pub type BoxedHandler = Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wrap an async function into a [`BoxedHandler`].
///
/// ```ignore
/// mux.get("/hello/:name", handler_fn(|req: Request<Body>| async move {
///     format!("hello, {}!\n", req.param(":name").unwrap_or_default())
/// }));
/// ```
pub fn handler_fn<F, Fut, R>(f: F) -> BoxedHandler
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |request: Request<Body>| -> BoxFuture<'static, Response> {
        let fut = f(request);
        Box::pin(async move { fut.await.into_response() })
    })
}
