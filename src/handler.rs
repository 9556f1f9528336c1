//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! A route table holds handlers of many concrete types in one
//! `Vec<Route>`, so every handler is erased behind `dyn ErasedHandler`:
//!
//! ```text
//! async fn show(req: Request) -> Response { … }    ← user writes this
//!        ↓ router.get("/users/:id", show)
//! show.into_boxed_handler()                        ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(show))                        ← stored as BoxedHandler
//!        ↓
//! handler.call(req)  at request time               ← one vtable dispatch
//! ```
//!
//! The router's own trailing-slash redirects are a second implementation of
//! the same interface, so dispatch never has to tell them apart.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Dispatch interface shared by user handlers and synthesized redirects.
///
/// `#[doc(hidden)] pub` because it appears in the return type of the public
/// `Handler` trait's `into_boxed_handler` method and in [`Router::select`].
///
/// [`Router::select`]: crate::Router::select
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Builds the redirect response for a slash-less pattern twin, given the
/// request and the slash-terminated target.
pub type RedirectFn = fn(&Request, &str) -> Response;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `async fn` (or closure returning a future)
/// with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The trait is **sealed**: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrappers ─────────────────────────────────────────────────────────

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Redirects every request it receives to a fixed target.
pub(crate) struct Redirect {
    target: String,
    build: RedirectFn,
}

impl Redirect {
    pub(crate) fn new(target: impl Into<String>, build: RedirectFn) -> Self {
        Self { target: target.into(), build }
    }
}

impl ErasedHandler for Redirect {
    fn call(&self, req: Request) -> BoxFuture {
        let res = (self.build)(&req, &self.target);
        Box::pin(async move { res })
    }
}
