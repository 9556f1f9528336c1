//! # patmux
//!
//! A path-pattern router for request pipelines. It maps a method and a path
//! to a handler, captures named path parameters, and says "no match" when
//! nothing applies so the next pipeline stage can run.
//!
//! ## Patterns
//!
//! | Pattern | Path | Result |
//! |---|---|---|
//! | `/about` | `/about` | match |
//! | `/users/:id` | `/users/42` | match, `id = "42"` |
//! | `/files/:name.:ext` | `/files/a.pdf` | match, `name = "a"`, `ext = "pdf"` |
//! | `/static/` | `/static/css/site.css` | match (subtree) |
//! | `/static` | `/static/css/site.css` | no match |
//!
//! A parameter value runs up to the literal character after the name in the
//! pattern, or to the end of the path. Routes are tried in registration
//! order; the first match wins.
//!
//! ## What the embedding framework owns
//!
//! Transport, header parsing, TLS, and what to answer when nothing matches.
//! The router never produces a 404 on its own.
//!
//! ## Quick start
//!
//! ```rust
//! use patmux::{Outcome, Request, Response, Router};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let router = Router::new()
//!     .get("/users/:id", show_user)
//!     .get("/docs/", docs);
//!
//! match router.handle(Request::new("GET", "/users/42")).await {
//!     Outcome::Handled(res) => assert_eq!(res.body().as_ref(), b"user 42"),
//!     Outcome::Unmatched(_req) => unreachable!(),
//! }
//! # }
//!
//! async fn show_user(req: Request) -> Response {
//!     Response::text(format!("user {}", req.param("id").unwrap_or("?")))
//! }
//!
//! async fn docs(_req: Request) -> Response {
//!     Response::text("docs")
//! }
//! ```

mod error;
mod handler;
mod params;
mod pattern;
mod request;
mod response;
mod router;
mod shared;

pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler, RedirectFn};
pub use http::Method;
pub use params::Params;
pub use pattern::Pattern;
pub use request::{Context, Request};
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::{DEFAULT_PARAMS_KEY, Outcome, Router};
pub use shared::SharedRouter;
