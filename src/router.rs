//! First-match path-pattern router.
//!
//! One ordered route list per HTTP method. A request is tried against its
//! method's routes in registration order and the first pattern that matches
//! wins. When nothing matches the router says so and stays out of the way:
//! 404s, 405s and fallbacks belong to whoever embeds it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::Method;
use tracing::{debug, trace};

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler, Redirect, RedirectFn};
use crate::params::Params;
use crate::pattern::Pattern;
use crate::request::Request;
use crate::response::Response;

/// Context key the router stores matched [`Params`] under unless configured
/// otherwise with [`Router::with_params_key`].
pub const DEFAULT_PARAMS_KEY: &str = "params";

#[derive(Clone)]
struct Route {
    pattern: Pattern,
    handler: BoxedHandler,
}

/// The application router.
///
/// Build it once at startup, then share it (`Arc<Router>`) with whatever
/// serves requests. Dispatch only reads the table, so concurrent requests
/// need no locking. To change routes while serving, use
/// [`SharedRouter`](crate::SharedRouter).
///
/// Registration chains by value:
///
/// ```rust
/// use patmux::{Request, Response, Router};
///
/// # async fn show_user(_: Request) -> Response { Response::text("") }
/// # async fn create_user(_: Request) -> Response { Response::text("") }
/// # async fn assets(_: Request) -> Response { Response::text("") }
/// let router = Router::new()
///     .get("/users/:id", show_user)
///     .post("/users", create_user)
///     .get("/assets/", assets);
/// ```
///
/// A pattern ending in `/` also registers its slash-less form as a redirect
/// to the slash form: above, `GET /assets` answers `302 Found` with
/// `location: /assets/`.
#[derive(Clone)]
pub struct Router {
    routes: HashMap<Method, Vec<Route>>,
    params_key: String,
    redirect: RedirectFn,
}

/// Result of [`Router::handle`].
#[derive(Debug)]
pub enum Outcome {
    /// A route matched and its handler produced this response.
    Handled(Response),
    /// No route matched; the request comes back untouched for the next stage.
    Unmatched(Request),
}

impl Outcome {
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Handled(res) => Some(res),
            Self::Unmatched(_) => None,
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            params_key: DEFAULT_PARAMS_KEY.to_owned(),
            redirect: Response::redirect,
        }
    }

    /// Stores matched parameters under `key` in the request context.
    pub fn with_params_key(mut self, key: impl Into<String>) -> Self {
        self.params_key = key.into();
        self
    }

    /// Replaces the builder used for trailing-slash redirects.
    ///
    /// Applies to patterns registered after this call.
    pub fn with_redirect(mut self, build: RedirectFn) -> Self {
        self.redirect = build;
        self
    }

    pub fn params_key(&self) -> &str {
        &self.params_key
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Registers `handler` for `pattern` under `method`.
    ///
    /// Any method token works, including extensions such as `PROPFIND` or
    /// `PURGE` (`Method::from_bytes(b"PURGE")`).
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is malformed. Use [`Router::try_add`] to get the
    /// error instead.
    pub fn add(self, method: Method, pattern: &str, handler: impl Handler) -> Self {
        self.insert(&[method], pattern, handler.into_boxed_handler())
    }

    /// Fallible form of [`Router::add`].
    pub fn try_add(
        self,
        method: Method,
        pattern: &str,
        handler: impl Handler,
    ) -> Result<Self, Error> {
        self.try_insert(&[method], pattern, handler.into_boxed_handler())
    }

    pub fn head(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::HEAD, pattern, handler)
    }

    /// Registers for GET and for HEAD.
    ///
    /// To give HEAD its own handler, register it with [`Router::head`]
    /// *before* this call: the earlier route wins.
    pub fn get(self, pattern: &str, handler: impl Handler) -> Self {
        self.insert(&[Method::HEAD, Method::GET], pattern, handler.into_boxed_handler())
    }

    pub fn post(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::POST, pattern, handler)
    }

    pub fn put(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::PUT, pattern, handler)
    }

    pub fn delete(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::DELETE, pattern, handler)
    }

    pub fn options(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::OPTIONS, pattern, handler)
    }

    fn insert(self, methods: &[Method], pattern: &str, handler: BoxedHandler) -> Self {
        self.try_insert(methods, pattern, handler)
            .unwrap_or_else(|e| panic!("invalid route: {e}"))
    }

    fn try_insert(
        mut self,
        methods: &[Method],
        pattern: &str,
        handler: BoxedHandler,
    ) -> Result<Self, Error> {
        let pattern = Pattern::parse(pattern)?;
        for method in methods {
            self.register(method.clone(), pattern.clone(), Arc::clone(&handler));
        }
        Ok(self)
    }

    /// Appends the route, then its slash-less redirect twin if the pattern
    /// ends in `/`.
    fn register(&mut self, method: Method, pattern: Pattern, handler: BoxedHandler) {
        let twin = pattern.without_trailing_separator().map(|bare| {
            let redirect: BoxedHandler = Arc::new(Redirect::new(pattern.as_str(), self.redirect));
            (bare, redirect)
        });

        debug!(%method, %pattern, "route registered");
        self.append(method.clone(), pattern, handler);

        if let Some((bare, redirect)) = twin {
            debug!(%method, pattern = %bare, "trailing-slash redirect registered");
            self.append(method, bare, redirect);
        }
    }

    fn append(&mut self, method: Method, pattern: Pattern, handler: BoxedHandler) {
        self.routes
            .entry(method)
            .or_default()
            .push(Route { pattern, handler });
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    /// First route for `method` whose pattern matches `path`, with the
    /// parameters it captured.
    pub fn find(&self, method: &Method, path: &str) -> Option<(&BoxedHandler, Params)> {
        self.routes.get(method)?.iter().find_map(|route| {
            route.pattern.matches(path).map(|params| (&route.handler, params))
        })
    }

    /// Picks the handler for `req`.
    ///
    /// On a match the captured [`Params`] are written into the request
    /// context under [`Router::params_key`] and the handler is returned.
    /// `None` means no route applies; the context is left untouched.
    pub fn select(&self, req: &mut Request) -> Option<BoxedHandler> {
        let Ok(method) = Method::from_bytes(req.method().as_bytes()) else {
            trace!(method = req.method(), path = req.path(), "unroutable method");
            return None;
        };

        let Some((handler, params)) = self.find(&method, req.path()) else {
            trace!(%method, path = req.path(), "no route matched");
            return None;
        };

        trace!(%method, path = req.path(), params = params.len(), "route matched");
        req.context.insert(self.params_key.clone(), params);
        Some(Arc::clone(handler))
    }

    /// Selects and runs the handler for `req`, or hands the request back.
    pub async fn handle(&self, mut req: Request) -> Outcome {
        match self.select(&mut req) {
            Some(handler) => Outcome::Handled(handler.call(req).await),
            None => Outcome::Unmatched(req),
        }
    }

    /// Methods with a route matching `path`, for building `405` + `Allow`.
    /// Sorted by name.
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self
            .routes
            .keys()
            .filter(|m| self.find(m, path).is_some())
            .cloned()
            .collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// Registered patterns for `method`, in match order.
    pub fn patterns(&self, method: &Method) -> impl Iterator<Item = &str> {
        self.routes
            .get(method)
            .into_iter()
            .flatten()
            .map(|route| route.pattern.as_str())
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buckets: Vec<_> = self.routes.iter().collect();
        buckets.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

        let mut routes = f.debug_map();
        for (method, bucket) in buckets {
            let patterns: Vec<&str> = bucket.iter().map(|r| r.pattern.as_str()).collect();
            routes.entry(&method.as_str(), &patterns);
        }
        routes.finish()
    }
}
