//! Incoming request type and its per-request context store.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

use crate::params::Params;
use crate::router::DEFAULT_PARAMS_KEY;

/// An incoming request as the router sees it.
///
/// The surrounding framework owns transport and parsing; it hands the router
/// a method, a path and whatever headers/body it wants handlers to see.
/// Build one with [`Request::new`] or convert from an [`http::Request`].
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) context: Context,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            body: Bytes::new(),
            context: Context::default(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }
    pub fn context(&self) -> &Context { &self.context }
    pub fn context_mut(&mut self) -> &mut Context { &mut self.context }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parameters stored by a router using the default key.
    ///
    /// Routers configured with [`Router::with_params_key`] store them
    /// elsewhere; read those with `context().get::<Params>(key)`.
    ///
    /// [`Router::with_params_key`]: crate::Router::with_params_key
    pub fn params(&self) -> Option<&Params> {
        self.context.get::<Params>(DEFAULT_PARAMS_KEY)
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/:id`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params()?.get(name)
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .field("context", &self.context)
            .finish()
    }
}

/// Only the URI path is kept; the query string is not part of routing.
/// Headers that are not valid UTF-8 are dropped.
impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        let headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        Self {
            method: parts.method.as_str().to_owned(),
            path: parts.uri.path().to_owned(),
            headers,
            body,
            context: Context::default(),
        }
    }
}

// ── Context ───────────────────────────────────────────────────────────────────

/// String-keyed, per-request value store.
///
/// Pipeline stages use it to pass data along with the request. The router
/// writes the matched [`Params`] here; other stages may store anything that
/// is `Send + Sync + 'static`.
#[derive(Default)]
pub struct Context {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Context {
    /// Stores `value` under `key`, returning `true` if a previous value was replaced.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) -> bool {
        self.values.insert(key.into(), Box::new(value)).is_some()
    }

    /// The value under `key`, if present and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key)?.downcast_mut()
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
