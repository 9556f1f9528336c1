//! Route table that can change while requests are being served.
//!
//! A plain [`Router`] is fixed once serving starts. [`SharedRouter`] keeps an
//! immutable snapshot behind an [`ArcSwap`]: readers grab the current
//! snapshot without locking, writers build a modified copy and swap it in.
//! A dispatch that already loaded a snapshot finishes against it.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use crate::request::Request;
use crate::router::{Outcome, Router};

pub struct SharedRouter {
    current: ArcSwap<Router>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self { current: ArcSwap::from_pointee(router) }
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<Router> {
        self.current.load_full()
    }

    /// Replaces the whole table.
    pub fn store(&self, router: Router) {
        self.current.store(Arc::new(router));
        debug!("route table replaced");
    }

    /// Applies `f` to a copy of the current table and publishes the result.
    ///
    /// `f` may run more than once if another writer races this one, so it
    /// should only register routes.
    ///
    /// ```rust
    /// use patmux::{Request, Response, Router, SharedRouter};
    ///
    /// # async fn beta(_: Request) -> Response { Response::text("") }
    /// let shared = SharedRouter::new(Router::new());
    /// shared.update(|router| router.get("/beta/", beta));
    /// ```
    pub fn update<F>(&self, f: F)
    where
        F: Fn(Router) -> Router,
    {
        self.current.rcu(|current| f(Router::clone(current)));
        debug!("route table updated");
    }

    /// [`Router::handle`] against the current snapshot.
    pub async fn handle(&self, req: Request) -> Outcome {
        self.load().handle(req).await
    }
}

impl From<Router> for SharedRouter {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}
