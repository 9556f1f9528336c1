//! Minimal patmux demo: a router dispatching in-memory requests.
//!
//! Run with:
//!   RUST_LOG=trace cargo run --example basic
//!
//! A real application would sit the router inside its HTTP server and turn
//! `Outcome::Unmatched` into its own fallback; here the fallback is a 404.

use http::StatusCode;
use patmux::{Outcome, Request, Response, Router};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .get("/users/:id", get_user)
        .post("/users", create_user)
        .delete("/users/:id", delete_user)
        .get("/files/:name.:ext", get_file)
        .get("/static/", serve_static);

    let requests = [
        Request::new("GET", "/users/42"),
        Request::new("POST", "/users").with_body(r#"{"name":"alice"}"#),
        Request::new("DELETE", "/users/42"),
        Request::new("GET", "/files/report.pdf"),
        Request::new("GET", "/static"),
        Request::new("GET", "/static/css/site.css"),
        Request::new("GET", "/nowhere"),
        Request::new("PUT", "/users/42"),
    ];

    for req in requests {
        let line = format!("{} {}", req.method(), req.path());
        let res = match app.handle(req).await {
            Outcome::Handled(res) => res,
            Outcome::Unmatched(req) if !app.allowed(req.path()).is_empty() => {
                Response::status(StatusCode::METHOD_NOT_ALLOWED)
            }
            Outcome::Unmatched(_) => Response::status(StatusCode::NOT_FOUND),
        };
        info!(
            request = %line,
            status = %res.status_code(),
            location = res.header("location").unwrap_or("-"),
            body = %String::from_utf8_lossy(res.body()),
        );
    }
}

// GET /users/:id
async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes())
}

// POST /users
async fn create_user(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }

    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/99")
        .json(r#"{"id":"99","name":"new_user"}"#)
}

// DELETE /users/:id → 204 No Content
async fn delete_user(_req: Request) -> StatusCode {
    StatusCode::NO_CONTENT
}

// GET /files/:name.:ext
async fn get_file(req: Request) -> String {
    format!(
        "file {} of type {}",
        req.param("name").unwrap_or_default(),
        req.param("ext").unwrap_or_default()
    )
}

// GET /static/ and everything below it
async fn serve_static(req: Request) -> String {
    format!("static asset {}", req.path())
}
