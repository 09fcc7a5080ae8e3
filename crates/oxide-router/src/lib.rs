//! # oxide-router
//!
//! A small async HTTP router with middleware support.
//!
//! This crate provides:
//! - Exact path matching, with 404 for unknown paths and 405 for known
//!   paths requested with the wrong method
//! - Route groups with prefixes
//! - Query string parsing
//! - JSON responses and `{"error": ...}` bodies
//! - Middleware with before/after hooks, including a `tracing` request
//!   logger and CORS
//!
//! The router is transport-agnostic: the server converts its HTTP library's
//! request into a [`Request`] and the returned [`Response`] back.
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_router::{CorsMiddleware, LoggingMiddleware, Request, Response, RouteGroup, Router};
//!
//! async fn health(_req: Request) -> Response {
//!     Response::json(&serde_json::json!({"ok": true}))
//! }
//!
//! let router = Router::new()
//!     .middleware(LoggingMiddleware)
//!     .middleware(CorsMiddleware::permissive())
//!     .group(RouteGroup::new("/admin").get("/health", health));
//!
//! let response = futures::executor::block_on(router.handle(Request::get("/admin/health")));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
//! ```

mod error;
mod middleware;
mod request;
mod response;
mod router;

pub use error::{Result, RouterError};
pub use middleware::{BoxFuture, CorsMiddleware, LoggingMiddleware, Middleware, MiddlewareResult};
pub use request::{Method, Request};
pub use response::Response;
pub use router::{Handler, Route, RouteGroup, Router};
