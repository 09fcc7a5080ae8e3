//! Middleware support for request/response processing.

pub use futures::future::BoxFuture;
use tracing::info;

use crate::request::{Method, Request};
use crate::response::Response;

/// Result of middleware processing.
pub enum MiddlewareResult {
    /// Continue to the next middleware/handler.
    Continue(Request),
    /// Stop processing and return this response.
    Response(Response),
}

/// Trait for middleware that processes requests and responses.
///
/// Middleware can:
/// - Modify the request before it reaches the handler
/// - Short-circuit processing and return a response
/// - Modify the response after the handler runs
///
/// `after` runs for every response, including short-circuited ones, and
/// sees the request as the handler received it.
pub trait Middleware: Send + Sync {
    /// Called before the request handler.
    fn before<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, MiddlewareResult>;

    /// Called after the request handler.
    fn after<'a>(&'a self, req: &'a Request, res: Response) -> BoxFuture<'a, Response>;
}

/// Logs one line per request: status, method, client IP, path and latency.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn before<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, MiddlewareResult> {
        Box::pin(async move { MiddlewareResult::Continue(req.clone()) })
    }

    fn after<'a>(&'a self, req: &'a Request, res: Response) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let ip = req.client_ip().unwrap_or_else(|| "-".to_string());
            info!(
                status = res.status,
                method = %req.method,
                ip = %ip,
                path = %req.path,
                latency = ?req.received_at.elapsed(),
                "Request handled"
            );
            res
        })
    }
}

/// Middleware that adds CORS headers.
pub struct CorsMiddleware {
    /// Allowed origins.
    pub allowed_origins: Vec<String>,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Allowed headers.
    pub allowed_headers: Vec<String>,
}

impl CorsMiddleware {
    /// Creates CORS middleware that allows all origins.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["*".to_string()],
        }
    }

}

impl Middleware for CorsMiddleware {
    fn before<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, MiddlewareResult> {
        Box::pin(async move {
            if req.method == Method::Options {
                let res = Response::new(204)
                    .header(
                        "Access-Control-Allow-Methods",
                        self.allowed_methods.join(", "),
                    )
                    .header(
                        "Access-Control-Allow-Headers",
                        self.allowed_headers.join(", "),
                    )
                    .header("Access-Control-Max-Age", "86400");
                return MiddlewareResult::Response(res);
            }
            MiddlewareResult::Continue(req.clone())
        })
    }

    fn after<'a>(&'a self, _req: &'a Request, res: Response) -> BoxFuture<'a, Response> {
        let origins = self.allowed_origins.join(", ");
        Box::pin(async move { res.header("Access-Control-Allow-Origin", origins) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cors_preflight_short_circuits() {
        let mw = CorsMiddleware::permissive();
        let req = Request::new(Method::Options, "/v1/select");
        let MiddlewareResult::Response(res) = mw.before(&req).await else {
            panic!("expected preflight response");
        };
        assert_eq!(res.status, 204);
        let res = mw.after(&req, res).await;
        assert_eq!(
            res.headers.get("Access-Control-Allow-Origin"),
            Some(&"*".to_string())
        );
    }

    #[tokio::test]
    async fn test_logging_passes_response_through() {
        let req = Request::get("/admin/health");
        let res = LoggingMiddleware.after(&req, Response::new(418)).await;
        assert_eq!(res.status, 418);
    }
}
