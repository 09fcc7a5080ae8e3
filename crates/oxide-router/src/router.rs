//! Main router implementation.

use std::future::Future;
use std::sync::Arc;

use crate::error::{Result, RouterError};
use crate::middleware::{BoxFuture, Middleware, MiddlewareResult};
use crate::request::{Method, Request};
use crate::response::Response;

/// A boxed async handler function.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// A single route definition.
#[derive(Clone)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// Exact path, stored without a trailing slash.
    pub path: String,
    /// Request handler.
    pub handler: Handler,
}

/// Strips one trailing slash, keeping `/` itself.
fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

impl Route {
    /// Creates a new route.
    pub fn new<F, Fut>(method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            method,
            path: normalize(path).to_string(),
            handler: Arc::new(move |req| Box::pin(handler(req))),
        }
    }

    /// Whether this route serves `path`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.path == normalize(path)
    }
}

/// A group of routes with a common prefix.
pub struct RouteGroup {
    prefix: String,
    routes: Vec<Route>,
}

impl RouteGroup {
    /// Creates a new route group with the given prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
            routes: Vec::new(),
        }
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Get, path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Post, path, handler)
    }

    /// Adds a route with any method.
    #[must_use]
    pub fn route<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let full_path = format!("{}{}", self.prefix, path);
        self.routes.push(Route::new(method, &full_path, handler));
        self
    }

    /// Returns the routes in this group.
    #[must_use]
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

/// The main router for handling HTTP requests.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Router {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Get, path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Post, path, handler)
    }

    /// Adds a route with any method.
    #[must_use]
    pub fn route<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.routes.push(Route::new(method, path, handler));
        self
    }

    /// Adds global middleware. `before` hooks run in registration order,
    /// `after` hooks in reverse.
    #[must_use]
    pub fn middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(mw));
        self
    }

    /// Adds a route group.
    #[must_use]
    pub fn group(mut self, group: RouteGroup) -> Self {
        self.routes.extend(group.into_routes());
        self
    }

    /// Handles an incoming request.
    pub fn handle(&self, mut request: Request) -> BoxFuture<'_, Response> {
        Box::pin(async move {
            let mut early = None;
            for mw in &self.middleware {
                match mw.before(&request).await {
                    MiddlewareResult::Continue(req) => request = req,
                    MiddlewareResult::Response(res) => {
                        early = Some(res);
                        break;
                    }
                }
            }

            let mut response = match early {
                Some(res) => res,
                None => match self.find_route(&request) {
                    Ok(route) => (route.handler)(request.clone()).await,
                    Err(RouterError::NotFound { .. }) => Response::not_found(),
                    Err(RouterError::MethodNotAllowed { .. }) => Response::method_not_allowed(),
                },
            };

            for mw in self.middleware.iter().rev() {
                response = mw.after(&request, response).await;
            }

            response
        })
    }

    /// Finds the route for the request's method and path.
    fn find_route(&self, request: &Request) -> Result<&Route> {
        let mut path_matched = false;

        for route in &self.routes {
            if route.matches(&request.path) {
                path_matched = true;
                if route.method == request.method {
                    return Ok(route);
                }
            }
        }

        if path_matched {
            Err(RouterError::MethodNotAllowed {
                method: request.method.to_string(),
                path: request.path.clone(),
            })
        } else {
            Err(RouterError::NotFound {
                method: request.method.to_string(),
                path: request.path.clone(),
            })
        }
    }
}
