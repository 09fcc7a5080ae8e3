//! Route table and shared state.

use std::future::Future;

use oxide_router::{
    BoxFuture, CorsMiddleware, LoggingMiddleware, Request, Response, RouteGroup, Router,
};
use oxide_tables_sqlite::{RawSqlCapability, TableStore};

use crate::error::Result;
use crate::handlers::{self, respond};

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The table store.
    pub store: TableStore,
    /// Present only when raw SQL is enabled.
    pub raw_sql: Option<RawSqlCapability>,
}

impl AppState {
    /// Creates the state.
    #[must_use]
    pub const fn new(store: TableStore, raw_sql: Option<RawSqlCapability>) -> Self {
        Self { store, raw_sql }
    }
}

/// Adapts a stateful, fallible handler to the router's handler shape.
fn with_state<F, Fut>(
    state: &AppState,
    handler: F,
) -> impl Fn(Request) -> BoxFuture<'static, Response> + Send + Sync + 'static
where
    F: Fn(Request, AppState) -> Fut + Copy + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    let state = state.clone();
    move |req| {
        let state = state.clone();
        let fut: BoxFuture<'static, Response> =
            Box::pin(async move { respond(handler(req, state).await) });
        fut
    }
}

/// Builds the full route table:
///
/// | Path | Method |
/// |---|---|
/// | `/admin/health` | GET |
/// | `/admin/overview` | GET |
/// | `/admin/tables` | GET |
/// | `/admin/table` | GET, POST |
/// | `/admin/query` | POST |
/// | `/v1/select` | GET |
/// | `/v1/insert` | POST |
#[must_use]
pub fn build_router(state: &AppState) -> Router {
    let admin = RouteGroup::new("/admin")
        .get("/health", with_state(state, handlers::health))
        .get("/overview", with_state(state, handlers::overview))
        .get("/tables", with_state(state, handlers::list_tables))
        .get("/table", with_state(state, handlers::get_table))
        .post("/table", with_state(state, handlers::create_table))
        .post("/query", with_state(state, handlers::raw_query));

    let v1 = RouteGroup::new("/v1")
        .get("/select", with_state(state, handlers::select))
        .post("/insert", with_state(state, handlers::insert));

    Router::new()
        .middleware(LoggingMiddleware)
        .middleware(CorsMiddleware::permissive())
        .group(admin)
        .group(v1)
}
