//! Endpoint handlers.
//!
//! Each handler decodes its input, calls the store and serializes the
//! outcome. Failures are rendered by [`ApiError::into_response`].

use oxide_router::{Request, Response};
use oxide_tables_core::{InsertRequest, RawQuery, SelectRequest, TableDescriptor};
use oxide_tables_sqlite::{RawOutcome, Row, StoreError};
use serde::Serialize;
use serde_json::json;

use crate::app::AppState;
use crate::error::{ApiError, Result};

#[derive(Serialize)]
struct RowsBody<'a> {
    data: &'a [Row],
}

#[derive(Serialize)]
struct ExecutedBody {
    message: &'static str,
    rows_affected: u64,
}

/// Turns a handler result into a response.
pub fn respond(result: Result<Response>) -> Response {
    result.unwrap_or_else(ApiError::into_response)
}

/// `GET /admin/health`
pub async fn health(_req: Request, state: AppState) -> Result<Response> {
    let ok = state.store.health_check().await?;
    Ok(Response::json(&json!({ "ok": ok })))
}

/// `GET /admin/overview`
pub async fn overview(_req: Request, state: AppState) -> Result<Response> {
    let count = state.store.count_tables().await?;
    Ok(Response::json(&json!({ "count": count })))
}

/// `GET /admin/tables`
pub async fn list_tables(_req: Request, state: AppState) -> Result<Response> {
    let tables = state.store.list_tables().await?;
    Ok(Response::json(&tables))
}

/// `GET /admin/table?name=X`; without a name, lists every table.
pub async fn get_table(req: Request, state: AppState) -> Result<Response> {
    match req.get_query("name").map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let table = state.store.describe_table(name).await?;
            Ok(Response::json(&table))
        }
        None => list_tables(req, state).await,
    }
}

/// `POST /admin/table`
pub async fn create_table(req: Request, state: AppState) -> Result<Response> {
    let descriptor: TableDescriptor = req.json()?;
    let table = state.store.create_table(&descriptor).await?;
    Ok(Response::json(&table))
}

/// `POST /admin/query`
pub async fn raw_query(req: Request, state: AppState) -> Result<Response> {
    let capability = state
        .raw_sql
        .ok_or(StoreError::Forbidden("raw SQL is disabled"))?;
    let body: RawQuery = req.json()?;

    Ok(match state.store.raw_query(&capability, &body.query).await? {
        RawOutcome::Rows(rows) => Response::json(&RowsBody { data: &rows }),
        RawOutcome::Executed { rows_affected } => Response::json(&ExecutedBody {
            message: "success",
            rows_affected,
        }),
    })
}

/// `GET /v1/select` with a JSON body.
pub async fn select(req: Request, state: AppState) -> Result<Response> {
    let request: SelectRequest = req.json()?;
    let rows = state.store.select(&request).await?;
    Ok(Response::json(&rows))
}

/// `POST /v1/insert`
pub async fn insert(req: Request, state: AppState) -> Result<Response> {
    let request: InsertRequest = req.json()?;
    let id = state.store.insert(&request).await?;
    Ok(Response::json(&json!({ "msg": "success", "id": id })))
}
