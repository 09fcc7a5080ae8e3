//! # oxide-tables-server
//!
//! HTTP front end for [`oxide_tables_sqlite::TableStore`].
//!
//! | Path | Method | Body | Answer |
//! |---|---|---|---|
//! | `/admin/health` | GET | | `{"ok": bool}` |
//! | `/admin/overview` | GET | | `{"count": n}` |
//! | `/admin/tables` | GET | | table descriptors |
//! | `/admin/table?name=X` | GET | | one descriptor, or all without `name` |
//! | `/admin/table` | POST | table descriptor | the created table |
//! | `/admin/query` | POST | `{"query": sql}` | `{"data": rows}` or `{"message", "rows_affected"}` |
//! | `/v1/select` | GET | select request | array of rows |
//! | `/v1/insert` | POST | insert request | `{"msg": "success", "id": id}` |
//!
//! Errors are `{"error": message}` with a 400, 403, 404, 405 or 500 status.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use app::{build_router, AppState};
pub use config::Cli;
pub use error::ApiError;
pub use server::{serve, shutdown_signal};
