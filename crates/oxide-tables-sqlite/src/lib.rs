//! # oxide-tables-sqlite
//!
//! A table store over SQLite whose schema is discovered at runtime.
//!
//! [`TableStore`] wraps a `sqlx` pool and offers:
//! - Introspection: table listing, column descriptors, row counts
//! - Table creation from a [`TableDescriptor`](oxide_tables_core::TableDescriptor)
//! - Row insertion with server-generated UUID keys
//! - Structured selects, materialized into name → value maps
//! - Raw SQL, only with a [`RawSqlCapability`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use oxide_tables_core::{
//!     ColumnDescriptor, InsertRequest, SelectRequest, TableDescriptor, Value,
//! };
//! use oxide_tables_sqlite::TableStore;
//!
//! # async fn run() -> oxide_tables_sqlite::Result<()> {
//! let store = TableStore::connect("sqlite:inline.db?mode=rwc", 5).await?;
//!
//! store
//!     .create_table(&TableDescriptor::new(
//!         "posts",
//!         vec![
//!             ColumnDescriptor::new("id", "txt").primary_key(),
//!             ColumnDescriptor::new("title", "txt").nullable(),
//!         ],
//!     ))
//!     .await?;
//!
//! let id = store
//!     .insert(&InsertRequest {
//!         table: "posts".into(),
//!         columns: vec!["title".into()],
//!         values: vec!["hello".into()],
//!     })
//!     .await?;
//!
//! let rows = store
//!     .select(&SelectRequest {
//!         table: "posts".into(),
//!         columns: vec!["*".into()],
//!         filters: vec![],
//!     })
//!     .await?;
//! assert_eq!(rows[0]["id"], Value::from(id));
//! # Ok(())
//! # }
//! ```

mod bind;
pub mod create;
pub mod error;
pub mod insert;
pub mod introspect;
pub mod materialize;
pub mod query;
pub mod store;

pub use error::{Result, StoreError};
pub use materialize::{materialize, row_to_map, Row};
pub use query::{returns_rows, RawOutcome};
pub use store::{RawSqlCapability, TableStore, CATALOG_TABLE};
