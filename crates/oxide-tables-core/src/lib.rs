//! # oxide-tables-core
//!
//! Database-free building blocks for a schema-discoverable table store.
//!
//! This crate provides:
//! - Identifier validation for names that must be written into SQL text
//! - Logical column types and their SQLite spelling
//! - A tagged [`Value`] shared by filters, inserts and result rows
//! - Parameterized SELECT / INSERT builders and CREATE TABLE planning
//!
//! Nothing here talks to a database; see `oxide-tables-sqlite` for that.
//!
//! ## Filters
//!
//! ```rust
//! use oxide_tables_core::{
//!     build_select, ColumnSet, FilterCondition, FilterGroup, Logic, SelectRequest, Value,
//! };
//!
//! let request = SelectRequest {
//!     table: "users".to_string(),
//!     columns: vec!["*".to_string()],
//!     filters: vec![
//!         FilterGroup::new(vec![FilterCondition::new("age", "gte", 18)], Logic::And),
//!         FilterGroup::new(
//!             vec![
//!                 FilterCondition::new("status", "eq", "active"),
//!                 FilterCondition::new("status", "eq", "pending"),
//!             ],
//!             Logic::Or,
//!         ),
//!     ],
//! };
//!
//! let columns = ColumnSet::new("users", ["id", "age", "status"]);
//! let query = build_select(&request, &columns).unwrap();
//! assert_eq!(
//!     query.sql,
//!     "SELECT * FROM users WHERE (age >= ?) AND (status = ? OR status = ?)"
//! );
//! assert_eq!(query.params[0], Value::Integer(18));
//! ```

pub mod ddl;
pub mod error;
pub mod filter;
pub mod ident;
pub mod insert;
pub mod model;
pub mod select;
pub mod types;
pub mod value;

pub use ddl::{index_name, plan_create_table, CreateTablePlan};
pub use error::{CoreError, Result};
pub use filter::{build_condition, compose_where, ColumnSet, Fragment, Operator};
pub use ident::{is_wildcard, validate_identifier, validate_table_name, WILDCARD};
pub use insert::{build_insert, ID_COLUMN};
pub use model::{
    ColumnDescriptor, FilterCondition, FilterGroup, InsertRequest, Logic, RawQuery,
    SelectRequest, TableDescriptor,
};
pub use select::build_select;
pub use types::{is_textual, native_type, LogicalType};
pub use value::Value;
