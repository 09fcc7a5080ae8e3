//! Structured selects and raw SQL.

use oxide_tables_core::{build_select, validate_table_name, CoreError, SelectRequest};
use tracing::{debug, warn};

use crate::bind::prepare;
use crate::error::{Result, StoreError};
use crate::materialize::{materialize, Row};
use crate::store::{RawSqlCapability, TableStore};

/// Leading keywords of raw statements whose rows are returned.
const ROW_KEYWORDS: &[&str] = &["select", "with", "pragma", "explain"];

/// Result of a raw SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutcome {
    /// The statement produced rows.
    Rows(Vec<Row>),
    /// The statement was executed for its effect.
    Executed {
        /// Rows changed, as reported by SQLite.
        rows_affected: u64,
    },
}

/// Whether a raw statement is answered with rows, judged by its first word.
#[must_use]
pub fn returns_rows(sql: &str) -> bool {
    let first = sql
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default();
    ROW_KEYWORDS.iter().any(|k| first.eq_ignore_ascii_case(k))
}

impl TableStore {
    /// Runs a structured select and materializes every row.
    ///
    /// Column names are checked against the live schema before the
    /// statement is built.
    ///
    /// # Errors
    ///
    /// [`StoreError::Core`] for an invalid request, [`StoreError::NotFound`]
    /// for an unknown table, [`StoreError::Execution`] or
    /// [`StoreError::Scan`] from SQLite.
    pub async fn select(&self, request: &SelectRequest) -> Result<Vec<Row>> {
        if request.table.trim().is_empty() {
            return Err(CoreError::InvalidRequest("table name is required".to_string()).into());
        }
        validate_table_name(&request.table)?;

        let columns = self.column_set(&request.table).await?;
        let statement = build_select(request, &columns)?;

        debug!(sql = %statement.sql, params = statement.params.len(), "Executing SQL");
        materialize(prepare(&statement).fetch(&self.pool)).await
    }

    /// Runs caller-supplied SQL verbatim.
    ///
    /// No identifier or value checks apply; `capability` is proof that the
    /// caller is allowed to do this.
    ///
    /// # Errors
    ///
    /// [`StoreError::Core`] for an empty statement, [`StoreError::Execution`]
    /// or [`StoreError::Scan`] from SQLite.
    pub async fn raw_query(&self, _capability: &RawSqlCapability, sql: &str) -> Result<RawOutcome> {
        if sql.trim().is_empty() {
            return Err(CoreError::InvalidRequest("query is required".to_string()).into());
        }

        warn!(sql = %sql, "Executing raw SQL");
        if returns_rows(sql) {
            let rows = materialize(sqlx::raw_sql(sql).fetch(&self.pool)).await?;
            Ok(RawOutcome::Rows(rows))
        } else {
            let result = sqlx::raw_sql(sql)
                .execute(&self.pool)
                .await
                .map_err(StoreError::execution("execute query"))?;
            Ok(RawOutcome::Executed {
                rows_affected: result.rows_affected(),
            })
        }
    }
}
