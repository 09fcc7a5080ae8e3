//! SELECT statement assembly for structured requests.

use crate::error::{CoreError, Result};
use crate::filter::{compose_where, ColumnSet, Fragment};
use crate::ident::{is_wildcard, validate_table_name};
use crate::model::SelectRequest;

/// Builds `SELECT <columns> FROM <table> [WHERE ...]` for `request`.
///
/// `columns` must describe the live schema of `request.table`. The
/// statement is returned with its parameters; nothing is executed.
///
/// # Errors
///
/// [`CoreError::InvalidRequest`] for an empty table name, no columns or an
/// unknown column; [`CoreError::InvalidIdentifier`] for unsafe names; any
/// filter error from [`compose_where`].
pub fn build_select(request: &SelectRequest, columns: &ColumnSet) -> Result<Fragment> {
    let table = request.table.as_str();
    if table.trim().is_empty() {
        return Err(CoreError::invalid_request("table name is required"));
    }
    validate_table_name(table)?;

    if request.columns.is_empty() {
        return Err(CoreError::invalid_request("no columns specified"));
    }

    for column in &request.columns {
        if is_wildcard(column) {
            continue;
        }
        columns.require(column)?;
    }

    let filter = compose_where(columns, &request.filters)?;

    let mut sql = format!("SELECT {} FROM {table}", request.columns.join(", "));
    if !filter.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&filter.sql);
    }

    Ok(Fragment {
        sql,
        params: filter.params,
    })
}
