//! INSERT statement assembly.

use crate::error::{CoreError, Result};
use crate::filter::Fragment;
use crate::ident::{is_wildcard, validate_identifier, validate_table_name};
use crate::model::InsertRequest;
use crate::value::Value;

/// Column that always holds the server-generated row identifier.
pub const ID_COLUMN: &str = "id";

/// Builds `INSERT INTO t (id, c1, ...) VALUES (?, ?, ...)` with `id` bound
/// first, followed by the request values in order.
///
/// # Errors
///
/// [`CoreError::InvalidRequest`] when the request names the `id` column (in
/// any case, with or without surrounding whitespace), when columns and
/// values differ in length, or when a value is an array;
/// [`CoreError::InvalidIdentifier`] for unsafe names.
pub fn build_insert(request: &InsertRequest, id: &str) -> Result<Fragment> {
    if request
        .columns
        .iter()
        .any(|c| c.trim().eq_ignore_ascii_case(ID_COLUMN))
    {
        return Err(CoreError::invalid_request(
            "insert request must not contain the id column; it is generated by the server",
        ));
    }

    if request.columns.len() != request.values.len() {
        return Err(CoreError::invalid_request(format!(
            "{} columns but {} values",
            request.columns.len(),
            request.values.len()
        )));
    }

    if request.table.trim().is_empty() {
        return Err(CoreError::invalid_request("table name is required"));
    }
    validate_table_name(&request.table)?;

    for column in &request.columns {
        if is_wildcard(column) {
            return Err(CoreError::invalid_request("'*' is not a column name"));
        }
        validate_identifier(column)?;
    }

    if let Some(bad) = request.values.iter().find(|v| matches!(v, Value::Array(_))) {
        return Err(CoreError::invalid_request(format!(
            "cannot insert a value of type {}",
            bad.kind()
        )));
    }

    let columns: Vec<&str> = std::iter::once(ID_COLUMN)
        .chain(request.columns.iter().map(String::as_str))
        .collect();
    let placeholders = vec!["?"; columns.len()].join(", ");

    let mut params = Vec::with_capacity(columns.len());
    params.push(Value::Text(id.to_string()));
    params.extend(request.values.iter().cloned());

    Ok(Fragment {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            request.table,
            columns.join(", ")
        ),
        params,
    })
}
