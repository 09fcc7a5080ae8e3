//! CREATE TABLE planning.
//!
//! Turns a [`TableDescriptor`] into the statements that create it. Textual
//! primary-key columns get an explicit index, since SQLite only builds an
//! implicit one for `INTEGER PRIMARY KEY` rowid aliases.

use std::collections::HashSet;

use crate::error::{CoreError, Result};
use crate::ident::{is_wildcard, validate_identifier, validate_table_name};
use crate::model::TableDescriptor;
use crate::types::{is_textual, LogicalType};

/// Statements that create one table, to be run in a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTablePlan {
    /// Table name.
    pub table: String,
    /// `CREATE TABLE IF NOT EXISTS ...`
    pub create_table: String,
    /// `CREATE INDEX IF NOT EXISTS ...`, one per textual key column.
    pub create_indexes: Vec<String>,
}

impl CreateTablePlan {
    /// All statements in execution order.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.create_table.as_str())
            .chain(self.create_indexes.iter().map(String::as_str))
    }
}

/// Deterministic name of the supporting index for a key column.
///
/// The table name's length is part of the name so that `t_a`.`id` and
/// `t`.`a_id` never share an index.
#[must_use]
pub fn index_name(table: &str, column: &str) -> String {
    format!("idx_{}_{table}_{column}", table.len())
}

/// Plans the DDL for `table`.
///
/// # Errors
///
/// [`CoreError::InvalidRequest`] when the name or column list is missing or
/// a column repeats, [`CoreError::InvalidIdentifier`] for unsafe names,
/// [`CoreError::Build`] for an unknown logical type.
pub fn plan_create_table(table: &TableDescriptor) -> Result<CreateTablePlan> {
    if table.name.trim().is_empty() || table.columns.is_empty() {
        return Err(CoreError::invalid_request(
            "table name and columns are required",
        ));
    }
    validate_table_name(&table.name)?;

    let mut seen = HashSet::new();
    let mut definitions = Vec::with_capacity(table.columns.len() + 1);
    let mut primary_keys = Vec::new();
    let mut create_indexes = Vec::new();

    for column in &table.columns {
        if is_wildcard(&column.name) {
            return Err(CoreError::invalid_request("'*' is not a column name"));
        }
        validate_identifier(&column.name)?;
        if !seen.insert(column.name.to_lowercase()) {
            return Err(CoreError::invalid_request(format!(
                "duplicate column '{}'",
                column.name
            )));
        }

        let native = LogicalType::from_key(&column.data_type)
            .map(LogicalType::sqlite_name)
            .ok_or_else(|| {
                CoreError::Build(format!(
                    "unknown data type '{}' for column '{}'",
                    column.data_type, column.name
                ))
            })?;

        let mut parts = vec![column.name.clone(), native.to_string()];
        if let Some(default) = column
            .default_value
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        {
            parts.push(format!("DEFAULT {default}"));
        }
        if !column.nullable {
            parts.push("NOT NULL".to_string());
        }
        definitions.push(parts.join(" "));

        if column.is_pk {
            primary_keys.push(column.name.as_str());
            if is_textual(native) {
                create_indexes.push(format!(
                    "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                    index_name(&table.name, &column.name),
                    table.name,
                    column.name
                ));
            }
        }
    }

    if !primary_keys.is_empty() {
        definitions.push(format!("PRIMARY KEY ({})", primary_keys.join(", ")));
    }

    Ok(CreateTablePlan {
        table: table.name.clone(),
        create_table: format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            table.name,
            definitions.join(", ")
        ),
        create_indexes,
    })
}
