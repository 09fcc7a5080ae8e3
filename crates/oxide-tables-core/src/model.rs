//! Request and descriptor shapes exchanged with clients.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One column of a table.
///
/// On input `data_type` is a logical type key (`txt`, `int`, ...); on output
/// it is the type declared in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Logical type key or declared native type.
    #[serde(default)]
    pub data_type: String,
    /// Part of the primary key.
    #[serde(default)]
    pub is_pk: bool,
    /// Accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Raw SQL default expression.
    #[serde(default)]
    pub default_value: Option<String>,
}

impl ColumnDescriptor {
    /// Creates a non-nullable, non-key column.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_pk: false,
            nullable: false,
            default_value: None,
        }
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.is_pk = true;
        self
    }

    /// Marks the column as nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Sets the raw default expression.
    #[must_use]
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default_value = Some(expr.into());
        self
    }
}

/// A table and its columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table name.
    pub name: String,
    /// Free-form description supplied at creation.
    #[serde(default)]
    pub description: Option<String>,
    /// The `CREATE TABLE` statement stored in the catalog.
    #[serde(default)]
    pub sql: String,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    /// Number of rows at the time of the description.
    #[serde(default)]
    pub records_count: i64,
}

impl TableDescriptor {
    /// Creates a descriptor for table creation.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            columns,
            ..Self::default()
        }
    }
}

/// How conditions inside one group are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Logic {
    /// All conditions must hold.
    #[default]
    And,
    /// At least one condition must hold.
    Or,
}

impl Logic {
    /// Normalises free text: `or` in any case is OR, everything else AND.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("or") {
            Self::Or
        } else {
            Self::And
        }
    }

    /// SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl From<Option<String>> for Logic {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map_or(Self::And, Self::parse)
    }
}

impl From<Logic> for String {
    fn from(logic: Logic) -> Self {
        logic.as_sql().to_string()
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// `column operator value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Column to test.
    pub column: String,
    /// Operator key, e.g. `eq` or `not_in`.
    pub operator: String,
    /// Operand; ignored by null tests.
    #[serde(default)]
    pub value: Value,
}

impl FilterCondition {
    /// Creates a condition.
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Conditions joined by one logic mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterGroup {
    /// Conditions in order.
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
    /// Join mode inside the group.
    #[serde(default)]
    pub logic: Logic,
}

impl FilterGroup {
    /// Creates a group.
    #[must_use]
    pub const fn new(conditions: Vec<FilterCondition>, logic: Logic) -> Self {
        Self { conditions, logic }
    }
}

/// Structured select.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectRequest {
    /// Table to read.
    pub table: String,
    /// Requested columns, or `["*"]`.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Groups joined by AND.
    #[serde(default)]
    pub filters: Vec<FilterGroup>,
}

/// Row insert; the `id` column is always generated by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsertRequest {
    /// Target table.
    pub table: String,
    /// Columns, excluding `id`.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Values, positionally matching `columns`.
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Body of the raw SQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuery {
    /// SQL text, executed as-is.
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_logic_normalisation() {
        let g: FilterGroup = serde_json::from_value(json!({"conditions": [], "logic": "or"})).unwrap();
        assert_eq!(g.logic, Logic::Or);
        let g: FilterGroup = serde_json::from_value(json!({"conditions": [], "logic": "XOR"})).unwrap();
        assert_eq!(g.logic, Logic::And);
        let g: FilterGroup = serde_json::from_value(json!({"conditions": []})).unwrap();
        assert_eq!(g.logic, Logic::And);
        let g: FilterGroup = serde_json::from_value(json!({"logic": null})).unwrap();
        assert_eq!(g.logic, Logic::And);
    }

    #[test]
    fn test_condition_without_value() {
        let c: FilterCondition =
            serde_json::from_value(json!({"column": "deleted_at", "operator": "is_null"})).unwrap();
        assert!(c.value.is_null());
    }

    #[test]
    fn test_column_descriptor_wire_shape() {
        let col = ColumnDescriptor::new("id", "txt").primary_key();
        assert_eq!(
            serde_json::to_value(&col).unwrap(),
            json!({
                "name": "id",
                "data_type": "txt",
                "is_pk": true,
                "nullable": false,
                "default_value": null
            })
        );
    }

    #[test]
    fn test_table_descriptor_input_defaults() {
        let t: TableDescriptor = serde_json::from_value(json!({
            "name": "posts",
            "columns": [{"name": "title", "data_type": "txt", "nullable": true}]
        }))
        .unwrap();
        assert_eq!(t.records_count, 0);
        assert!(t.columns[0].nullable);
        assert!(!t.columns[0].is_pk);
    }

    #[test]
    fn test_insert_request_values() {
        let r: InsertRequest = serde_json::from_value(json!({
            "table": "posts",
            "columns": ["title", "views"],
            "values": ["hello", 3]
        }))
        .unwrap();
        assert_eq!(r.values, vec![Value::from("hello"), Value::Integer(3)]);
    }
}
