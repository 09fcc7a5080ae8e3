//! Filter conditions and WHERE clause composition.
//!
//! A request carries groups of conditions. Conditions inside a group are
//! joined by the group's [`Logic`]; groups are always joined by AND:
//!
//! ```text
//! [{age gte 18}] AND, [{status eq a}, {status eq b}] OR
//!   => (age >= ?) AND (status = ? OR status = ?)
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::error::{CoreError, Result};
use crate::ident::validate_identifier;
use crate::model::{FilterCondition, FilterGroup};
use crate::value::Value;

/// Supported filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Less than (<)
    Lt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than or equal (<=)
    Lte,
    /// Pattern match (LIKE); the caller supplies `%` and `_`.
    Like,
    /// IS NULL
    IsNull,
    /// IS NOT NULL
    IsNotNull,
    /// IN (...)
    In,
    /// NOT IN (...)
    NotIn,
}

impl Operator {
    /// Parses an operator key. Keys are case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedOperator`] for unknown keys.
    pub fn parse(key: &str) -> Result<Self> {
        Ok(match key {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "gt" => Self::Gt,
            "lt" => Self::Lt,
            "gte" => Self::Gte,
            "lte" => Self::Lte,
            "like" => Self::Like,
            "is_null" => Self::IsNull,
            "is_not_null" => Self::IsNotNull,
            "in" => Self::In,
            "not_in" => Self::NotIn,
            other => return Err(CoreError::UnsupportedOperator(other.to_string())),
        })
    }

    /// The wire key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
            Self::In => "in",
            Self::NotIn => "not_in",
        }
    }

    /// The SQL spelling of the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A SQL fragment and the parameters its placeholders bind, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Positional parameters.
    pub params: Vec<Value>,
}

impl Fragment {
    /// Returns true when there is no SQL.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Builds the fragment for one condition.
///
/// The column name is written into the SQL as-is: callers must have run it
/// through [`validate_identifier`] and checked it against the table schema.
///
/// # Errors
///
/// [`CoreError::UnsupportedOperator`] for unknown operators,
/// [`CoreError::InvalidOperatorValue`] when the value does not fit the
/// operator (a list for a comparison, a scalar or empty list for `in`).
pub fn build_condition(condition: &FilterCondition) -> Result<Fragment> {
    let op = Operator::parse(&condition.operator)?;
    let column = &condition.column;

    match op {
        Operator::IsNull | Operator::IsNotNull => Ok(Fragment {
            sql: format!("{column} {}", op.as_sql()),
            params: Vec::new(),
        }),
        Operator::In | Operator::NotIn => {
            let values = membership_values(op, &condition.value)?;
            let placeholders = vec!["?"; values.len()].join(", ");
            Ok(Fragment {
                sql: format!("{column} {} ({placeholders})", op.as_sql()),
                params: values.to_vec(),
            })
        }
        Operator::Eq
        | Operator::Ne
        | Operator::Gt
        | Operator::Lt
        | Operator::Gte
        | Operator::Lte
        | Operator::Like => {
            if let Value::Array(_) = condition.value {
                return Err(CoreError::InvalidOperatorValue {
                    operator: op.key().to_string(),
                    reason: "expected a single value, got an array".to_string(),
                });
            }
            Ok(Fragment {
                sql: format!("{column} {} ?", op.as_sql()),
                params: vec![condition.value.clone()],
            })
        }
    }
}

fn membership_values(op: Operator, value: &Value) -> Result<&[Value]> {
    let invalid = |reason: &str| CoreError::InvalidOperatorValue {
        operator: op.key().to_string(),
        reason: reason.to_string(),
    };

    let values = value
        .as_array()
        .ok_or_else(|| invalid("requires an array of values"))?;
    if values.is_empty() {
        return Err(invalid("requires at least one value"));
    }
    if values.iter().any(|v| matches!(v, Value::Array(_))) {
        return Err(invalid("nested arrays are not supported"));
    }
    Ok(values)
}

/// The columns that currently exist in one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    table: String,
    columns: HashSet<String>,
}

impl ColumnSet {
    /// Creates a column set for `table`.
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `column` exists (exact, case-sensitive match).
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Validates `column` as an identifier and checks that it exists.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidIdentifier`] or [`CoreError::InvalidRequest`].
    pub fn require(&self, column: &str) -> Result<()> {
        validate_identifier(column)?;
        if self.contains(column) {
            Ok(())
        } else {
            Err(CoreError::invalid_request(format!(
                "column '{column}' does not exist in table '{}'",
                self.table
            )))
        }
    }
}

/// Composes the WHERE body (without the `WHERE` keyword) for `groups`.
///
/// Empty groups are skipped; no groups at all yield an empty fragment. The
/// first invalid condition aborts the whole composition.
///
/// # Errors
///
/// Any error from [`ColumnSet::require`] or [`build_condition`].
pub fn compose_where(columns: &ColumnSet, groups: &[FilterGroup]) -> Result<Fragment> {
    let mut parts = Vec::new();
    let mut params = Vec::new();

    for group in groups {
        if group.conditions.is_empty() {
            continue;
        }

        let mut conditions = Vec::with_capacity(group.conditions.len());
        for condition in &group.conditions {
            columns.require(&condition.column)?;
            let fragment = build_condition(condition)?;
            conditions.push(fragment.sql);
            params.extend(fragment.params);
        }

        let joiner = format!(" {} ", group.logic.as_sql());
        parts.push(format!("({})", conditions.join(&joiner)));
    }

    Ok(Fragment {
        sql: parts.join(" AND "),
        params,
    })
}
