//! Row materialization.
//!
//! Turns result rows into name → [`Value`] maps without knowing the schema
//! in advance. SQLite lets any column hold any storage class, so each cell
//! is decoded by the class of the value actually stored. The declared type
//! only decides whether an integer in a boolean column reads as a `Bool`.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use futures::{Stream, TryStreamExt};
use oxide_tables_core::Value;
use sqlx::sqlite::{SqliteColumn, SqliteRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use crate::error::{Result, StoreError};

/// One materialized row, keyed by column name.
pub type Row = BTreeMap<String, Value>;

/// How a cell is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extraction {
    Text,
    Bool,
    Integer,
    Real,
    Blob,
}

fn is_boolean(declared: &str) -> bool {
    let upper = declared.trim().to_ascii_uppercase();
    matches!(
        upper.split('(').next().unwrap_or_default().trim(),
        "BOOL" | "BOOLEAN"
    )
}

/// Picks the extraction for a non-null cell from its runtime storage class.
pub(crate) fn classify(declared: Option<&str>, runtime: &str) -> Extraction {
    match runtime {
        "INTEGER" if declared.is_some_and(is_boolean) => Extraction::Bool,
        "INTEGER" => Extraction::Integer,
        "REAL" => Extraction::Real,
        "BLOB" => Extraction::Blob,
        _ => Extraction::Text,
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}

fn cell(row: &SqliteRow, column: &SqliteColumn) -> std::result::Result<Value, sqlx::Error> {
    let index = column.ordinal();
    let extraction = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        let runtime = raw.type_info();
        let declared = column.type_info();
        classify((!declared.is_null()).then_some(declared.name()), runtime.name())
    };

    Ok(match extraction {
        Extraction::Text => {
            // Text that is not valid UTF-8 is returned like a blob.
            String::from_utf8(row.try_get_unchecked::<Vec<u8>, _>(index)?)
                .map_or_else(|err| Value::Text(hex(err.as_bytes())), Value::Text)
        }
        Extraction::Bool => Value::Bool(row.try_get_unchecked(index)?),
        Extraction::Integer => Value::Integer(row.try_get_unchecked(index)?),
        Extraction::Real => Value::Real(row.try_get_unchecked(index)?),
        Extraction::Blob => Value::Text(hex(&row.try_get_unchecked::<Vec<u8>, _>(index)?)),
    })
}

/// Converts one result row.
///
/// # Errors
///
/// Returns [`StoreError::Scan`] if a cell cannot be decoded.
pub fn row_to_map(row: &SqliteRow) -> Result<Row> {
    row.columns()
        .iter()
        .map(|column| cell(row, column).map(|value| (column.name().to_string(), value)))
        .collect::<std::result::Result<_, _>>()
        .map_err(StoreError::Scan)
}

/// Driver errors surfacing while a cursor advances.
pub(crate) fn fetch_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. } => StoreError::Scan(err),
        other => StoreError::execution("run query")(other),
    }
}

/// Drains a row stream into maps. The stream is dropped, closing its
/// cursor, on success and on the first error alike.
///
/// # Errors
///
/// [`StoreError::Execution`] if SQLite fails while stepping,
/// [`StoreError::Scan`] if a row cannot be decoded.
pub async fn materialize<S>(mut rows: S) -> Result<Vec<Row>>
where
    S: Stream<Item = std::result::Result<SqliteRow, sqlx::Error>> + Unpin,
{
    let mut out = Vec::new();
    while let Some(row) = rows.try_next().await.map_err(fetch_error)? {
        out.push(row_to_map(&row)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::memory_store;
    use oxide_tables_core::{ColumnDescriptor, InsertRequest, TableDescriptor};

    #[test]
    fn test_classify_follows_storage_class() {
        assert_eq!(classify(Some("TEXT"), "TEXT"), Extraction::Text);
        assert_eq!(classify(Some("TEXT"), "INTEGER"), Extraction::Integer);
        assert_eq!(classify(Some("INTEGER"), "TEXT"), Extraction::Text);
        assert_eq!(classify(Some("INTEGER"), "REAL"), Extraction::Real);
        assert_eq!(classify(Some("BOOLEAN"), "TEXT"), Extraction::Text);
        assert_eq!(classify(Some("TEXT"), "BLOB"), Extraction::Blob);
        assert_eq!(classify(Some("NUMERIC"), "REAL"), Extraction::Real);
        assert_eq!(classify(None, "INTEGER"), Extraction::Integer);
    }

    #[test]
    fn test_classify_boolean_integers() {
        assert_eq!(classify(Some("BOOLEAN"), "INTEGER"), Extraction::Bool);
        assert_eq!(classify(Some("bool"), "INTEGER"), Extraction::Bool);
        assert_eq!(classify(Some("BIGINT"), "INTEGER"), Extraction::Integer);
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[0x00, 0xab, 0x10]), "00ab10");
        assert_eq!(hex(&[]), "");
    }

    #[tokio::test]
    async fn test_materialize_typed_columns() {
        let store = memory_store().await;
        for sql in [
            "CREATE TABLE m (t TEXT, b BOOLEAN, i INTEGER, n NUMERIC, r REAL, d BLOB)",
            "INSERT INTO m VALUES ('x', 1, 42, 7, 2.5, X'CAFE')",
            "INSERT INTO m VALUES (NULL, NULL, NULL, 1.25, NULL, NULL)",
        ] {
            sqlx::query(sql).execute(store.pool()).await.unwrap();
        }

        let rows = materialize(sqlx::query("SELECT * FROM m ORDER BY rowid").fetch(store.pool()))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first["t"], Value::from("x"));
        assert_eq!(first["b"], Value::Bool(true));
        assert_eq!(first["i"], Value::Integer(42));
        assert_eq!(first["n"], Value::Integer(7));
        assert_eq!(first["r"], Value::Real(2.5));
        assert_eq!(first["d"], Value::from("cafe"));

        let second = &rows[1];
        assert_eq!(second["t"], Value::Null);
        assert_eq!(second["i"], Value::Null);
        assert_eq!(second["n"], Value::Real(1.25));
        assert_eq!(second["d"], Value::Null);
    }

    #[tokio::test]
    async fn test_materialize_expressions() {
        let store = memory_store().await;
        let rows = materialize(
            sqlx::query("SELECT 1 + 1 AS two, 'a' || 'b' AS ab, NULL AS nothing")
                .fetch(store.pool()),
        )
        .await
        .unwrap();
        assert_eq!(rows[0]["two"], Value::Integer(2));
        assert_eq!(rows[0]["ab"], Value::from("ab"));
        assert_eq!(rows[0]["nothing"], Value::Null);
    }

    #[tokio::test]
    async fn test_failed_statement_is_execution_error() {
        let store = memory_store().await;
        let err = materialize(sqlx::query("SELECT * FROM ghost").fetch(store.pool()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Execution { .. }));
    }

    #[tokio::test]
    async fn test_mismatched_storage_is_returned_as_stored() {
        let store = memory_store().await;
        store
            .create_table(&TableDescriptor::new(
                "t",
                vec![
                    ColumnDescriptor::new("id", "txt").primary_key(),
                    ColumnDescriptor::new("n", "int").nullable(),
                    ColumnDescriptor::new("b", "bool").nullable(),
                    ColumnDescriptor::new("s", "txt").nullable(),
                ],
            ))
            .await
            .unwrap();

        let insert = |columns: &[&str], values: Vec<Value>| InsertRequest {
            table: "t".to_string(),
            columns: columns.iter().map(ToString::to_string).collect(),
            values,
        };
        let words = store
            .insert(&insert(&["n", "b"], vec!["hello".into(), "yes".into()]))
            .await
            .unwrap();
        let fraction = store
            .insert(&insert(&["n", "b"], vec![Value::Real(2.75), Value::Bool(true)]))
            .await
            .unwrap();

        let fetch = |id: String| {
            let pool = store.pool().clone();
            async move {
                let rows = materialize(
                    sqlx::query("SELECT n, b FROM t WHERE id = ?")
                        .bind(id)
                        .fetch(&pool),
                )
                .await
                .unwrap();
                rows.into_iter().next().unwrap()
            }
        };

        let row = fetch(words).await;
        assert_eq!(row["n"], Value::from("hello"));
        assert_eq!(row["b"], Value::from("yes"));

        let row = fetch(fraction).await;
        assert_eq!(row["n"], Value::Real(2.75));
        assert_eq!(row["b"], Value::Bool(true));
    }

    #[tokio::test]
    async fn test_bytes_in_text_column_are_hex() {
        let store = memory_store().await;
        for sql in [
            "CREATE TABLE raw (s TEXT)",
            "INSERT INTO raw VALUES (X'FF')",
            "INSERT INTO raw VALUES (CAST(X'FF00' AS TEXT))",
        ] {
            sqlx::query(sql).execute(store.pool()).await.unwrap();
        }

        let rows = materialize(sqlx::query("SELECT s FROM raw ORDER BY rowid").fetch(store.pool()))
            .await
            .unwrap();
        assert_eq!(rows[0]["s"], Value::from("ff"));
        assert_eq!(rows[1]["s"], Value::from("ff00"));
    }
}
