//! Parameter binding.

use oxide_tables_core::{Fragment, Value};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Binds one value as the next positional parameter.
///
/// Builders never emit array parameters; should one get here it is bound as
/// its JSON text.
pub(crate) fn bind_value(query: SqliteQuery<'_>, value: Value) -> SqliteQuery<'_> {
    match value {
        Value::Null => query.bind(Option::<i64>::None),
        Value::Bool(b) => query.bind(b),
        Value::Integer(i) => query.bind(i),
        Value::Real(f) => query.bind(f),
        Value::Text(s) => query.bind(s),
        array @ Value::Array(_) => query.bind(serde_json::Value::from(array).to_string()),
    }
}

/// Prepares `fragment.sql` with every parameter bound in order.
pub(crate) fn prepare(fragment: &Fragment) -> SqliteQuery<'_> {
    fragment
        .params
        .iter()
        .cloned()
        .fold(sqlx::query(&fragment.sql), bind_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::Row;

    #[tokio::test]
    async fn test_binds_every_variant() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory SQLite pool");

        let fragment = Fragment {
            sql: "SELECT ? IS NULL, ?, ?, ?, ?, ?".to_string(),
            params: vec![
                Value::Null,
                Value::Bool(true),
                Value::Integer(7),
                Value::Real(1.5),
                "x".into(),
                Value::from(vec![1, 2]),
            ],
        };

        let row = prepare(&fragment).fetch_one(&pool).await.unwrap();
        assert!(row.get::<bool, _>(0));
        assert!(row.get::<bool, _>(1));
        assert_eq!(row.get::<i64, _>(2), 7);
        assert!((row.get::<f64, _>(3) - 1.5).abs() < f64::EPSILON);
        assert_eq!(row.get::<String, _>(4), "x");
        assert_eq!(row.get::<String, _>(5), "[1,2]");
    }
}
