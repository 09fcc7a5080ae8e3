//! Row insertion.

use oxide_tables_core::{build_insert, InsertRequest};
use tracing::debug;
use uuid::Uuid;

use crate::bind::prepare;
use crate::error::{Result, StoreError};
use crate::introspect::is_reserved;
use crate::store::TableStore;

impl TableStore {
    /// Inserts one row and returns its generated `id` (a hyphenated UUID v4).
    ///
    /// # Errors
    ///
    /// [`StoreError::Core`] for an invalid request (including one that names
    /// the `id` column), [`StoreError::NotFound`] for the description catalog
    /// and SQLite's own tables, [`StoreError::Execution`] if SQLite rejects
    /// the row.
    pub async fn insert(&self, request: &InsertRequest) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let statement = build_insert(request, &id)?;
        if is_reserved(&request.table) {
            return Err(StoreError::NotFound(format!(
                "table '{}' does not exist",
                request.table
            )));
        }

        debug!(sql = %statement.sql, "Executing SQL");
        prepare(&statement)
            .execute(&self.pool)
            .await
            .map_err(StoreError::execution("insert row"))?;

        debug!(table = %request.table, id = %id, "Row inserted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::memory_store;
    use oxide_tables_core::{CoreError, Value};

    fn request(table: &str, columns: &[&str], values: Vec<Value>) -> InsertRequest {
        InsertRequest {
            table: table.to_string(),
            columns: columns.iter().map(ToString::to_string).collect(),
            values,
        }
    }

    #[tokio::test]
    async fn test_insert_generates_id() {
        let store = memory_store().await;
        sqlx::query("CREATE TABLE notes (id TEXT PRIMARY KEY, body TEXT)")
            .execute(store.pool())
            .await
            .unwrap();

        let first = store
            .insert(&request("notes", &["body"], vec!["a".into()]))
            .await
            .unwrap();
        let second = store
            .insert(&request("notes", &["body"], vec!["b".into()]))
            .await
            .unwrap();

        assert_eq!(first.len(), 36);
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());

        let stored: String = sqlx::query_scalar("SELECT body FROM notes WHERE id = ?")
            .bind(&first)
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(stored, "a");
    }

    #[tokio::test]
    async fn test_id_column_is_rejected_before_sqlite() {
        let store = memory_store().await;
        let err = store
            .insert(&request("missing", &[" ID "], vec!["x".into()]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_reserved_tables_are_not_found() {
        let store = memory_store().await;
        for table in ["_oxide_tables", "sqlite_schema", "SQLITE_STAT1"] {
            let err = store
                .insert(&request(table, &["name"], vec!["x".into()]))
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn test_missing_table_is_execution_error() {
        let store = memory_store().await;
        let err = store
            .insert(&request("ghost", &["a"], vec![Value::Integer(1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Execution { .. }));
    }
}
