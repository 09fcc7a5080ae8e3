//! Table creation.

use oxide_tables_core::{plan_create_table, CoreError, TableDescriptor};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::introspect::is_reserved;
use crate::store::TableStore;

const RECORD_DESCRIPTION_SQL: &str =
    "INSERT INTO _oxide_tables (name, description) VALUES (?, ?) ON CONFLICT(name) DO NOTHING";

impl TableStore {
    /// Creates `table` and returns its fresh description.
    ///
    /// The table, its supporting indexes and its catalog entry are written in
    /// one transaction. Creating a table that already exists is a no-op and
    /// keeps the original description.
    ///
    /// # Errors
    ///
    /// [`StoreError::Core`] for an invalid descriptor,
    /// [`StoreError::Execution`] if SQLite rejects a statement.
    pub async fn create_table(&self, table: &TableDescriptor) -> Result<TableDescriptor> {
        if is_reserved(&table.name) {
            return Err(CoreError::InvalidRequest(format!(
                "table name '{}' is reserved",
                table.name
            ))
            .into());
        }
        let plan = plan_create_table(table)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::execution("begin transaction"))?;

        for sql in plan.statements() {
            debug!(sql = %sql, "Executing SQL");
            sqlx::query(sql)
                .execute(&mut *tx)
                .await
                .map_err(StoreError::execution("create table"))?;
        }

        sqlx::query(RECORD_DESCRIPTION_SQL)
            .bind(&plan.table)
            .bind(table.description.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(StoreError::execution("record table description"))?;

        tx.commit()
            .await
            .map_err(StoreError::execution("commit transaction"))?;

        info!(
            table = %plan.table,
            columns = table.columns.len(),
            indexes = plan.create_indexes.len(),
            "Table created"
        );
        self.describe_table(&plan.table).await
    }
}
