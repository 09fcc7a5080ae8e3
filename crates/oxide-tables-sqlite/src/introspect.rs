//! Schema introspection.
//!
//! Everything is read from `sqlite_schema` and `pragma_table_info` on each
//! call. Table names are bound as parameters wherever SQLite allows it; the
//! only interpolated name is the `COUNT(*)` target, and that one is validated
//! and checked for existence first.

use oxide_tables_core::{validate_table_name, ColumnDescriptor, ColumnSet, TableDescriptor};
use sqlx::FromRow;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::{TableStore, CATALOG_TABLE};

const TABLE_NAMES_SQL: &str = "SELECT name FROM sqlite_schema \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != ? \
     ORDER BY name";

const TABLE_EXISTS_SQL: &str =
    "SELECT COUNT(*) FROM sqlite_schema WHERE type = 'table' AND name = ? COLLATE NOCASE";

const TABLE_SQL: &str = "SELECT s.name, s.sql, c.description FROM sqlite_schema s \
     LEFT JOIN _oxide_tables c ON c.name = s.name \
     WHERE s.type = 'table' AND s.name = ? COLLATE NOCASE";

const TABLE_INFO_SQL: &str =
    "SELECT name, type, pk, \"notnull\", dflt_value FROM pragma_table_info(?) ORDER BY cid";

/// One row of `pragma_table_info`.
#[derive(Debug, FromRow)]
struct TableInfoRow {
    name: String,
    #[sqlx(rename = "type")]
    data_type: String,
    pk: i64,
    notnull: i64,
    dflt_value: Option<String>,
}

impl From<TableInfoRow> for ColumnDescriptor {
    fn from(row: TableInfoRow) -> Self {
        Self {
            name: row.name,
            data_type: row.data_type,
            is_pk: row.pk > 0,
            nullable: row.notnull == 0,
            default_value: row.dflt_value,
        }
    }
}

/// The description catalog and SQLite's own `sqlite_*` tables are never
/// exposed as user tables.
pub(crate) fn is_reserved(table: &str) -> bool {
    table.eq_ignore_ascii_case(CATALOG_TABLE)
        || table
            .get(..7)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("sqlite_"))
}

fn not_found(table: &str) -> StoreError {
    StoreError::NotFound(format!("table '{table}' does not exist"))
}

impl TableStore {
    /// Names of all user tables, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Execution`] if the catalog query fails.
    pub async fn table_names(&self) -> Result<Vec<String>> {
        sqlx::query_scalar(TABLE_NAMES_SQL)
            .bind(CATALOG_TABLE)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::execution("list tables"))
    }

    /// Number of user tables.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Execution`] if the catalog query fails.
    pub async fn count_tables(&self) -> Result<usize> {
        Ok(self.table_names().await?.len())
    }

    /// Every user table, fully described.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Execution`] if any catalog query fails.
    pub async fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        let names = self.table_names().await?;
        let mut tables = Vec::with_capacity(names.len());
        for name in &names {
            tables.push(self.describe_table(name).await?);
        }
        Ok(tables)
    }

    /// Whether `table` is an existing user table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Execution`] if the catalog query fails.
    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        if is_reserved(table) {
            return Ok(false);
        }
        let count: i64 = sqlx::query_scalar(TABLE_EXISTS_SQL)
            .bind(table)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::execution("look up table"))?;
        Ok(count > 0)
    }

    /// Columns of `table` in declaration order. Empty if the table does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Execution`] if the pragma fails.
    pub async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows: Vec<TableInfoRow> = sqlx::query_as(TABLE_INFO_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::execution("read table info"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The live column set of `table`, for validating request columns.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the table does not exist.
    pub async fn column_set(&self, table: &str) -> Result<ColumnSet> {
        if is_reserved(table) {
            return Err(not_found(table));
        }
        let columns = self.columns(table).await?;
        if columns.is_empty() {
            return Err(not_found(table));
        }
        Ok(ColumnSet::new(table, columns.into_iter().map(|c| c.name)))
    }

    /// Number of rows in `table`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Core`] for an unsafe name, [`StoreError::NotFound`] if
    /// the table does not exist.
    pub async fn count_rows(&self, table: &str) -> Result<i64> {
        validate_table_name(table)?;
        if !self.table_exists(table).await? {
            return Err(not_found(table));
        }

        let sql = format!("SELECT COUNT(*) FROM {table}");
        debug!(sql = %sql, "Executing SQL");
        sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::execution("count rows"))
    }

    /// Full description of `table`: stored DDL, description, columns and
    /// row count.
    ///
    /// # Errors
    ///
    /// [`StoreError::Core`] for an unsafe name, [`StoreError::NotFound`] if
    /// the table does not exist.
    pub async fn describe_table(&self, table: &str) -> Result<TableDescriptor> {
        validate_table_name(table)?;
        if is_reserved(table) {
            return Err(not_found(table));
        }

        let (name, sql, description): (String, Option<String>, Option<String>) =
            sqlx::query_as(TABLE_SQL)
                .bind(table)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::execution("describe table"))?
                .ok_or_else(|| not_found(table))?;

        let columns = self.columns(&name).await?;
        let records_count = self.count_rows(&name).await?;

        Ok(TableDescriptor {
            name,
            description,
            sql: sql.unwrap_or_default(),
            columns,
            records_count,
        })
    }
}
