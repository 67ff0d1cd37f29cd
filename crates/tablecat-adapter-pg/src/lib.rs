//! PostgreSQL connection provider for tablecat.
//!
//! Databases of qualified names map to PostgreSQL schemas inside the
//! configured database. PostgreSQL folds unquoted identifiers to lower case,
//! so identifiers are never upper-cased on this backend.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool, Postgres};
use tablecat_core::UpstreamConfig;
use tablecat_runtime::{
    CatalogConnection, ColumnRow, ConnectionProvider, DriverError, DriverErrorKind, TableRow,
};

mod introspect;

/// Pool-backed [`ConnectionProvider`].
#[derive(Debug, Clone)]
pub struct PgConnectionProvider {
    pool: PgPool,
}

impl PgConnectionProvider {
    /// Build a lazily-connecting pool from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self, DriverError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout())
            .idle_timeout(Some(config.pool.idle_timeout()))
            .connect_lazy(&config.connection_string())
            .map_err(|e| to_driver_error(DriverErrorKind::Connection, e))?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ConnectionProvider for PgConnectionProvider {
    async fn connect(&self) -> Result<Box<dyn CatalogConnection>, DriverError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| to_driver_error(DriverErrorKind::Connection, e))?;
        Ok(Box::new(PgCatalogConnection { conn }))
    }
}

/// One pooled connection, returned to the pool on [`CatalogConnection::close`].
pub struct PgCatalogConnection {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl CatalogConnection for PgCatalogConnection {
    async fn stores_upper_case_identifiers(&mut self) -> Result<bool, DriverError> {
        Ok(false)
    }

    async fn set_schema(&mut self, schema: &str) -> Result<(), DriverError> {
        let sql = format!("SET search_path TO {}", quote_ident(schema)?);
        (&mut *self.conn)
            .execute(sqlx::raw_sql(&sql))
            .await
            .map_err(|e| to_driver_error(DriverErrorKind::Connection, e))?;
        Ok(())
    }

    async fn tables(
        &mut self,
        schema: &str,
        table_pattern: Option<&str>,
        types: &[&str],
    ) -> Result<Vec<TableRow>, DriverError> {
        introspect::tables(&mut self.conn, schema, table_pattern, types).await
    }

    async fn columns(
        &mut self,
        schema: &str,
        table: &str,
        column_pattern: &str,
    ) -> Result<Vec<ColumnRow>, DriverError> {
        introspect::columns(&mut self.conn, schema, table, column_pattern).await
    }

    async fn execute_update(&mut self, sql: &str) -> Result<u64, DriverError> {
        tracing::debug!(sql = %sql, "Executing statement");
        let result = (&mut *self.conn)
            .execute(sqlx::raw_sql(sql))
            .await
            .map_err(|e| to_driver_error(DriverErrorKind::Statement, e))?;
        Ok(result.rows_affected())
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        let mut conn = self.conn;
        // Pooled connections are shared across operations; drop the scope.
        (&mut *conn)
            .execute(sqlx::raw_sql("RESET search_path"))
            .await
            .map_err(|e| to_driver_error(DriverErrorKind::Connection, e))?;
        Ok(())
    }
}

/// Quote a schema name for use in `SET search_path`.
fn quote_ident(ident: &str) -> Result<String, DriverError> {
    if ident.is_empty() {
        return Err(DriverError::connection("empty schema name").with_sql_state("3F000"));
    }
    if ident.contains('\0') {
        return Err(DriverError::connection(format!("invalid schema name {ident:?}"))
            .with_sql_state("3F000"));
    }
    Ok(format!("\"{}\"", ident.replace('"', "\"\"")))
}

/// Convert a sqlx failure, keeping the backend's SQLSTATE.
pub(crate) fn to_driver_error(kind: DriverErrorKind, error: sqlx::Error) -> DriverError {
    let sql_state = error
        .as_database_error()
        .and_then(|e| e.code())
        .map(|code| code.into_owned());
    let mut driver_error = DriverError::new(kind, error.to_string());
    if let Some(state) = sql_state {
        driver_error = driver_error.with_sql_state(state);
    }
    driver_error.with_source(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_wraps_and_escapes() {
        assert_eq!(quote_ident("sales").unwrap(), "\"sales\"");
        assert_eq!(quote_ident("Sales").unwrap(), "\"Sales\"");
        assert_eq!(quote_ident("we\"ird").unwrap(), "\"we\"\"ird\"");
    }

    #[test]
    fn quote_ident_rejects_empty_names() {
        let err = quote_ident("").unwrap_err();
        assert_eq!(err.sql_state.as_deref(), Some("3F000"));
    }

    #[test]
    fn pool_timeout_keeps_no_sql_state() {
        let err = to_driver_error(DriverErrorKind::Connection, sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, DriverErrorKind::Connection);
        assert_eq!(err.sql_state, None);
        assert!(err.message().contains("timed out"));
    }
}
