//! Contracts for the connection provider and the raw catalog rows it returns.

use async_trait::async_trait;
use std::error::Error as StdError;
use thiserror::Error;

/// SQLSTATE reported for metadata values that cannot be interpreted.
pub const DATA_EXCEPTION: &str = "22000";

/// Where a driver failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverErrorKind {
    /// Acquiring, configuring or releasing a connection.
    Connection,
    /// A catalog-introspection query.
    Query,
    /// A data-definition statement.
    Statement,
    /// Metadata returned by the backend was malformed.
    Data,
}

/// A low-level failure raised by a connection.
///
/// Never surfaced directly: an [`crate::ErrorMapper`] turns it into a
/// [`tablecat_core::ConnectorError`] naming the object under operation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DriverError {
    pub kind: DriverErrorKind,
    /// Five-character SQLSTATE when the backend reported one.
    pub sql_state: Option<String>,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl DriverError {
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            sql_state: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Connection, message)
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Query, message)
    }

    pub fn statement(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Statement, message)
    }

    /// Malformed metadata. Carries SQLSTATE `22000`.
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Data, message).with_sql_state(DATA_EXCEPTION)
    }

    pub fn with_sql_state(mut self, sql_state: impl Into<String>) -> Self {
        self.sql_state = Some(sql_state.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One row of a table enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub table_schema: Option<String>,
    pub table_name: String,
    /// `TABLE` or `VIEW`.
    pub table_type: String,
    pub remarks: Option<String>,
}

/// One row of a column enumeration.
///
/// Size and precision are reported as text, exactly as the driver returned
/// them; `None` means the driver reported SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub column_name: String,
    pub type_name: String,
    pub column_size: Option<String>,
    pub decimal_digits: Option<String>,
    /// `YES`, `NO` or empty when unknown.
    pub is_nullable: Option<String>,
    pub column_def: Option<String>,
    pub remarks: Option<String>,
}

/// A live connection to the backend, exclusively owned by one operation.
#[async_trait]
pub trait CatalogConnection: Send {
    /// Whether the backend stores unquoted identifiers upper-cased.
    async fn stores_upper_case_identifiers(&mut self) -> Result<bool, DriverError>;

    /// Scope subsequent calls to one database (schema).
    async fn set_schema(&mut self, schema: &str) -> Result<(), DriverError>;

    /// Enumerate tables in `schema` whose type is one of `types`.
    ///
    /// `table_pattern` uses the backend's pattern syntax; `None` matches all.
    async fn tables(
        &mut self,
        schema: &str,
        table_pattern: Option<&str>,
        types: &[&str],
    ) -> Result<Vec<TableRow>, DriverError>;

    /// Enumerate the columns of `table` matching `column_pattern`, in
    /// ordinal order.
    async fn columns(
        &mut self,
        schema: &str,
        table: &str,
        column_pattern: &str,
    ) -> Result<Vec<ColumnRow>, DriverError>;

    /// Execute a statement, returning the affected row count.
    async fn execute_update(&mut self, sql: &str) -> Result<u64, DriverError>;

    /// Release the connection back to its pool.
    async fn close(self: Box<Self>) -> Result<(), DriverError>;
}

/// Source of live connections, typically a pool.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Acquire a connection. May wait on an exhausted pool; a timeout is a
    /// [`DriverErrorKind::Connection`] failure.
    async fn connect(&self) -> Result<Box<dyn CatalogConnection>, DriverError>;
}
