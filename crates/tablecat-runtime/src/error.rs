//! Translation of driver failures into connector errors.

use crate::connection::{DriverError, DriverErrorKind};
use tablecat_core::{ConnectorError, QualifiedName};

/// Converts a caught driver failure into the catalog's structured error.
pub trait ErrorMapper: Send + Sync {
    fn to_connector_error(&self, error: DriverError, name: &QualifiedName) -> ConnectorError;
}

/// Maps well-known SQLSTATE codes; everything else becomes
/// [`ConnectorError::Connector`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorMapper;

impl ErrorMapper for DefaultErrorMapper {
    fn to_connector_error(&self, error: DriverError, name: &QualifiedName) -> ConnectorError {
        let name = name.clone();
        match error.sql_state.as_deref() {
            // undefined_table (PostgreSQL), base table not found (ODBC/MySQL)
            Some("42P01") | Some("42S02") => ConnectorError::TableNotFound { name },
            Some("42P07") | Some("42S01") => ConnectorError::TableAlreadyExists { name },
            // invalid_schema_name
            Some("3F000") => ConnectorError::DatabaseNotFound { name },
            Some(state) if state.starts_with("22") => ConnectorError::InvalidMetadata {
                name,
                message: error.message().to_string(),
            },
            _ if error.kind == DriverErrorKind::Data => ConnectorError::InvalidMetadata {
                name,
                message: error.message().to_string(),
            },
            sql_state => ConnectorError::Connector {
                message: error.message().to_string(),
                sql_state: sql_state.map(str::to_string),
                name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> QualifiedName {
        QualifiedName::of_table("prod", "sales", "orders")
    }

    fn map(error: DriverError) -> ConnectorError {
        DefaultErrorMapper.to_connector_error(error, &orders())
    }

    #[test]
    fn undefined_table() {
        let err = map(DriverError::statement("relation does not exist").with_sql_state("42P01"));
        assert!(matches!(err, ConnectorError::TableNotFound { ref name } if *name == orders()));
    }

    #[test]
    fn duplicate_table() {
        let err = map(DriverError::statement("already exists").with_sql_state("42P07"));
        assert!(matches!(err, ConnectorError::TableAlreadyExists { .. }));
    }

    #[test]
    fn invalid_schema() {
        let err = map(DriverError::connection("no schema").with_sql_state("3F000"));
        assert!(matches!(err, ConnectorError::DatabaseNotFound { .. }));
    }

    #[test]
    fn malformed_metadata() {
        let err = map(DriverError::data("Size field could not be converted to integer"));
        match err {
            ConnectorError::InvalidMetadata { name, message } => {
                assert_eq!(name, orders());
                assert!(message.contains("Size field"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_failures_keep_state_and_name() {
        let err = map(DriverError::query("syntax error").with_sql_state("42601"));
        match err {
            ConnectorError::Connector {
                name,
                message,
                sql_state,
            } => {
                assert_eq!(name, orders());
                assert_eq!(message, "syntax error");
                assert_eq!(sql_state.as_deref(), Some("42601"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pool_timeout_is_connector_failure() {
        let err = map(DriverError::connection("pool timed out while waiting for an open connection"));
        assert!(matches!(err, ConnectorError::Connector { sql_state: None, .. }));
    }
}
