//! Structured errors surfaced to the catalog service.

use crate::name::QualifiedName;
use thiserror::Error;

/// Errors returned by connector operations.
///
/// Every variant except [`ConnectorError::InvalidArgument`] is produced by
/// translating a driver failure and names the object it concerns.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The table does not exist.
    #[error("table {name} not found")]
    TableNotFound { name: QualifiedName },

    /// The target table name is already taken.
    #[error("table {name} already exists")]
    TableAlreadyExists { name: QualifiedName },

    /// The database (schema) does not exist.
    #[error("database {name} not found")]
    DatabaseNotFound { name: QualifiedName },

    /// The backend reported metadata that could not be interpreted.
    #[error("invalid metadata for {name}: {message}")]
    InvalidMetadata { name: QualifiedName, message: String },

    /// Any other backend failure.
    #[error("connector failure for {name}: {message}")]
    Connector {
        name: QualifiedName,
        message: String,
        sql_state: Option<String>,
    },

    /// A precondition on the arguments was violated. Raised before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ConnectorError {
    /// The qualified name this error concerns, if any.
    pub fn name(&self) -> Option<&QualifiedName> {
        match self {
            Self::TableNotFound { name }
            | Self::TableAlreadyExists { name }
            | Self::DatabaseNotFound { name }
            | Self::InvalidMetadata { name, .. }
            | Self::Connector { name, .. } => Some(name),
            Self::InvalidArgument(_) => None,
        }
    }
}
