//! Qualified names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a catalog object: `catalog/database/table`.
///
/// A database-level name has an empty table component. A name used as a
/// listing prefix carries the prefix in its table component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    catalog: String,
    database: String,
    #[serde(default)]
    table: String,
}

impl QualifiedName {
    /// Name of a single table.
    pub fn of_table(
        catalog: impl Into<String>,
        database: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            catalog: catalog.into(),
            database: database.into(),
            table: table.into(),
        }
    }

    /// Name of a database (no table component).
    pub fn of_database(catalog: impl Into<String>, database: impl Into<String>) -> Self {
        Self::of_table(catalog, database, "")
    }

    pub fn catalog_name(&self) -> &str {
        &self.catalog
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Whether this name addresses a table rather than a database.
    pub fn is_table_definition(&self) -> bool {
        !self.table.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.table.is_empty() {
            write!(f, "{}/{}", self.catalog, self.database)
        } else {
            write!(f, "{}/{}/{}", self.catalog, self.database, self.table)
        }
    }
}
