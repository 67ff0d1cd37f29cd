//! Catalog-introspection reads, scoped to one schema.
//!
//! Callers pass identifiers already spelled under the connection's
//! [`crate::IdentifierCase`].

use crate::connection::{CatalogConnection, ColumnRow, DriverError, TableRow};

/// Table types included in enumerations.
pub const TABLE_TYPES: &[&str] = &["TABLE", "VIEW"];

/// Pattern token matching zero or more characters.
pub const MULTI_CHARACTER_SEARCH: &str = "%";

/// Enumerate tables and views in `schema`, optionally restricted to names
/// starting with `prefix`.
///
/// The prefix is not escaped: pattern characters inside it keep their
/// pattern meaning. An empty prefix matches everything.
pub async fn list_tables(
    connection: &mut dyn CatalogConnection,
    schema: &str,
    prefix: Option<&str>,
) -> Result<Vec<TableRow>, DriverError> {
    let pattern = prefix
        .filter(|p| !p.is_empty())
        .map(|p| format!("{p}{MULTI_CHARACTER_SEARCH}"));
    connection
        .tables(schema, pattern.as_deref(), TABLE_TYPES)
        .await
}

/// Enumerate every column of `table` in `schema`.
pub async fn list_columns(
    connection: &mut dyn CatalogConnection,
    schema: &str,
    table: &str,
) -> Result<Vec<ColumnRow>, DriverError> {
    connection
        .columns(schema, table, MULTI_CHARACTER_SEARCH)
        .await
}
