//! Mapping of raw catalog rows to canonical descriptors.

use crate::connection::{ColumnRow, DriverError, TableRow};
use crate::source_type::{build_source_type, parse_positive};
use tablecat_core::{FieldInfo, QualifiedName, TypeConverter};

/// Build a field from one column row.
///
/// Nullability is true only for the exact text `YES`.
pub fn to_field_info(
    row: ColumnRow,
    converter: &dyn TypeConverter,
) -> Result<FieldInfo, DriverError> {
    let size = row.column_size.as_deref();
    let source_type = build_source_type(&row.type_name, size, row.decimal_digits.as_deref())?;

    Ok(FieldInfo {
        canonical_type: converter.to_canonical_type(&source_type),
        size: parse_positive(size, "Size")?,
        is_nullable: row.is_nullable.as_deref() == Some("YES"),
        name: row.column_name,
        source_type,
        default_value: row.column_def,
        comment: row.remarks,
    })
}

/// Name a listed table under the caller's catalog and database, keeping the
/// table name exactly as the backend reported it.
pub fn to_table_name(row: TableRow, database: &QualifiedName) -> QualifiedName {
    QualifiedName::of_table(
        database.catalog_name(),
        database.database_name(),
        row.table_name,
    )
}
