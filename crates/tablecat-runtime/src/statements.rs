//! Data-definition statement generation.
//!
//! Identifiers are concatenated into the statement text; DDL identifiers
//! cannot be bound as parameters. Callers must pass validated identifiers.

use tablecat_core::QualifiedName;

/// Builds the DDL text for mutating table operations.
///
/// The defaults cover ANSI syntax; backends with different syntax override
/// the relevant method.
pub trait TableStatements: Send + Sync {
    /// `DROP TABLE <final_table>`
    fn drop_table_sql(&self, _name: &QualifiedName, final_table: &str) -> String {
        format!("DROP TABLE {final_table}")
    }

    /// `ALTER TABLE <final_old> RENAME TO <final_new>`
    fn rename_table_sql(&self, _old: &QualifiedName, final_old: &str, final_new: &str) -> String {
        format!("ALTER TABLE {final_old} RENAME TO {final_new}")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTableStatements;

impl TableStatements for DefaultTableStatements {}
