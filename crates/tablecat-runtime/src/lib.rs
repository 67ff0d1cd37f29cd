//! # tablecat-runtime
//!
//! Table-level metadata operations (describe, enumerate, rename, delete)
//! against any relational backend, expressed as catalog-introspection reads
//! and data-definition statements over a [`CatalogConnection`].
//!
//! Backends plug in through three seams:
//! - [`ConnectionProvider`] / [`CatalogConnection`] for live connections
//! - [`tablecat_core::TypeConverter`] for canonical types
//! - [`ErrorMapper`] for translating driver failures
//!
//! [`RelationalTableService`] wires them into a [`TableService`].

pub mod catalog;
pub mod connection;
pub mod error;
pub mod identifier;
pub mod projector;
pub mod service;
pub mod source_type;
pub mod statements;

pub use connection::{
    CatalogConnection, ColumnRow, ConnectionProvider, DriverError, DriverErrorKind, TableRow,
};
pub use error::{DefaultErrorMapper, ErrorMapper};
pub use identifier::IdentifierCase;
pub use service::{RelationalTableService, TableService};
pub use source_type::build_source_type;
pub use statements::{DefaultTableStatements, TableStatements};
