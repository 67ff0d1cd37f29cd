//! # tablecat-core
//!
//! Value types shared by every tablecat crate:
//! - [`QualifiedName`] identifying a catalog, database or table
//! - [`TableInfo`] / [`FieldInfo`] describing a table as the catalog sees it
//! - [`Sort`] / [`Pageable`] directives and the utilities applying them
//! - [`CanonicalType`] and the [`TypeConverter`] contract
//! - [`ConnectorError`], the structured error surfaced to the catalog service
//! - YAML configuration ([`config`])

// Configuration types shared across all tablecat crates
pub mod config;

pub mod error;
pub mod model;
pub mod name;
pub mod paging;
pub mod types;

pub use config::{CatalogConfig, ConfigError, LoggingConfig, TablecatConfig, UpstreamConfig};
pub use error::ConnectorError;
pub use model::{ConnectorRequestContext, FieldInfo, TableInfo};
pub use name::QualifiedName;
pub use paging::{Pageable, Sort, SortOrder, paginate, sort};
pub use types::{CanonicalType, SqlTypeConverter, TypeConverter};
