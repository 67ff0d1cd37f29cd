//! Canonical type model.
//!
//! Backends describe columns with their own type names. The catalog service
//! works with [`CanonicalType`]; a [`TypeConverter`] bridges the two from the
//! reconstructed source-type string (e.g. `DECIMAL(20, 10)`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The catalog's universal column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    Char {
        length: Option<u32>,
    },
    Varchar {
        length: Option<u32>,
    },
    String,
    Binary,
    Date,
    Time,
    Timestamp,
    Json,
    /// A source type with no canonical counterpart; keeps the raw text.
    Unknown(String),
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::TinyInt => f.write_str("tinyint"),
            Self::SmallInt => f.write_str("smallint"),
            Self::Int => f.write_str("int"),
            Self::BigInt => f.write_str("bigint"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::Decimal {
                precision: Some(p),
                scale: Some(s),
            } => write!(f, "decimal({p},{s})"),
            Self::Decimal {
                precision: Some(p),
                scale: None,
            } => write!(f, "decimal({p})"),
            Self::Decimal { .. } => f.write_str("decimal"),
            Self::Char { length: Some(n) } => write!(f, "char({n})"),
            Self::Char { length: None } => f.write_str("char"),
            Self::Varchar { length: Some(n) } => write!(f, "varchar({n})"),
            Self::Varchar { length: None } => f.write_str("varchar"),
            Self::String => f.write_str("string"),
            Self::Binary => f.write_str("binary"),
            Self::Date => f.write_str("date"),
            Self::Time => f.write_str("time"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::Json => f.write_str("json"),
            Self::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}

/// Maps a backend source-type string to the canonical type.
pub trait TypeConverter: Send + Sync {
    fn to_canonical_type(&self, source_type: &str) -> CanonicalType;
}

/// Converter covering the common ANSI, PostgreSQL and MySQL spellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlTypeConverter;

impl TypeConverter for SqlTypeConverter {
    fn to_canonical_type(&self, source_type: &str) -> CanonicalType {
        let (base, params) = split_source_type(source_type);
        let first = params.first().copied();
        let second = params.get(1).copied();

        match base.as_str() {
            "BOOL" | "BOOLEAN" => CanonicalType::Boolean,
            "TINYINT" | "INT1" => CanonicalType::TinyInt,
            "SMALLINT" | "INT2" | "SMALLSERIAL" => CanonicalType::SmallInt,
            "INT" | "INTEGER" | "INT4" | "MEDIUMINT" | "SERIAL" => CanonicalType::Int,
            "BIGINT" | "INT8" | "BIGSERIAL" => CanonicalType::BigInt,
            "REAL" | "FLOAT" | "FLOAT4" => CanonicalType::Float,
            "DOUBLE" | "DOUBLE PRECISION" | "FLOAT8" => CanonicalType::Double,
            "DECIMAL" | "NUMERIC" | "DEC" | "NUMBER" => CanonicalType::Decimal {
                precision: first,
                scale: second,
            },
            "CHAR" | "CHARACTER" | "BPCHAR" | "NCHAR" => CanonicalType::Char { length: first },
            "VARCHAR" | "CHARACTER VARYING" | "NVARCHAR" | "VARCHAR2" => {
                CanonicalType::Varchar { length: first }
            }
            "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "CLOB" | "STRING" | "UUID"
            | "NAME" | "CITEXT" => CanonicalType::String,
            "BYTEA" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" => {
                CanonicalType::Binary
            }
            "DATE" => CanonicalType::Date,
            "TIME" | "TIMETZ" | "TIME WITH TIME ZONE" | "TIME WITHOUT TIME ZONE" => {
                CanonicalType::Time
            }
            "TIMESTAMP" | "TIMESTAMPTZ" | "DATETIME" | "TIMESTAMP WITH TIME ZONE"
            | "TIMESTAMP WITHOUT TIME ZONE" => CanonicalType::Timestamp,
            "JSON" | "JSONB" => CanonicalType::Json,
            _ => CanonicalType::Unknown(source_type.trim().to_string()),
        }
    }
}

/// Split `NAME(a, b) SUFFIX` into (`NAME SUFFIX`, [a, b]).
///
/// Parameters that are not unsigned integers are skipped.
fn split_source_type(source_type: &str) -> (String, Vec<u32>) {
    let (head, params, tail) = match (source_type.find('('), source_type.rfind(')')) {
        (Some(open), Some(close)) if open < close => (
            &source_type[..open],
            &source_type[open + 1..close],
            &source_type[close + 1..],
        ),
        _ => (source_type, "", ""),
    };

    let base = head
        .split_whitespace()
        .chain(tail.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    let params = params
        .split(',')
        .filter_map(|p| p.trim().parse::<u32>().ok())
        .collect();

    (base, params)
}
