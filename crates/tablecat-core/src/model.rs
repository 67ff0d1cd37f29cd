//! Table and field descriptors returned to the catalog service.

use crate::name::QualifiedName;
use crate::types::CanonicalType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-request metadata supplied by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorRequestContext {
    /// Unique id of the incoming request, used to correlate log lines.
    pub request_id: Uuid,
    /// User on whose behalf the request runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// UTC time the request was received.
    pub timestamp: DateTime<Utc>,
}

impl ConnectorRequestContext {
    pub fn new(user_name: Option<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            user_name,
            timestamp: Utc::now(),
        }
    }
}

impl Default for ConnectorRequestContext {
    fn default() -> Self {
        Self::new(None)
    }
}

/// A table: its name plus columns in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: QualifiedName,
    pub fields: Vec<FieldInfo>,
}

impl TableInfo {
    pub fn new(name: QualifiedName, fields: Vec<FieldInfo>) -> Self {
        Self { name, fields }
    }

    /// Look up a field by its exact name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    /// Canonical type derived from `source_type`.
    #[serde(rename = "type")]
    pub canonical_type: CanonicalType,
    /// Backend-native type, e.g. `DECIMAL(20, 10)`.
    pub source_type: String,
    pub is_nullable: bool,
    /// Present only when the backend reported a positive size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
