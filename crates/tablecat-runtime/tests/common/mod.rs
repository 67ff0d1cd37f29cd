//! Scripted in-memory backend for table service tests.
//!
//! Every call made against a connection is appended to a shared log so tests
//! can assert exactly which catalog reads and statements were issued.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tablecat_core::{ConnectorRequestContext, SqlTypeConverter};
use tablecat_runtime::{
    CatalogConnection, ColumnRow, ConnectionProvider, DefaultErrorMapper, DriverError,
    RelationalTableService, TableRow,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect,
    StoresUpperCase,
    SetSchema(String),
    Tables {
        schema: String,
        pattern: Option<String>,
        types: Vec<String>,
    },
    Columns {
        schema: String,
        table: String,
        pattern: String,
    },
    Execute(String),
    Close,
}

/// What the fake backend contains and how it misbehaves.
#[derive(Debug, Default, Clone)]
pub struct Script {
    pub upper_case: bool,
    /// Table names in catalog order.
    pub tables: Vec<String>,
    pub columns: HashMap<String, Vec<ColumnRow>>,
    /// Tables whose column read fails.
    pub failing_columns: HashSet<String>,
    /// SQLSTATE returned by every statement execution.
    pub execute_sql_state: Option<String>,
    pub fail_connect: bool,
    pub fail_close: bool,
}

impl Script {
    pub fn with_tables(tables: &[&str]) -> Self {
        Self {
            tables: tables.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct ScriptedProvider {
    script: Arc<Script>,
    log: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedProvider {
    pub fn new(script: Script) -> Self {
        Self {
            script: Arc::new(script),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn executed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Execute(sql) => Some(sql),
                _ => None,
            })
            .collect()
    }

    pub fn schemas(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SetSchema(schema) => Some(schema),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ConnectionProvider for ScriptedProvider {
    async fn connect(&self) -> Result<Box<dyn CatalogConnection>, DriverError> {
        self.log.lock().unwrap().push(Call::Connect);
        if self.script.fail_connect {
            return Err(DriverError::connection(
                "pool timed out while waiting for an open connection",
            ));
        }
        Ok(Box::new(ScriptedConnection {
            script: self.script.clone(),
            log: self.log.clone(),
        }))
    }
}

struct ScriptedConnection {
    script: Arc<Script>,
    log: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedConnection {
    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogConnection for ScriptedConnection {
    async fn stores_upper_case_identifiers(&mut self) -> Result<bool, DriverError> {
        self.record(Call::StoresUpperCase);
        Ok(self.script.upper_case)
    }

    async fn set_schema(&mut self, schema: &str) -> Result<(), DriverError> {
        self.record(Call::SetSchema(schema.to_string()));
        Ok(())
    }

    async fn tables(
        &mut self,
        schema: &str,
        table_pattern: Option<&str>,
        types: &[&str],
    ) -> Result<Vec<TableRow>, DriverError> {
        self.record(Call::Tables {
            schema: schema.to_string(),
            pattern: table_pattern.map(str::to_string),
            types: types.iter().map(|t| t.to_string()).collect(),
        });
        Ok(self
            .script
            .tables
            .iter()
            .filter(|name| table_pattern.is_none_or(|p| like(p, name)))
            .map(|name| TableRow {
                table_schema: Some(schema.to_string()),
                table_name: name.clone(),
                table_type: "TABLE".to_string(),
                remarks: None,
            })
            .collect())
    }

    async fn columns(
        &mut self,
        schema: &str,
        table: &str,
        column_pattern: &str,
    ) -> Result<Vec<ColumnRow>, DriverError> {
        self.record(Call::Columns {
            schema: schema.to_string(),
            table: table.to_string(),
            pattern: column_pattern.to_string(),
        });
        if self.script.failing_columns.contains(table) {
            return Err(DriverError::query("terminating connection due to administrator command")
                .with_sql_state("57P01"));
        }
        Ok(self.script.columns.get(table).cloned().unwrap_or_default())
    }

    async fn execute_update(&mut self, sql: &str) -> Result<u64, DriverError> {
        self.record(Call::Execute(sql.to_string()));
        match &self.script.execute_sql_state {
            Some(state) => Err(DriverError::statement("statement failed").with_sql_state(state)),
            None => Ok(0),
        }
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        self.record(Call::Close);
        if self.script.fail_close {
            return Err(DriverError::connection("connection reset by peer"));
        }
        Ok(())
    }
}

/// SQL `LIKE` with `%` and `_`, case-sensitive.
fn like(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    like_at(&pattern, &text)
}

fn like_at(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|i| like_at(rest, &text[i..])),
        Some(('_', rest)) => !text.is_empty() && like_at(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && like_at(rest, &text[1..]),
    }
}

pub fn column(name: &str, type_name: &str, size: Option<&str>, digits: Option<&str>) -> ColumnRow {
    ColumnRow {
        column_name: name.to_string(),
        type_name: type_name.to_string(),
        column_size: size.map(str::to_string),
        decimal_digits: digits.map(str::to_string),
        is_nullable: Some("NO".to_string()),
        column_def: None,
        remarks: None,
    }
}

pub fn service(provider: &ScriptedProvider) -> RelationalTableService {
    RelationalTableService::new(
        Arc::new(provider.clone()),
        Arc::new(SqlTypeConverter),
        Arc::new(DefaultErrorMapper),
    )
}

pub fn context() -> ConnectorRequestContext {
    ConnectorRequestContext::new(Some("tester".to_string()))
}
