//! Subcommand implementations. Results are printed to stdout as JSON.

use crate::{ListingArgs, SortArg};
use anyhow::Result;
use serde_json::json;
use tablecat_core::{ConnectorRequestContext, Pageable, QualifiedName, Sort};
use tablecat_runtime::TableService;

fn request_context() -> ConnectorRequestContext {
    ConnectorRequestContext::new(std::env::var("USER").ok())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl ListingArgs {
    fn prefix(&self, catalog: &str, database: &str) -> Option<QualifiedName> {
        self.prefix
            .as_deref()
            .map(|p| QualifiedName::of_table(catalog, database, p))
    }

    fn sort(&self) -> Option<Sort> {
        self.sort.map(|s| match s {
            SortArg::Asc => Sort::ascending(),
            SortArg::Desc => Sort::descending(),
        })
    }

    fn pageable(&self) -> Option<Pageable> {
        if self.offset.is_none() && self.limit.is_none() {
            return None;
        }
        Some(Pageable {
            offset: self.offset,
            limit: self.limit,
        })
    }
}

pub async fn describe(
    service: &dyn TableService,
    catalog: &str,
    database: &str,
    table: &str,
) -> Result<()> {
    let name = QualifiedName::of_table(catalog, database, table);
    let info = service.get(&request_context(), &name).await?;
    print_json(&serde_json::to_value(&info)?)
}

pub async fn list(
    service: &dyn TableService,
    catalog: &str,
    database: &str,
    listing: &ListingArgs,
) -> Result<()> {
    let name = QualifiedName::of_database(catalog, database);
    let tables = service
        .list(
            &request_context(),
            &name,
            listing.prefix(catalog, database).as_ref(),
            listing.sort().as_ref(),
            listing.pageable().as_ref(),
        )
        .await?;
    print_json(&serde_json::to_value(&tables)?)
}

pub async fn list_names(
    service: &dyn TableService,
    catalog: &str,
    database: &str,
    listing: &ListingArgs,
) -> Result<()> {
    let name = QualifiedName::of_database(catalog, database);
    let names = service
        .list_names(
            &request_context(),
            &name,
            listing.prefix(catalog, database).as_ref(),
            listing.sort().as_ref(),
            listing.pageable().as_ref(),
        )
        .await?;
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    print_json(&json!(names))
}

pub async fn rename(
    service: &dyn TableService,
    catalog: &str,
    database: &str,
    table: &str,
    new_table: &str,
) -> Result<()> {
    let old_name = QualifiedName::of_table(catalog, database, table);
    let new_name = QualifiedName::of_table(catalog, database, new_table);
    service
        .rename(&request_context(), &old_name, &new_name)
        .await?;
    tracing::info!(old = %old_name, new = %new_name, "Renamed table");
    print_json(&json!({ "renamed": old_name.to_string(), "to": new_name.to_string() }))
}

pub async fn drop(
    service: &dyn TableService,
    catalog: &str,
    database: &str,
    table: &str,
) -> Result<()> {
    let name = QualifiedName::of_table(catalog, database, table);
    service.delete(&request_context(), &name).await?;
    tracing::info!(qualified_name = %name, "Dropped table");
    print_json(&json!({ "dropped": name.to_string() }))
}
