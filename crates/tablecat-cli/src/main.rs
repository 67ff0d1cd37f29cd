use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tablecat_adapter_pg::PgConnectionProvider;
use tablecat_core::{SqlTypeConverter, TablecatConfig};
use tablecat_runtime::{DefaultErrorMapper, RelationalTableService};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tablecat", version, about = "Describe, list, rename and drop tables")]
struct Cli {
    /// Configuration file. Defaults apply when it does not exist.
    #[arg(long, short, default_value = "tablecat.yaml", global = true)]
    config: PathBuf,

    /// Connection URL, overriding the configured upstream.
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Catalog name used in qualified names, overriding the configuration.
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Log filter directive (e.g. `debug`), overriding the configuration.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe one table's columns.
    Describe { database: String, table: String },

    /// Describe every table in a database.
    List {
        database: String,
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// List table names in a database.
    ListNames {
        database: String,
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Rename a table within its database.
    Rename {
        database: String,
        table: String,
        new_table: String,
    },

    /// Drop a table.
    Drop { database: String, table: String },
}

#[derive(clap::Args, Debug)]
pub struct ListingArgs {
    /// Only tables whose name starts with this prefix.
    #[arg(long)]
    prefix: Option<String>,

    /// Sort names before paging.
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    #[arg(long)]
    offset: Option<u32>,

    #[arg(long)]
    limit: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortArg {
    Asc,
    Desc,
}

fn load_config(cli: &Cli) -> anyhow::Result<TablecatConfig> {
    let mut config = if Path::new(&cli.config).exists() {
        TablecatConfig::from_file(&cli.config)
            .with_context(|| format!("failed to load {}", cli.config.display()))?
    } else {
        TablecatConfig::default()
    };

    if let Some(url) = &cli.database_url {
        config.upstream.database_url = Some(url.clone());
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog.name = catalog.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let provider = PgConnectionProvider::new(&config.upstream)
        .context("failed to configure upstream connection pool")?;
    let service = RelationalTableService::new(
        Arc::new(provider),
        Arc::new(SqlTypeConverter),
        Arc::new(DefaultErrorMapper),
    );
    let catalog = config.catalog.name.as_str();

    match cli.cmd {
        Command::Describe { database, table } => {
            commands::describe(&service, catalog, &database, &table).await?
        }
        Command::List { database, listing } => {
            commands::list(&service, catalog, &database, &listing).await?
        }
        Command::ListNames { database, listing } => {
            commands::list_names(&service, catalog, &database, &listing).await?
        }
        Command::Rename {
            database,
            table,
            new_table,
        } => commands::rename(&service, catalog, &database, &table, &new_table).await?,
        Command::Drop { database, table } => {
            commands::drop(&service, catalog, &database, &table).await?
        }
    }

    Ok(())
}
