//! `tabular` - command-line front end for the tabular-data API
//!
//! Connection settings come from `TABULAR_ENDPOINT`, `TABULAR_USERNAME`,
//! `TABULAR_PASSWORD` and `TABULAR_PROTOCOL`; the matching flags override
//! them. Each subcommand prints the response envelope as JSON and exits
//! with status 1 when the envelope is an error.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tabular_client::config::{ClientConfig, ENV_ENDPOINT, ENV_PASSWORD, ENV_PROTOCOL, ENV_USERNAME};
use tabular_client::tabular::{
    ApiClient, ApiError, Condition, Envelope, FetchTableDataRequest, RequestLogger, TableRow,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Client for the tabular-data command API")]
struct Cli {
    /// Service URL (overrides TABULAR_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Username (overrides TABULAR_USERNAME)
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Password (overrides TABULAR_PASSWORD)
    #[arg(short, long, global = true)]
    password: Option<String>,

    /// Speak the legacy `query`/`error` protocol
    #[arg(long, global = true)]
    legacy: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is reachable
    Ping,

    /// List table names
    Tables,

    /// Fetch rows from a table
    Rows {
        /// Table name
        table: String,

        /// Include column metadata and row count
        #[arg(long)]
        info: bool,

        /// Maximum number of rows (default: 100)
        #[arg(long)]
        limit: Option<u32>,

        /// Number of rows to skip (default: 0)
        #[arg(long)]
        offset: Option<u32>,

        /// Condition as JSON, e.g. '{"cases":[{"column":"id","operator":"eq","value":"1"}],"logicalOperator":"and"}'
        #[arg(long = "where")]
        condition: Option<String>,
    },

    /// Delete rows by id
    Delete {
        /// Table name
        table: String,

        /// Row ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Update a row from a JSON object of column values
    Update {
        /// Table name
        table: String,

        /// Row as JSON, e.g. '{"id":1,"name":"ann"}'
        row: String,
    },
}

impl Cli {
    fn flag(&self, key: &str) -> Option<String> {
        match key {
            ENV_ENDPOINT => self.endpoint.clone(),
            ENV_USERNAME => self.username.clone(),
            ENV_PASSWORD => self.password.clone(),
            ENV_PROTOCOL if self.legacy => Some("query".to_string()),
            _ => None,
        }
    }

    fn config(&self) -> anyhow::Result<ClientConfig> {
        let config =
            ClientConfig::from_lookup(|key| self.flag(key).or_else(|| std::env::var(key).ok()))?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the envelope and report whether it was a success
fn emit<T: Serialize>(envelope: &Envelope<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(envelope.is_ok())
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = cli.config()?;
    let mut client = ApiClient::from_config(config);
    client.add_interceptor(RequestLogger::new("cli"));

    match cli.command {
        Commands::Ping => emit(&client.ping().await),
        Commands::Tables => emit(&client.fetch_tables().await),
        Commands::Rows {
            table,
            info,
            limit,
            offset,
            condition,
        } => {
            let condition: Condition = match condition {
                Some(raw) => serde_json::from_str(&raw).context("Invalid --where condition")?,
                None => Condition::default(),
            };
            let request = FetchTableDataRequest {
                table_name: table,
                include_info: info,
                condition,
                limit,
                offset,
            };
            emit(&client.fetch_table_data(request).await)
        }
        Commands::Delete { table, ids } => emit(&client.delete_rows(table, ids).await),
        Commands::Update { table, row } => {
            let row: TableRow =
                serde_json::from_str(&row).context("Row must be a JSON object")?;
            emit(&client.update_row(table, row).await)
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("✗ {:#}", e);
            if matches!(e.downcast_ref::<ApiError>(), Some(ApiError::Config(_))) {
                eprintln!("\nNote: To run the client, set environment variables:");
                eprintln!("  export TABULAR_ENDPOINT=http://localhost:8080/api");
                eprintln!("  export TABULAR_USERNAME=your_username");
                eprintln!("  export TABULAR_PASSWORD=your_password");
            }
            std::process::exit(2);
        }
    }
}
