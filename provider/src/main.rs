//! PingDirectory Terraform Provider
//!
//! Manages PingDirectory configuration objects through the configuration REST API:
//! - DN Join Virtual Attribute (managed and edit-only)
//! - Num Subordinates Virtual Attribute (managed and edit-only)
//!
//! Requests arrive as JSON lines on stdin and responses are written to stdout, so
//! all logging goes to stderr.

mod config;
mod error;
mod operations;
mod provider;
mod resource;
mod version;
#[cfg(test)]
mod test_utils;

use anyhow::Context;
use clap::{Parser, Subcommand};
use plugin_framework::ProviderHost;
use provider::PingDirectoryProvider;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `debug` or `terraform_provider_pingdirectory=trace`
const LOG_FILTER_ENV: &str = "TF_LOG_PROVIDER";

#[derive(Debug, Parser)]
#[command(name = "terraform-provider-pingdirectory", version, about = "Terraform provider for PingDirectory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the provider and resource schemas as JSON
    Schema {
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve JSON-lines requests on stdin/stdout
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut host = ProviderHost::new(PingDirectoryProvider::new(env!("CARGO_PKG_VERSION")));

    match cli.command {
        Command::Schema { pretty } => {
            let schemas = host.schemas();
            let output = if pretty {
                serde_json::to_string_pretty(&schemas)
            } else {
                serde_json::to_string(&schemas)
            }
            .context("failed to encode schemas")?;
            println!("{}", output);
        }
        Command::Serve => {
            info!("Starting PingDirectory provider {}", env!("CARGO_PKG_VERSION"));
            info!("Resource types: {}", host.resource_type_names().join(", "));
            host.serve(tokio::io::stdin(), tokio::io::stdout())
                .await
                .context("provider host stopped")?;
            info!("Input closed, shutting down");
        }
    }

    Ok(())
}
