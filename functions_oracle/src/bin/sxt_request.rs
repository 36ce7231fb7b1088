// SxT request handler
// Runs one SQL query against the Space and Time gateway and prints the uint256 result

use anyhow::{Context, Result};
use clap::Parser;
use functions_oracle::config::{FractionPolicy, OracleConfig};
use functions_oracle::query::QueryExecutor;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sxt-request")]
#[command(about = "Query Space and Time and encode the result as uint256")]
struct Cli {
    /// SQL text to execute
    #[arg(required_unless_present = "query_flag")]
    query: Option<String>,

    /// SQL text, as a flag instead of a positional argument
    #[arg(long = "query", conflicts_with = "query")]
    query_flag: Option<String>,

    /// SxT API key
    #[arg(long, env = "SXT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the gateway SQL endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Override the result column (case-sensitive)
    #[arg(long)]
    column: Option<String>,

    /// Fail instead of truncating fractional values
    #[arg(long)]
    reject_fractions: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => OracleConfig::from_file(path)?,
        None => OracleConfig::default(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.gateway.endpoint = endpoint;
    }
    if let Some(column) = cli.column {
        config.gateway.value_column = column;
    }
    if cli.reject_fractions {
        config.gateway.fraction_policy = FractionPolicy::Reject;
    }

    info!("Gateway endpoint: {}", config.gateway.endpoint);
    let query = cli.query.or(cli.query_flag).unwrap_or_default();
    let api_key = cli.api_key.unwrap_or_default();

    let executor = QueryExecutor::new(config.gateway)?;
    let encoded = executor
        .execute(&query, &api_key)
        .await
        .context("SxT request failed")?;

    println!("{}", encoded.to_hex());
    Ok(())
}
