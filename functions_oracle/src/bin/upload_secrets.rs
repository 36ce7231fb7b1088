// Secrets uploader
// Encrypts the SxT API key and uploads it to the Functions DON gateways

use anyhow::{Context, Result};
use clap::Parser;
use functions_oracle::config::OracleConfig;
use functions_oracle::secrets::{PublisherEnv, SecretsPublisher, ToolkitBridge};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "upload-secrets")]
#[command(about = "Upload the SxT API key to the Chainlink Functions DON secrets store")]
struct Cli {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minutes until the uploaded secrets expire
    #[arg(long)]
    expiration_minutes: Option<u32>,

    /// DON secrets slot
    #[arg(long)]
    slot_id: Option<u8>,

    /// Secrets helper program implementing the network client
    #[arg(long)]
    helper: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // PRIVATE_KEY, RPC_URL and SXT_API_KEY may come from a local .env
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let env = PublisherEnv::from_env()?;

    let mut config = match &cli.config {
        Some(path) => OracleConfig::from_file(path)?,
        None => OracleConfig::default(),
    };
    if let Some(minutes) = cli.expiration_minutes {
        config.secrets.minutes_until_expiration = minutes;
    }
    if let Some(slot_id) = cli.slot_id {
        config.secrets.slot_id = slot_id;
    }
    if let Some(helper) = cli.helper {
        config.secrets.helper_command = helper;
        config.secrets.helper_args.clear();
    }

    info!("Router: {}", config.secrets.router_address);
    info!("DON: {}", config.secrets.don_id);
    info!("Gateways: {:?}", config.secrets.gateway_urls);

    let bridge = ToolkitBridge::new(&config.secrets, &env);
    let publisher = SecretsPublisher::new(bridge, config.secrets);
    let version = publisher
        .publish(&env.credentials())
        .await
        .context("Error uploading secrets")?;

    println!("{version}");
    Ok(())
}
