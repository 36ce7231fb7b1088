//! Explicit configuration for both procedures.
//!
//! Endpoints, gateway lists and slot ids live here instead of in module
//! constants so tests can point the executor and publisher at mocks.

use crate::error::{OracleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SXT_ENDPOINT: &str = "https://proxy.api.spaceandtime.dev/v1/sql";
pub const DEFAULT_TIMEOUT_MS: u64 = 25_000;
/// The gateway returns column names upper-cased
pub const DEFAULT_VALUE_COLUMN: &str = "AVG_FEE";

/// Functions router on Avalanche Fuji
pub const FUJI_ROUTER_ADDRESS: &str = "0xA9d587a00A31A52Ed70D6026794a8FC5E2F5dCb0";
pub const FUJI_DON_ID: &str = "fun-avalanche-fuji-1";
pub const FUJI_GATEWAY_URLS: [&str; 2] = [
    "https://01.functions-gateway.testnet.chain.link/",
    "https://02.functions-gateway.testnet.chain.link/",
];
pub const DEFAULT_EXPIRATION_MINUTES: u32 = 1440;
pub const DEFAULT_HELPER_COMMAND: &str = "node";

/// What to do with a fractional component in the extracted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FractionPolicy {
    /// Drop the fraction, rounding toward zero
    #[default]
    Truncate,
    /// Fail with a value error
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    /// Case-sensitive column read from the first row
    pub value_column: String,
    pub fraction_policy: FractionPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            endpoint: DEFAULT_SXT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            fraction_policy: FractionPolicy::Truncate,
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    pub router_address: String,
    pub don_id: String,
    pub gateway_urls: Vec<String>,
    pub slot_id: u8,
    pub minutes_until_expiration: u32,
    /// Program implementing the secrets network client steps
    pub helper_command: String,
    pub helper_args: Vec<String>,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        SecretsConfig {
            router_address: FUJI_ROUTER_ADDRESS.to_string(),
            don_id: FUJI_DON_ID.to_string(),
            gateway_urls: FUJI_GATEWAY_URLS.iter().map(|u| u.to_string()).collect(),
            slot_id: 0,
            minutes_until_expiration: DEFAULT_EXPIRATION_MINUTES,
            helper_command: DEFAULT_HELPER_COMMAND.to_string(),
            helper_args: vec!["scripts/secrets-helper.mjs".to_string()],
        }
    }
}

impl SecretsConfig {
    /// Check the parts the secrets network cannot work without
    pub fn validate(&self) -> Result<()> {
        if self.router_address.trim().is_empty() {
            return Err(OracleError::Configuration(
                "functions router address is empty".to_string(),
            ));
        }
        if self.don_id.trim().is_empty() {
            return Err(OracleError::Configuration("DON id is empty".to_string()));
        }
        if self.gateway_urls.iter().all(|u| u.trim().is_empty()) {
            return Err(OracleError::Configuration(
                "at least one gateway URL is required".to_string(),
            ));
        }
        if self.minutes_until_expiration == 0 {
            return Err(OracleError::Configuration(
                "expiration must be at least one minute".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub gateway: GatewayConfig,
    pub secrets: SecretsConfig,
}

impl OracleConfig {
    /// Load a YAML configuration file; missing keys fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            OracleError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&raw).map_err(|e| {
            OracleError::Configuration(format!("cannot parse {}: {e}", path.display()))
        })
    }
}
