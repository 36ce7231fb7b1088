use crate::config::SecretsConfig;
use crate::error::{OracleError, Result};
use crate::secrets::network::{SecretsNetwork, UploadRequest};
use log::{error, info};
use std::collections::BTreeMap;

/// Drives a [`SecretsNetwork`] through initialize, encrypt and upload
pub struct SecretsPublisher<N: SecretsNetwork> {
    network: N,
    config: SecretsConfig,
}

impl<N: SecretsNetwork> SecretsPublisher<N> {
    pub fn new(network: N, config: SecretsConfig) -> Self {
        Self { network, config }
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    /// Encrypt and upload `credentials`, returning the version the DON
    /// assigned. Any failing step aborts the run.
    pub async fn publish(&self, credentials: &BTreeMap<String, String>) -> Result<u64> {
        publish(&self.network, credentials, &self.config).await
    }
}

pub async fn publish<N: SecretsNetwork + ?Sized>(
    network: &N,
    credentials: &BTreeMap<String, String>,
    config: &SecretsConfig,
) -> Result<u64> {
    if credentials.is_empty() {
        return Err(OracleError::Configuration("no secrets to upload".to_string()));
    }
    if let Some((name, _)) = credentials.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(OracleError::Configuration(format!("secret {name} is empty")));
    }
    config.validate()?;

    network.initialize().await?;

    let names: Vec<&str> = credentials.keys().map(String::as_str).collect();
    info!("Encrypting secrets: {:?}", names);
    let bundle = network.encrypt_secrets(credentials).await?;
    info!("Secrets encrypted.");

    info!(
        "Uploading secrets to DON {} using slotId {} and expiration {} minutes",
        config.don_id, config.slot_id, config.minutes_until_expiration
    );
    let request = UploadRequest {
        encrypted_secrets_hexstring: bundle.encrypted_secrets_hex,
        gateway_urls: config.gateway_urls.clone(),
        slot_id: config.slot_id,
        minutes_until_expiration: config.minutes_until_expiration,
    };
    let result = network.upload_encrypted_secrets(&request).await?;

    if !result.success {
        error!("Secrets upload failed: {:?}", result);
        let message = result
            .error_message
            .unwrap_or_else(|| "network reported failure without a message".to_string());
        return Err(OracleError::Upload(message));
    }

    let version = result.version.ok_or_else(|| {
        OracleError::Upload("upload succeeded but no version was reported".to_string())
    })?;

    info!(
        "Secrets uploaded successfully! slotId {} | version {}",
        config.slot_id, version
    );
    info!(
        "Store the version for the request step, e.g. FUNCTIONS_SECRETS_VERSION={}",
        version
    );
    if let Some(reference) = &result.secrets_reference_hex {
        info!("Secrets reference: {}", reference);
    }

    Ok(version)
}
