//! Boundary to the secrets-distribution network client.
//!
//! Key derivation, threshold encryption and gateway signing happen on the
//! other side of [`SecretsNetwork`]; this crate only sequences the calls.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ciphertext produced by the network's encryption routine. Never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecretsBundle {
    #[serde(rename = "encryptedSecrets")]
    pub encrypted_secrets_hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub encrypted_secrets_hexstring: String,
    pub gateway_urls: Vec<String>,
    pub slot_id: u8,
    pub minutes_until_expiration: u32,
}

/// Outcome reported by the network after an upload attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub secrets_reference_hex: Option<String>,
}

/// Secrets network client steps, in the order they must be called
#[async_trait]
pub trait SecretsNetwork: Send + Sync {
    /// Fetch network parameters (public keys, DON config)
    async fn initialize(&self) -> Result<()>;

    async fn encrypt_secrets(
        &self,
        secrets: &BTreeMap<String, String>,
    ) -> Result<EncryptedSecretsBundle>;

    async fn upload_encrypted_secrets(&self, request: &UploadRequest) -> Result<UploadResult>;
}
