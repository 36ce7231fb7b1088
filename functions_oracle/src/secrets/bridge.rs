//! [`SecretsNetwork`] backed by an external toolkit helper program.
//!
//! Each step runs the helper once, writes one JSON request to its stdin and
//! reads one JSON object from its stdout. The helper owns wallet handling,
//! encryption and the signed gateway upload.

use crate::config::SecretsConfig;
use crate::error::{OracleError, Result};
use crate::secrets::env::PublisherEnv;
use crate::secrets::network::{
    EncryptedSecretsBundle, SecretsNetwork, UploadRequest, UploadResult,
};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Longest stderr/stdout excerpt carried in an error
const MAX_DIAGNOSTIC_CHARS: usize = 512;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NetworkContext<'a> {
    signer_key: &'a str,
    rpc_url: &'a str,
    functions_router_address: &'a str,
    don_id: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum BridgeRequest<'a> {
    Initialize {
        #[serde(flatten)]
        context: NetworkContext<'a>,
    },
    Encrypt {
        #[serde(flatten)]
        context: NetworkContext<'a>,
        secrets: &'a BTreeMap<String, String>,
    },
    Upload {
        #[serde(flatten)]
        context: NetworkContext<'a>,
        #[serde(flatten)]
        upload: &'a UploadRequest,
    },
}

impl BridgeRequest<'_> {
    fn action(&self) -> &'static str {
        match self {
            BridgeRequest::Initialize { .. } => "initialize",
            BridgeRequest::Encrypt { .. } => "encrypt",
            BridgeRequest::Upload { .. } => "upload",
        }
    }
}

/// Secrets network client that shells out to a helper program
pub struct ToolkitBridge {
    command: String,
    args: Vec<String>,
    signer_key: String,
    rpc_url: String,
    router_address: String,
    don_id: String,
}

impl ToolkitBridge {
    pub fn new(config: &SecretsConfig, env: &PublisherEnv) -> Self {
        Self {
            command: config.helper_command.clone(),
            args: config.helper_args.clone(),
            signer_key: env.private_key.clone(),
            rpc_url: env.rpc_url.clone(),
            router_address: config.router_address.clone(),
            don_id: config.don_id.clone(),
        }
    }

    fn context(&self) -> NetworkContext<'_> {
        NetworkContext {
            signer_key: &self.signer_key,
            rpc_url: &self.rpc_url,
            functions_router_address: &self.router_address,
            don_id: &self.don_id,
        }
    }

    async fn call<T: DeserializeOwned>(&self, request: &BridgeRequest<'_>) -> Result<T> {
        let action = request.action();
        let payload = serde_json::to_vec(request)
            .map_err(|e| OracleError::Upload(format!("cannot encode {action} request: {e}")))?;

        debug!("Running secrets helper {} for {}", self.command, action);
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                OracleError::Upload(format!("failed to start secrets helper {}: {e}", self.command))
            })?;

        // A helper that exits without reading stdin is reported by its exit status below
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(&payload).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(OracleError::Upload(format!(
                        "failed to write {action} request: {e}"
                    )));
                }
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| OracleError::Upload(format!("secrets helper did not finish: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OracleError::Upload(format!(
                "{action} step failed ({}): {}",
                output.status,
                excerpt(stderr.trim())
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(stdout.trim()).map_err(|e| {
            OracleError::Upload(format!(
                "unreadable {action} response ({e}): {}",
                excerpt(stdout.trim())
            ))
        })
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= MAX_DIAGNOSTIC_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_DIAGNOSTIC_CHARS).collect();
        format!("{head}...")
    }
}

#[async_trait]
impl SecretsNetwork for ToolkitBridge {
    async fn initialize(&self) -> Result<()> {
        let _: serde_json::Value = self
            .call(&BridgeRequest::Initialize {
                context: self.context(),
            })
            .await?;
        Ok(())
    }

    async fn encrypt_secrets(
        &self,
        secrets: &BTreeMap<String, String>,
    ) -> Result<EncryptedSecretsBundle> {
        self.call(&BridgeRequest::Encrypt {
            context: self.context(),
            secrets,
        })
        .await
    }

    async fn upload_encrypted_secrets(&self, request: &UploadRequest) -> Result<UploadResult> {
        self.call(&BridgeRequest::Upload {
            context: self.context(),
            upload: request,
        })
        .await
    }
}
