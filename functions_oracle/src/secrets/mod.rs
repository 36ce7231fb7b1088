//! Secrets upload for the Functions DON
//!
//! Validates the operator environment and sequences the external secrets
//! network client. Encryption and gateway signing are delegated.

pub mod bridge;
pub mod env;
pub mod network;
pub mod publisher;

pub use bridge::ToolkitBridge;
pub use env::PublisherEnv;
pub use network::{EncryptedSecretsBundle, SecretsNetwork, UploadRequest, UploadResult};
pub use publisher::{publish, SecretsPublisher};
