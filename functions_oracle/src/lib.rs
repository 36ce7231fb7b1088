//! Chainlink Functions glue for Space and Time
//!
//! Two independent one-shot procedures:
//! - [`query::QueryExecutor`] runs a SQL query against the SxT gateway and
//!   encodes one numeric column as a uint256 for the on-chain consumer.
//! - [`secrets::SecretsPublisher`] uploads the SxT API key to the DON's
//!   secrets store through an external secrets network client.

pub mod config;
pub mod encoding;
pub mod error;
pub mod query;
pub mod secrets;

pub use config::{FractionPolicy, GatewayConfig, OracleConfig, SecretsConfig};
pub use encoding::{decode_uint256, encode_uint256, EncodedResult};
pub use error::{ErrorKind, OracleError, Result};
