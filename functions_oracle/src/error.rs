//! Error taxonomy shared by the query handler and the secrets uploader.
//!
//! Every variant is fatal: the invocation aborts on the first error and the
//! caller (oracle sandbox or operator shell) decides how to surface it.

/// Marker used when the gateway call failed before any body was received.
pub const NETWORK_FAILURE_MARKER: &str = "Network Error or Timeout";

/// Oracle error type
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// A required credential or environment value is missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Caller supplied input is unusable (e.g. empty SQL text)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Transport failure or gateway-reported error
    #[error("SxT API request failed: {0}")]
    Request(String),
    /// Gateway response does not follow the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// Extracted value is not a representable non-negative integer
    #[error("Value error: {0}")]
    Value(String),
    /// Secrets network rejected or failed the upload
    #[error("Secrets upload failed: {0}")]
    Upload(String),
}

/// Coarse classification of [`OracleError`], stable across message changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    InvalidInput,
    Request,
    MalformedResponse,
    Value,
    Upload,
}

impl OracleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OracleError::Configuration(_) => ErrorKind::Configuration,
            OracleError::InvalidInput(_) => ErrorKind::InvalidInput,
            OracleError::Request(_) => ErrorKind::Request,
            OracleError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            OracleError::Value(_) => ErrorKind::Value,
            OracleError::Upload(_) => ErrorKind::Upload,
        }
    }

    /// Error for a required environment variable that is unset or empty
    pub fn missing_env(name: &str) -> Self {
        OracleError::Configuration(format!("{name} environment variable is not set"))
    }

    /// Error for a value that cannot be read as an integer
    pub fn not_an_integer(value: impl std::fmt::Display) -> Self {
        OracleError::Value(format!("value is not an integer: {value}"))
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
