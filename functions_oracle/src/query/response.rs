//! Gateway response shape and the checks applied before value extraction.

use crate::error::{OracleError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response body from the SxT SQL gateway
///
/// `data` is kept as a raw [`Value`] so that a missing or non-array field is
/// reported as a shape error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
}

impl QueryResponse {
    /// Parse a response body. Gateways that answer with a bare array are
    /// treated as if the array were the `data` field.
    pub fn from_body(body: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(body).map_err(|e| {
            OracleError::MalformedResponse(format!("response is not valid JSON: {e}"))
        })?;
        match parsed {
            Value::Object(fields) => serde_json::from_value(Value::Object(fields)).map_err(|e| {
                OracleError::MalformedResponse(format!("unexpected response structure: {e}"))
            }),
            rows @ Value::Array(_) => Ok(QueryResponse {
                data: Some(rows),
                ..Default::default()
            }),
            _ => Err(OracleError::MalformedResponse(
                "unexpected response structure".to_string(),
            )),
        }
    }

    /// Gateway-reported error, if the `error` field carries anything
    pub fn gateway_error(&self) -> Option<&Value> {
        match &self.error {
            Some(Value::Null) | None => None,
            Some(Value::Bool(false)) => None,
            Some(err) => Some(err),
        }
    }

    /// Rows of the result set; must be a non-empty array
    pub fn rows(&self) -> Result<&[Value]> {
        match &self.data {
            Some(Value::Array(rows)) if !rows.is_empty() => Ok(rows),
            _ => Err(OracleError::MalformedResponse(
                "unexpected response structure from SxT API".to_string(),
            )),
        }
    }

    pub fn first_row(&self) -> Result<&Map<String, Value>> {
        match self.rows()?.first() {
            Some(Value::Object(row)) => Ok(row),
            _ => Err(OracleError::MalformedResponse(
                "unexpected response structure from SxT API".to_string(),
            )),
        }
    }

    /// Look up `column` (case-sensitive) in the first row; null counts as absent
    pub fn field(&self, column: &str) -> Result<&Value> {
        match self.first_row()?.get(column) {
            None | Some(Value::Null) => Err(OracleError::MalformedResponse(format!(
                "field not found: could not find {column} in SxT response"
            ))),
            Some(value) => Ok(value),
        }
    }
}
