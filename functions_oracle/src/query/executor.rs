use crate::config::GatewayConfig;
use crate::encoding::EncodedResult;
use crate::error::{OracleError, Result, NETWORK_FAILURE_MARKER};
use crate::query::response::QueryResponse;
use crate::query::value::parse_integer;
use log::{debug, error, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

/// Request body accepted by the SxT SQL gateway
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SqlRequest<'a> {
    sql_text: &'a str,
}

/// One-shot SQL query against the SxT gateway, returning a uint256
pub struct QueryExecutor {
    client: Client,
    config: GatewayConfig,
}

impl QueryExecutor {
    /// Create a new executor; the HTTP client carries the configured timeout
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OracleError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run `query` and encode the configured column of the first row.
    ///
    /// The credential is checked before the query, so a missing key is
    /// always reported as a configuration problem.
    pub async fn execute(&self, query: &str, credential: &str) -> Result<EncodedResult> {
        if credential.trim().is_empty() {
            return Err(OracleError::Configuration(
                "missing API key: SXT API Key is not set in secrets".to_string(),
            ));
        }
        if query.trim().is_empty() {
            return Err(OracleError::InvalidInput("SQL query not provided".to_string()));
        }

        info!("Executing SxT SQL query: {}", query);
        let body = self.send(query, credential).await?;
        decode_response(&body, &self.config)
    }

    /// Issue the single POST and return the body of a successful response
    async fn send(&self, query: &str, credential: &str) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut api_key = HeaderValue::from_str(credential).map_err(|_| {
            OracleError::Configuration("API key is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(headers)
            .json(&SqlRequest { sql_text: query })
            .send()
            .await
            .map_err(|e| {
                error!("SxT API request error: {}", e);
                OracleError::Request(NETWORK_FAILURE_MARKER.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("SxT API response read error: {}", e);
            OracleError::Request(NETWORK_FAILURE_MARKER.to_string())
        })?;

        if !status.is_success() {
            error!("SxT API request error: HTTP {} {}", status, body);
            let detail = if body.trim().is_empty() {
                NETWORK_FAILURE_MARKER.to_string()
            } else {
                body
            };
            return Err(OracleError::Request(format!("HTTP {status}: {detail}")));
        }

        debug!("SxT API response body: {}", body);
        Ok(body)
    }
}

/// Validate a gateway body and encode the configured column as uint256
pub fn decode_response(body: &str, config: &GatewayConfig) -> Result<EncodedResult> {
    let response = QueryResponse::from_body(body)?;

    if let Some(err) = response.gateway_error() {
        error!("SxT API reported an error: {}", err);
        return Err(OracleError::Request(body.to_string()));
    }

    let column = config.value_column.as_str();
    let raw = response.field(column)?;
    let value = parse_integer(raw, config.fraction_policy)?;
    info!("Integer {} from SxT: {}", column, value);

    let encoded = EncodedResult::from_bigint(&value)?;
    info!("Returning {} (uint256): {}", column, encoded);
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FractionPolicy;
    use crate::error::ErrorKind;

    #[test]
    fn decodes_concrete_scenario() {
        let encoded =
            decode_response(r#"{"data":[{"AVG_FEE":"123"}]}"#, &GatewayConfig::default()).unwrap();
        assert_eq!(encoded, EncodedResult::from(123u64));
    }

    #[test]
    fn gateway_error_becomes_request_error_with_body() {
        let body = r#"{"error":"invalid sql","data":[{"AVG_FEE":1}]}"#;
        let err = decode_response(body, &GatewayConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
        assert!(err.to_string().contains("invalid sql"));
    }

    #[test]
    fn negative_value_is_value_error() {
        let err =
            decode_response(r#"{"data":[{"AVG_FEE":-5}]}"#, &GatewayConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn custom_column_and_reject_policy() {
        let config = GatewayConfig {
            value_column: "TOTAL".to_string(),
            fraction_policy: FractionPolicy::Reject,
            ..GatewayConfig::default()
        };
        let err = decode_response(r#"{"data":[{"TOTAL":"1.5"}]}"#, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        let encoded = decode_response(r#"{"data":[{"TOTAL":"15"}]}"#, &config).unwrap();
        assert_eq!(encoded.to_string(), "15");
    }

    #[tokio::test]
    async fn credential_is_checked_before_query() {
        let executor = QueryExecutor::new(GatewayConfig::default()).unwrap();
        let err = executor.execute("", "").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        let err = executor.execute("", "key").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
