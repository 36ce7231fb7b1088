use crate::error::{OracleError, Result};
use std::collections::BTreeMap;
use std::fmt;

pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";
pub const RPC_URL_VAR: &str = "RPC_URL";
pub const SXT_API_KEY_VAR: &str = "SXT_API_KEY";

/// Key under which the API key is exposed to the Functions source
pub const SXT_SECRET_NAME: &str = "sxtApiKey";

/// Operator environment required to publish secrets
#[derive(Clone)]
pub struct PublisherEnv {
    pub private_key: String,
    pub rpc_url: String,
    pub sxt_api_key: String,
}

impl PublisherEnv {
    /// Read from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through `lookup`; variables are checked in a fixed order and the
    /// first missing one is reported by name
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| OracleError::missing_env(name))
        };

        Ok(Self {
            private_key: require(PRIVATE_KEY_VAR)?,
            rpc_url: require(RPC_URL_VAR)?,
            sxt_api_key: require(SXT_API_KEY_VAR)?,
        })
    }

    /// Secrets mapping uploaded to the DON
    pub fn credentials(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(SXT_SECRET_NAME.to_string(), self.sxt_api_key.clone())])
    }
}

impl fmt::Debug for PublisherEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublisherEnv")
            .field("private_key", &"<redacted>")
            .field("rpc_url", &self.rpc_url)
            .field("sxt_api_key", &redact(&self.sxt_api_key))
            .finish()
    }
}

/// Short preview of a secret suitable for logs
pub fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{prefix}****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const FULL: [(&str, &str); 3] = [
        (PRIVATE_KEY_VAR, "0xabc"),
        (RPC_URL_VAR, "https://api.avax-test.network/ext/bc/C/rpc"),
        (SXT_API_KEY_VAR, "sxt-key-123456"),
    ];

    #[test]
    fn reads_all_three_values() {
        let env = PublisherEnv::from_lookup(lookup_from(&FULL)).unwrap();
        assert_eq!(env.private_key, "0xabc");
        assert_eq!(env.credentials().get(SXT_SECRET_NAME).unwrap(), "sxt-key-123456");
    }

    #[test]
    fn each_missing_value_is_named() {
        for missing in [PRIVATE_KEY_VAR, RPC_URL_VAR, SXT_API_KEY_VAR] {
            let pairs: Vec<(&str, &str)> =
                FULL.iter().copied().filter(|(k, _)| *k != missing).collect();
            let err = PublisherEnv::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
            let message = err.to_string();
            assert!(message.contains(missing), "{message}");
            for other in [PRIVATE_KEY_VAR, RPC_URL_VAR, SXT_API_KEY_VAR] {
                if other != missing {
                    assert!(!message.contains(other), "{message}");
                }
            }
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut pairs = FULL.to_vec();
        pairs[1] = (RPC_URL_VAR, "");
        let err = PublisherEnv::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains(RPC_URL_VAR));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let env = PublisherEnv::from_lookup(lookup_from(&FULL)).unwrap();
        let printed = format!("{env:?}");
        assert!(!printed.contains("0xabc"));
        assert!(!printed.contains("sxt-key-123456"));
        assert!(printed.contains("sxt-****"));
    }
}
