use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Prefix for the environment variables read by [`ClientConfig::from_env`].
pub const ENV_PREFIX: &str = "WAREHOUSE_CLIENT_";

/// Client-side settings. Everything is optional; nothing here changes what a statement means.
///
/// ```rust
/// use warehouse_client::config::ClientConfig;
///
/// let cfg = ClientConfig::from_json_str(r#"{"role": "SYSADMIN", "statement_timeout_secs": 120}"#)?;
/// assert_eq!(cfg.role.as_deref(), Some("SYSADMIN"));
/// # Ok::<(), warehouse_client::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Role applied by `Client::connect` (`USE ROLE`).
    pub role: Option<String>,
    /// Warehouse applied by `Client::connect` (`USE WAREHOUSE`).
    pub warehouse: Option<String>,
    /// Session query tag applied by `Client::connect`.
    pub query_tag: Option<String>,
    /// Timeout for calls whose `Context` carries none.
    pub statement_timeout_secs: Option<u64>,
    /// Include full statement text in debug logs.
    pub log_statements: bool,
}

impl ClientConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// Returns `Error::ConfigError` on malformed JSON, unknown keys, or invalid values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: ClientConfig = serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("invalid client config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read `WAREHOUSE_CLIENT_ROLE`, `WAREHOUSE_CLIENT_WAREHOUSE`, `WAREHOUSE_CLIENT_QUERY_TAG`,
    /// `WAREHOUSE_CLIENT_STATEMENT_TIMEOUT_SECS` and `WAREHOUSE_CLIENT_LOG_STATEMENTS`.
    ///
    /// # Errors
    /// Returns `Error::ConfigError` if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let statement_timeout_secs = lookup("STATEMENT_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    Error::ConfigError(format!("{ENV_PREFIX}STATEMENT_TIMEOUT_SECS: {e}"))
                })
            })
            .transpose()?;
        let log_statements = match lookup("LOG_STATEMENTS") {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(Error::ConfigError(format!(
                        "{ENV_PREFIX}LOG_STATEMENTS: expected a boolean, got {other}"
                    )));
                }
            },
        };

        let cfg = ClientConfig {
            role: lookup("ROLE"),
            warehouse: lookup("WAREHOUSE"),
            query_tag: lookup("QUERY_TAG"),
            statement_timeout_secs,
            log_statements,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns `Error::ConfigError` for blank names or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.role.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(Error::ConfigError("role must not be blank".to_string()));
        }
        if self
            .warehouse
            .as_deref()
            .is_some_and(|w| w.trim().is_empty())
        {
            return Err(Error::ConfigError("warehouse must not be blank".to_string()));
        }
        if self.statement_timeout_secs == Some(0) {
            return Err(Error::ConfigError(
                "statement_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout_secs.map(Duration::from_secs)
    }
}
