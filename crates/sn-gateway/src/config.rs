//! Gateway server configuration.

use sn_table_client::ServiceNowConfig;

/// Errors raised while loading configuration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Top-level gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0").
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// ServiceNow instance and credentials.
    pub servicenow: ServiceNowConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl GatewayConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config through `lookup`, which returns the value of a variable.
    ///
    /// `SERVICENOW_INSTANCE`, `SERVICENOW_USERNAME` and `SERVICENOW_PASSWORD`
    /// are required; `GATEWAY_HOST`, `GATEWAY_PORT` and
    /// `SERVICENOW_TIMEOUT_SECS` fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let instance = required("SERVICENOW_INSTANCE")?;
        let username = required("SERVICENOW_USERNAME")?;
        let password = required("SERVICENOW_PASSWORD")?;

        let mut servicenow = ServiceNowConfig::new(instance, username, password);
        if let Some(raw) = lookup("SERVICENOW_TIMEOUT_SECS") {
            servicenow.timeout_secs = parse_var("SERVICENOW_TIMEOUT_SECS", &raw)?;
        }

        let port = match lookup("GATEWAY_PORT") {
            Some(raw) => parse_var("GATEWAY_PORT", &raw)?,
            None => default_port(),
        };

        Ok(Self {
            host: lookup("GATEWAY_HOST").unwrap_or_else(default_host),
            port,
            servicenow,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
