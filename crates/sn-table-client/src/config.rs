//! Connection settings for a ServiceNow instance.

/// Instance URL and basic credentials for the Table API.
#[derive(Clone)]
pub struct ServiceNowConfig {
    /// Base URL of the instance (e.g., "https://dev12345.service-now.com").
    pub instance_url: String,
    pub username: String,
    pub password: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl ServiceNowConfig {
    pub fn new(
        instance_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let instance_url: String = instance_url.into();
        Self {
            instance_url: instance_url.trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Full Table API URL for `table`.
    pub fn table_url(&self, table: &str) -> String {
        format!(
            "{}/api/now/table/{table}",
            self.instance_url.trim_end_matches('/')
        )
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for ServiceNowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceNowConfig")
            .field("instance_url", &self.instance_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let config = ServiceNowConfig::new("https://dev.service-now.com/", "admin", "secret");
        assert_eq!(config.instance_url, "https://dev.service-now.com");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn table_url() {
        let config = ServiceNowConfig::new("https://dev.service-now.com", "admin", "secret");
        assert_eq!(
            config.table_url("incident"),
            "https://dev.service-now.com/api/now/table/incident"
        );
    }

    #[test]
    fn debug_redacts_password() {
        let config = ServiceNowConfig::new("https://dev.service-now.com", "admin", "hunter2");
        let printed = format!("{config:?}");
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}
