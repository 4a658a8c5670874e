//! Dispatch backend configuration

use serde::{Deserialize, Serialize};

/// Configuration for the dispatch backend client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Base URL of the dispatch API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Organization the order updates run under
    #[serde(default)]
    pub organization_id: String,

    /// Forward-geocode cache TTL in seconds (0 to disable caching)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            organization_id: String::new(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl DispatchConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            organization_id: "org-test".to_string(),
            cache_ttl_secs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.cache_ttl_secs, 300);
        assert!(config.organization_id.is_empty());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: DispatchConfig =
            serde_json::from_str(r#"{"organization_id": "org-7"}"#).unwrap();
        assert_eq!(config.organization_id, "org-7");
        assert_eq!(config.timeout_secs, 10);
    }
}
