//! Configuration module for flowscope.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Dashboard configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DashConfig {
    /// Base URL of the flow collector API (default: "http://127.0.0.1:5000")
    pub base_url: String,
    /// Refresh period in seconds (default: 60)
    pub refresh_secs: u64,
    /// Per-request HTTP timeout in seconds (default: 10)
    pub http_timeout_secs: u64,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            refresh_secs: 60,
            http_timeout_secs: 10,
        }
    }
}

impl DashConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FLOWSCOPE_BASE_URL`: collector base URL (default: "http://127.0.0.1:5000")
    /// - `FLOWSCOPE_REFRESH_SECS`: refresh period in seconds (default: 60)
    /// - `FLOWSCOPE_HTTP_TIMEOUT_SECS`: request timeout in seconds (default: 10)
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(url) = env::var("FLOWSCOPE_BASE_URL") {
            cfg.base_url = url;
        }

        if let Ok(secs_str) = env::var("FLOWSCOPE_REFRESH_SECS") {
            if let Ok(secs) = secs_str.parse() {
                cfg.refresh_secs = secs;
            }
        }

        if let Ok(secs_str) = env::var("FLOWSCOPE_HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = secs_str.parse() {
                cfg.http_timeout_secs = secs;
            }
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = DashConfig::default();
        assert_eq!(cfg.base_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.refresh_secs, 60);
        assert_eq!(cfg.http_timeout_secs, 10);
    }
}
