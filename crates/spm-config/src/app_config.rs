//! Application configuration
//!
//! Configuration loaded from .spm-studio.toml file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default input variable requested from the compile service
pub const DEFAULT_INPUT: &str = "Current function [A]";
/// Default output variable requested from the compile service
pub const DEFAULT_OUTPUT: &str = "Voltage [V]";

/// Application configuration loaded from .spm-studio.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the model compilation service
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Upper bound for a single request to the compilation service
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Input variables selected on startup
    #[serde(default = "default_inputs")]
    pub default_inputs: Vec<String>,

    /// Output variables selected on startup
    #[serde(default = "default_outputs")]
    pub default_outputs: Vec<String>,
}

fn default_backend_url() -> String {
    "https://diffeq-pybamm-backend.fly.dev".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_inputs() -> Vec<String> {
    vec![DEFAULT_INPUT.to_string()]
}

fn default_outputs() -> Vec<String> {
    vec![DEFAULT_OUTPUT.to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
            default_inputs: default_inputs(),
            default_outputs: default_outputs(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.backend_url, "https://diffeq-pybamm-backend.fly.dev");
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.default_inputs, vec!["Current function [A]"]);
        assert_eq!(config.default_outputs, vec!["Voltage [V]"]);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            backend_url = "http://localhost:8000"
            default_outputs = ["Voltage [V]", "Terminal power [W]"]
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.default_outputs.len(), 2);
        // Unspecified fields fall back to defaults
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.default_inputs, vec![DEFAULT_INPUT]);
    }

    #[test]
    fn test_config_rejects_wrong_types() {
        let toml = r#"request_timeout_secs = "soon""#;
        assert!(AppConfig::parse(toml).is_err());
    }
}
