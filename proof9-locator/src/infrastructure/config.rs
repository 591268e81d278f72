//! Configuration for the content locator

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocatorConfig {
    /// Gateway endpoint configuration
    #[serde(default)]
    pub gateways: GatewayConfig,

    /// Probe timeout configuration
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl LocatorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Reject configurations that could never resolve anything: an empty
    /// endpoint list, or endpoints with a non-HTTP scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateways.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }

        for endpoint in &self.gateways.endpoints {
            if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
                return Err(ConfigError::InvalidEndpoint(endpoint.clone()));
            }
        }

        Ok(())
    }
}

/// Gateway endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Ordered gateway URL prefixes, most preferred first. Each prefix is
    /// joined with the content identifier as a direct path suffix.
    #[serde(default = "default_gateway_endpoints")]
    pub endpoints: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoints: default_gateway_endpoints(),
        }
    }
}

fn default_gateway_endpoints() -> Vec<String> {
    [
        "https://ipfs.io/ipfs/",
        "https://gateway.pinata.cloud/ipfs/",
        "https://cloudflare-ipfs.com/ipfs/",
        "https://dweb.link/ipfs/",
        "https://w3s.link/ipfs/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Probe timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Timeout in milliseconds for a standalone liveness probe
    #[serde(default = "default_probe_ms")]
    pub probe_ms: u64,

    /// Per-gateway timeout in milliseconds during fallback resolution
    #[serde(default = "default_resolve_ms")]
    pub resolve_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe_ms: default_probe_ms(),
            resolve_ms: default_resolve_ms(),
        }
    }
}

fn default_probe_ms() -> u64 {
    3000
}

fn default_resolve_ms() -> u64 {
    5000
}

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
    #[error("gateway endpoint list is empty")]
    NoEndpoints,
    #[error("invalid gateway endpoint: {0}")]
    InvalidEndpoint(String),
}
