//! Configuration types for the mock SOAP host.

use crate::services::BUILTIN_SERVICE_NAMES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration, loaded from YAML at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockSoapConfig {
    /// Config version
    pub version: String,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Request handling settings
    pub settings: SettingsConfig,

    /// Service selection
    pub services: ServicesConfig,
}

impl Default for MockSoapConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            server: ServerConfig::default(),
            settings: SettingsConfig::default(),
            services: ServicesConfig::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, host:port
    pub listen_addr: String,

    /// Directory holding per-service WSDL/XSD documents
    pub artifact_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8000".to_string(),
            artifact_dir: PathBuf::from("wsdl"),
        }
    }
}

/// Request handling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Maximum request body size (bytes)
    pub max_body_size: usize,

    /// Allowed Content-Type headers for SOAP requests
    pub allowed_content_types: Vec<String>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1_048_576, // 1MB
            allowed_content_types: vec![
                "text/xml".to_string(),
                "application/soap+xml".to_string(),
                "application/xml".to_string(),
            ],
        }
    }
}

/// Which built-in services to register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Service names to enable, in registration order
    pub enabled: Vec<String>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            enabled: BUILTIN_SERVICE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SettingsConfig {
    /// Check a request Content-Type against the allowed set.
    pub fn is_allowed_content_type(&self, content_type: Option<&str>) -> bool {
        match content_type {
            Some(ct) => {
                let ct_lower = ct.to_lowercase();
                self.allowed_content_types
                    .iter()
                    .any(|allowed| ct_lower.contains(&allowed.to_lowercase()))
            }
            None => false,
        }
    }
}
