//! Server Configuration
//!
//! Defines the runtime configuration for the agent server:
//! - Listen address
//! - Identity header forwarded by the upstream authenticator
//! - Request body size limit
//!
//! Values come from `ServerConfig::default()`, optionally overlaid by a TOML
//! file, then by command-line flags / environment variables in the binary.

use axum::http::HeaderName;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::api::DEFAULT_IDENTITY_HEADER;

/// Default cap on request bodies (64 KiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid identity header name: {0}")]
    InvalidHeader(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Header carrying the authenticated user id
    pub identity_header: String,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.identity_header_name()?;
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The identity header as a typed header name.
    pub fn identity_header_name(&self) -> Result<HeaderName, ConfigError> {
        HeaderName::from_bytes(self.identity_header.trim().as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(self.identity_header.clone()))
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
