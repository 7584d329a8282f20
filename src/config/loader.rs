//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::NewPlumber;

use super::types::{AppConfig, SeedConfig, ServerConfig};

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── server.yaml    # Listen address (required)
/// └── plumbers.yaml  # Plumbers seeded at start-up (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use plumber_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Listening on {}", loader.listen_addr());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `server.yaml` is missing (`ConfigNotFound`)
    /// - Any present file contains invalid YAML (`ConfigParseError`)
    /// - A seeded plumber fails validation (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let server = Self::load_yaml::<ServerConfig>(&path.join("server.yaml"))?;

        let seed_path = path.join("plumbers.yaml");
        let seed = if seed_path.exists() {
            let seed = Self::load_yaml::<SeedConfig>(&seed_path)?;
            for plumber in &seed.plumbers {
                plumber
                    .validate()
                    .map_err(|e| EngineError::ConfigParseError {
                        path: seed_path.display().to_string(),
                        message: format!("plumber '{}': {}", plumber.name, e),
                    })?;
            }
            seed
        } else {
            SeedConfig::default()
        };

        Ok(Self {
            config: AppConfig::new(server, seed),
        })
    }

    /// Builds a loader from an already-assembled configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the configured listen address.
    pub fn listen_addr(&self) -> &str {
        &self.config.server().listen_addr
    }

    /// Returns the plumbers to seed into an empty store.
    pub fn seed_plumbers(&self) -> &[NewPlumber] {
        &self.config.seed().plumbers
    }
}
