//! Configuration types.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::NewPlumber;

/// HTTP server settings from `server.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:5000`.
    pub listen_addr: String,
}

/// Seed data from `plumbers.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// Plumbers inserted into an empty store at start-up.
    #[serde(default)]
    pub plumbers: Vec<NewPlumber>,
}

/// The complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    server: ServerConfig,
    seed: SeedConfig,
}

impl AppConfig {
    /// Creates a configuration from its parts.
    pub fn new(server: ServerConfig, seed: SeedConfig) -> Self {
        Self { server, seed }
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Returns the seed data.
    pub fn seed(&self) -> &SeedConfig {
        &self.seed
    }
}
