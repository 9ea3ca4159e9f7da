//! Application configuration

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Application configuration.
///
/// Layered, later sources winning: built-in defaults, an optional
/// `rpbridge.toml` in the working directory, then `RPBRIDGE_*` variables
/// (e.g. `RPBRIDGE_SERVER_PORT=8080`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Effect, ability and skill catalog
    pub catalog_path: String,
    /// Characters, objects and group memberships loaded at startup
    pub seed_path: String,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment
    pub fn from_env() -> Result<Self> {
        Self::builder()?
            .add_source(File::with_name("rpbridge").required(false))
            .add_source(Environment::with_prefix("RPBRIDGE"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("server_port", 3000_i64)?
            .set_default("catalog_path", "data/catalog.json")?
            .set_default("seed_path", "data/seed.json")?)
    }
}
