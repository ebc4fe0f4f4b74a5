//! Server configuration: YAML file layered under environment overrides

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;

/// Top-level configuration for the server binary.
///
/// Each module contributes its own section so that module settings live
/// next to the code that reads them.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub module_config: module_config::Config,
    #[serde(default)]
    pub asset_registry: asset_registry::Config,
}

impl AppConfig {
    /// Layered load: the YAML file first, then `SITELINE_*` environment
    /// variables with `__` separating nesting levels, so
    /// `SITELINE_DATABASE__URL` overrides `database.url`.
    pub fn load(path: &Path) -> Result<Self> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SITELINE_").split("__"))
            .extract()
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SeaORM connection URL, e.g. `postgres://...` or `sqlite://siteline.db?mode=rwc`
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Log every SQL statement at debug level
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit one JSON object per line instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}
