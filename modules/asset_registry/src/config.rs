//! Configuration for the asset registry

use serde::Deserialize;

/// Asset registry settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Upper bound on dynamic attributes accepted per entity
    #[serde(default = "default_max_attributes")]
    pub max_attributes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attributes: default_max_attributes(),
        }
    }
}

fn default_max_attributes() -> usize {
    100
}
