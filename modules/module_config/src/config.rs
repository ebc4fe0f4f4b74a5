//! Configuration for the module configuration engine

use serde::Deserialize;

/// Module configuration engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Upper bound on fields accepted by one batch create
    #[serde(default = "default_max_batch_fields")]
    pub max_batch_fields: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_batch_fields: default_max_batch_fields(),
        }
    }
}

fn default_max_batch_fields() -> usize {
    50
}
