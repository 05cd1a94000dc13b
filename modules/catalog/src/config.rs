use std::path::PathBuf;

use serde::Deserialize;

/// `modules.catalog.config` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory holding `currencies.json` and `account_types.json`.
    /// Seeding is skipped when unset.
    #[serde(default)]
    pub seed_dir: Option<PathBuf>,
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_dir: None,
            max_name_length: default_max_name_length(),
        }
    }
}

fn default_max_name_length() -> usize {
    100
}
