//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use atelier_commerce::config::StoreConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["atelier.toml", ".atelier.toml", "atelier.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    /// Store pricing and cart settings.
    #[serde(default)]
    pub store: StoreConfig,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

/// Generate a default atelier.toml config file.
pub fn generate_default_config() -> String {
    let store = StoreConfig::default();
    format!(
        r#"# Atelier store configuration

[store]
currency = "{currency}"
# Amounts are in minor units (centavos for COP).
# Orders strictly above the threshold ship free.
free_shipping_threshold = {threshold}
flat_shipping_rate = {flat}
max_quantity_per_item = {cap}
"#,
        currency = store.currency.code(),
        threshold = store.free_shipping_threshold,
        flat = store.flat_shipping_rate,
        cap = store.max_quantity_per_item,
    )
}
