//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve_against(&cwd, path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded configuration");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_against(&self.cwd, path)
    }

    /// Read and parse a JSON input file.
    pub async fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let path = self.resolve_path(path);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))
    }

    /// Write a value as pretty JSON.
    pub async fn write_json<T: serde::Serialize>(&self, path: &str, value: &T) -> Result<()> {
        let path = self.resolve_path(path);
        let content = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

fn resolve_against(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find config file in directory tree.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".atelier.toml"), "").unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(".atelier.toml"));
    }

    #[test]
    fn test_find_config_prefers_plain_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("atelier.json"), "{}").unwrap();
        std::fs::write(dir.path().join("atelier.toml"), "").unwrap();

        let found = find_config_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("atelier.toml"));
    }

    #[test]
    fn test_resolve_against() {
        let cwd = Path::new("/srv/shop");
        assert_eq!(resolve_against(cwd, "cart.json"), cwd.join("cart.json"));
        assert_eq!(resolve_against(cwd, "/tmp/cart.json"), PathBuf::from("/tmp/cart.json"));
    }
}
