use anyhow::{Context, Result};
use odgrid_types::DatasetSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::datasets;

pub const DEFAULT_BASE_URL: &str = "https://services.odata.org/v4/northwind/northwind.svc";

/// Resolve the config file path based on priority:
/// 1. Explicit path
/// 2. ODGRID_CONFIG environment variable
/// 3. ~/.config/odgrid/config.toml
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("ODGRID_CONFIG") {
        return Ok(PathBuf::from(env_path));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home)
            .join(".config")
            .join("odgrid")
            .join("config.toml"));
    }

    anyhow::bail!("Could not determine config path: no HOME directory found")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub datasets: Vec<DatasetSpec>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            datasets: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a dataset by name: config-declared datasets shadow the
    /// built-in ones. No name picks the first configured dataset, or the
    /// first built-in when none are configured.
    pub fn resolve_dataset(&self, name: Option<&str>) -> Result<DatasetSpec> {
        match name {
            Some(name) => self
                .datasets
                .iter()
                .find(|d| d.name == name)
                .cloned()
                .or_else(|| datasets::builtin(name))
                .with_context(|| format!("Unknown dataset: {}", name)),
            None => Ok(self
                .datasets
                .first()
                .cloned()
                .unwrap_or_else(datasets::default_builtin)),
        }
    }

    /// All dataset names this config can resolve, config-declared first.
    pub fn dataset_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.datasets.iter().map(|d| d.name.clone()).collect();
        for builtin in datasets::builtin_names() {
            if !names.iter().any(|n| n == builtin) {
                names.push(builtin.to_string());
            }
        }
        names
    }
}
