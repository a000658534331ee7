pub mod general;
pub mod paths;
pub mod theme;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use ktx_core::{ConfigDocument, KubeConfigEntry, StateSettings};

pub use general::GeneralConfig;
pub use paths::{config_dir, discover_kubeconfigs, generate_alias, generate_aliases, CONFIG_DIR_ENV, CONFIG_FILE};
pub use theme::ThemeConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StateSettings>,
    #[serde(default)]
    pub kube_configs: Vec<KubeConfigEntry>,
}

pub const DEFAULT_CONFIG: &str = include_str!("defaults.toml");

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded defaults must parse")
    }
}

impl AppConfig {
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read from context config file '{}'", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse context config file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Default settings plus one entry per kubeconfig.
    pub fn generate(kubeconfigs: &[PathBuf]) -> Self {
        let mut config = Self::default();
        config.kube_configs = kubeconfigs
            .iter()
            .zip(generate_aliases(kubeconfigs))
            .map(|(path, alias)| KubeConfigEntry { path: path.clone(), alias, ..Default::default() })
            .collect();
        config
    }

    /// Write a generated config to `path` unless one exists. Returns true if a file was written.
    pub fn init_at(path: &Path, kubeconfigs: &[PathBuf]) -> anyhow::Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        let config = Self::generate(kubeconfigs);
        let mut contents = String::from(DEFAULT_CONFIG);
        contents.push('\n');
        contents.push_str(&toml::to_string_pretty(&KubeConfigsOnly { kube_configs: &config.kube_configs })?);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents).with_context(|| format!("failed to write config '{}'", path.display()))?;
        tracing::info!(path = %path.display(), kubeconfigs = kubeconfigs.len(), "created config");
        Ok(true)
    }

    /// The structured document the context engine is built from.
    pub fn document(&self, origin: &Path) -> ConfigDocument {
        ConfigDocument {
            origin: origin.to_path_buf(),
            kube_configs: self.kube_configs.clone(),
            state: self.state.clone(),
        }
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.general.tick_rate_ms
    }
}

// Generated files keep the commented defaults and append only the kubeconfig list.
#[derive(Serialize)]
struct KubeConfigsOnly<'a> {
    kube_configs: &'a [KubeConfigEntry],
}

#[cfg(test)]
mod tests;
