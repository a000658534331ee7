use std::path::{Path, PathBuf};

use anyhow::Context;
use ktx_config::{AppConfig, CONFIG_FILE};
use ktx_core::ContextConfig;

pub struct Loaded {
    pub config: AppConfig,
    pub contexts: ContextConfig,
}

/// Load `config.toml` from the config directory, creating it on first run, then sync every
/// contexts file with its kubeconfig.
pub fn load() -> anyhow::Result<Loaded> {
    load_from_dir(&ktx_config::config_dir(), &ktx_config::discover_kubeconfigs())
}

pub fn load_from_dir(dir: &Path, kubeconfigs: &[PathBuf]) -> anyhow::Result<Loaded> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create config dir '{}'", dir.display()))?;

    let path = dir.join(CONFIG_FILE);
    AppConfig::init_at(&path, kubeconfigs)?;
    let config = AppConfig::load_from(&path)?;

    let mut contexts = ContextConfig::build(config.document(&path))?;
    contexts.synchronize_all().context("failed to synchronize context files")?;
    tracing::debug!(config = %path.display(), kubeconfigs = contexts.bindings().len(), "loaded");

    Ok(Loaded { config, contexts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::KubeDir;

    #[test]
    fn first_run_generates_config_and_context_files() {
        let kube = KubeDir::new();
        let dir = kube.path("cfg");
        let loaded = load_from_dir(&dir, &[kube.path("kube.one")]).unwrap();

        assert!(dir.join(CONFIG_FILE).exists());
        assert!(dir.join("contexts_one.yaml").exists());
        assert_eq!(loaded.config.kube_configs[0].alias, "one");
        assert_eq!(loaded.contexts.bindings().len(), 1);
    }

    #[test]
    fn existing_config_is_not_regenerated() {
        let kube = KubeDir::new();
        let dir = kube.path("cfg");
        load_from_dir(&dir, &[kube.path("kube.one")]).unwrap();

        let loaded = load_from_dir(&dir, &[kube.path("kube.one"), kube.path("kube.two")]).unwrap();
        assert_eq!(loaded.contexts.bindings().len(), 1);
    }

    #[test]
    fn broken_kubeconfig_fails_load() {
        let kube = KubeDir::new();
        std::fs::write(kube.path("kube.one"), "contexts: [unclosed").unwrap();
        assert!(load_from_dir(&kube.path("cfg"), &[kube.path("kube.one")]).is_err());
    }
}
