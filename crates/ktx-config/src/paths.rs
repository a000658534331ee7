use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_ENV: &str = "KTX_CONFIG_DIR";
pub const CONFIG_FILE: &str = "config.toml";

/// The directory holding `config.toml`, the contexts files and the state file.
///
/// `KTX_CONFIG_DIR` wins, then the platform config directory, then `./ktx`.
pub fn config_dir() -> PathBuf {
    config_dir_from(std::env::var_os(CONFIG_DIR_ENV), dirs::config_dir())
}

fn config_dir_from(env: Option<OsString>, platform: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    platform.unwrap_or_else(|| PathBuf::from(".")).join("ktx")
}

/// Kubeconfigs to register on first run: the `KUBECONFIG` list, or `~/.kube/config`.
pub fn discover_kubeconfigs() -> Vec<PathBuf> {
    kubeconfigs_from(std::env::var_os("KUBECONFIG"), dirs::home_dir())
}

fn kubeconfigs_from(env: Option<OsString>, home: Option<PathBuf>) -> Vec<PathBuf> {
    if let Some(paths) = env.filter(|p| !p.is_empty()) {
        let found: Vec<PathBuf> = std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()).collect();
        if !found.is_empty() {
            return found;
        }
    }
    vec![home.unwrap_or_else(|| PathBuf::from(".")).join(".kube").join("config")]
}

/// Alias derived from the file extension (`kube.prod` -> `prod`), `x` when there is none.
pub fn generate_alias(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => ext.to_string(),
        _ => "x".to_string(),
    }
}

/// Aliases for a list of kubeconfigs. Repeated aliases get a numeric suffix so that every
/// kubeconfig keeps its own contexts file.
pub fn generate_aliases(paths: &[PathBuf]) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let base = generate_alias(path);
            let mut alias = base.clone();
            let mut n = 2;
            while !seen.insert(alias.clone()) {
                alias = format!("{base}{n}");
                n += 1;
            }
            alias
        })
        .collect()
}
