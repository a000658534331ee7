use super::*;

use tempfile::TempDir;

#[test]
fn default_config_has_expected_general_fields() {
    let config = AppConfig::default();
    assert_eq!(config.general.title, "Kube Contexts");
    assert_eq!(config.general.filter_prompt, "Filter: ");
    assert_eq!(config.tick_rate_ms(), 250);
    assert_eq!(config.general.status_message_secs, 10);
    assert!(config.kube_configs.is_empty());
    assert!(config.state.is_none());
}

#[test]
fn embedded_defaults_match_struct_defaults() {
    let config = AppConfig::default();
    let theme = ThemeConfig::default();
    assert_eq!(config.theme.accent, theme.accent);
    assert_eq!(config.theme.title_bg, theme.title_bg);
    assert_eq!(config.theme.error, theme.error);
    assert_eq!(config.general.tick_rate_ms, GeneralConfig::default().tick_rate_ms);
}

#[test]
fn parse_kube_configs_with_contexts() {
    let raw = r#"
[state]
filename = "ktx.state"

[[kube_configs]]
path = "~/.kube/config"
alias = "m"

[[kube_configs.contexts]]
name = "aws:prod:accountId:us-east-1:cluster1"
alias = "avap:1"
namespace = "monitoring"
region = "us-east-1"

[[kube_configs]]
path = "/etc/kube/lab"
alias = "lab"
context_file = "lab.yaml"
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.kube_configs.len(), 2);

    let m = &config.kube_configs[0];
    assert_eq!(m.alias, "m");
    assert_eq!(m.contexts.len(), 1);
    assert_eq!(m.contexts[0].alias(), Some("avap:1"));
    assert_eq!(m.contexts[0].description(), "namespace: monitoring, region: us-east-1");

    assert_eq!(config.kube_configs[1].context_file, Some(PathBuf::from("lab.yaml")));
    assert_eq!(config.state.unwrap().filename, Some(PathBuf::from("ktx.state")));
    assert_eq!(config.general.title, "Kube Contexts");
}

#[test]
fn scalar_context_attributes_become_strings() {
    let raw = r#"
[[kube_configs]]
path = "/k"
alias = "k"

[[kube_configs.contexts]]
name = "a"
port = 8080
private = true
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    let record = &config.kube_configs[0].contexts[0];
    assert_eq!(record.get("port"), Some("8080"));
    assert_eq!(record.get("private"), Some("true"));
}

#[test]
fn kebab_case_aliases_are_accepted() {
    let raw = r#"
[general]
filter-prompt = "> "
tick-rate-ms = 100

[theme]
title-bg = "red"
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.general.filter_prompt, "> ");
    assert_eq!(config.general.tick_rate_ms, 100);
    assert_eq!(config.theme.title_bg, "red");
    assert_eq!(config.theme.accent, ThemeConfig::default().accent);
}

#[test]
fn generate_lists_kubeconfigs_with_aliases() {
    let config = AppConfig::generate(&[PathBuf::from("/home/u/.kube/config"), PathBuf::from("/home/u/kube.lab")]);
    let aliases: Vec<_> = config.kube_configs.iter().map(|k| k.alias.as_str()).collect();
    assert_eq!(aliases, vec!["x", "lab"]);
    assert!(config.kube_configs.iter().all(|k| k.contexts.is_empty() && k.context_file.is_none()));
}

#[test]
fn init_at_writes_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ktx").join(CONFIG_FILE);
    let kubeconfigs = vec![PathBuf::from("/home/u/.kube/config")];

    assert!(AppConfig::init_at(&path, &kubeconfigs).unwrap());
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# ktx configuration"));

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.kube_configs.len(), 1);
    assert_eq!(loaded.kube_configs[0].alias, "x");
    assert_eq!(loaded.general.title, "Kube Contexts");

    assert!(!AppConfig::init_at(&path, &[]).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE);

    let mut config = AppConfig::generate(&[PathBuf::from("/k/one")]);
    config.kube_configs[0].contexts = vec![[("name", "a"), ("alias", "first")].into_iter().collect()];
    config.save(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.kube_configs, config.kube_configs);
    assert_eq!(loaded.general.tick_rate_ms, config.general.tick_rate_ms);
}

#[test]
fn load_from_reports_path_on_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "kube_configs = 3").unwrap();
    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse context config file"));
}

#[test]
fn load_from_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn document_carries_origin_and_entries() {
    let config = AppConfig::generate(&[PathBuf::from("/k/kube.one")]);
    let doc = config.document(Path::new("/cfg/config.toml"));
    assert_eq!(doc.origin, PathBuf::from("/cfg/config.toml"));
    assert_eq!(doc.kube_configs, config.kube_configs);
    assert!(doc.state.is_none());
}
