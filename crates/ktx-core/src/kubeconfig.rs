use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::error::{KtxError, Result};
use crate::io::{expand_home, write_yaml};

/// The `context` block of a kubeconfig context entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ContextSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NamedContext {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: ContextSpec,
}

// kubectl writes `clusters: null` and friends for empty sections.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single kubeconfig file.
///
/// Only the contexts and the `current-context` pointer are interpreted. Clusters, users,
/// preferences and any unknown top-level keys are carried through untouched so that a
/// rewrite never loses credentials or server settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KubeConfig {
    #[serde(skip)]
    path: PathBuf,
    #[serde(rename = "apiVersion", default, deserialize_with = "null_as_default")]
    pub api_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub preferences: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<NamedContext>,
    #[serde(rename = "current-context", default, deserialize_with = "null_as_default")]
    pub current_context: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl KubeConfig {
    /// Read and validate the kubeconfig at `path`. A leading `~/` is expanded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_home(path);
        let content = std::fs::read_to_string(&path).map_err(|source| KtxError::Read { path: path.clone(), source })?;
        let config = Self::parse(path, &content)?;
        tracing::debug!(path = %config.path.display(), contexts = config.contexts.len(), "loaded kubeconfig");
        Ok(config)
    }

    /// Parse kubeconfig content that belongs to `path` without touching the disk.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let mut config: KubeConfig =
            serde_yaml::from_str(content).map_err(|source| KtxError::Parse { path: path.clone(), source })?;
        config.path = path;
        config.check_duplicates()?;
        config.contexts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(config)
    }

    fn check_duplicates(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for ctx in &self.contexts {
            if !seen.insert(ctx.name.as_str()) {
                return Err(KtxError::DuplicateContext { name: ctx.name.clone(), path: self.path.clone() });
            }
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn context_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.contexts.iter().map(|c| c.name.as_str())
    }

    pub fn find_context(&self, name: &str) -> Result<(usize, &NamedContext)> {
        self.contexts
            .iter()
            .enumerate()
            .find(|(_, c)| c.name == name)
            .ok_or_else(|| KtxError::ContextNotFound { name: name.to_string(), path: self.path.clone() })
    }

    pub fn set_current_context(&mut self, name: &str) -> Result<()> {
        self.find_context(name)?;
        self.current_context = name.to_string();
        self.save()
    }

    pub fn clear_current_context(&mut self) -> Result<()> {
        self.current_context.clear();
        self.save()
    }

    /// Set the namespace of a context. Returns `false` when nothing had to be written.
    pub fn set_namespace(&mut self, context_name: &str, namespace: &str) -> Result<bool> {
        if namespace.is_empty() {
            return Ok(false);
        }
        let (idx, ctx) = self.find_context(context_name)?;
        if ctx.context.namespace == namespace {
            return Ok(false);
        }
        self.contexts[idx].context.namespace = namespace.to_string();
        self.save()?;
        Ok(true)
    }

    pub fn save(&self) -> Result<()> {
        write_yaml(&self.path, self)
    }
}
