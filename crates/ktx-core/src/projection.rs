use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{KtxError, Result};
use crate::io::{expand_home, write_yaml};
use crate::kubeconfig::KubeConfig;

pub const NAME_KEY: &str = "name";
pub const ALIAS_KEY: &str = "alias";
pub const NAMESPACE_KEY: &str = "namespace";
pub const KUBECONFIG_KEY: &str = "kubeconfig";

/// One entry of a contexts file: a flat, ordered set of string attributes
/// describing a single kubeconfig context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContextRecord(IndexMap<String, String>);

impl ContextRecord {
    /// A freshly synced record: only the context name and its kubeconfig.
    pub fn synced(name: &str, kubeconfig: &Path) -> Self {
        let mut record = Self::default();
        record.insert(NAME_KEY, name);
        record.insert(KUBECONFIG_KEY, kubeconfig.to_string_lossy());
        record
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn name(&self) -> &str {
        self.get(NAME_KEY).unwrap_or_default()
    }

    pub fn alias(&self) -> Option<&str> {
        self.get(ALIAS_KEY)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.get(NAMESPACE_KEY).filter(|ns| !ns.is_empty())
    }

    /// The name shown to the user: the alias when present, the context name otherwise.
    pub fn label(&self) -> &str {
        self.alias().unwrap_or_else(|| self.name())
    }

    pub fn matches(&self, identifier: &str) -> bool {
        self.name() == identifier || self.alias() == Some(identifier)
    }

    /// Every attribute except name and alias as `key: value`, joined by `, `, in record order.
    pub fn description(&self) -> String {
        self.0
            .iter()
            .filter(|(k, _)| k.as_str() != NAME_KEY && k.as_str() != ALIAS_KEY)
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Overlay `other` onto this record; keys of `other` win.
    pub fn merge(&mut self, other: &ContextRecord) {
        for (k, v) in other.iter() {
            self.insert(k, v);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContextRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// Scalars are accepted as strings so that `port: 8080` in a hand-edited file does not fail the load.
impl<'de> Deserialize<'de> for ContextRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut record = IndexMap::with_capacity(raw.len());
        for (key, value) in raw {
            let value = match value {
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Null => String::new(),
                other => {
                    return Err(de::Error::custom(format!(
                        "context attribute '{key}' must be a scalar, found {}",
                        Kind(&other)
                    )))
                }
            };
            record.insert(key, value);
        }
        Ok(Self(record))
    }
}

struct Kind<'a>(&'a Value);

impl fmt::Display for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.0 {
            Value::Sequence(_) => "a sequence",
            Value::Mapping(_) => "a mapping",
            Value::Tagged(_) => "a tagged value",
            _ => "a scalar",
        };
        f.write_str(kind)
    }
}

/// The contexts file that belongs to one kubeconfig.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextProjection {
    path: PathBuf,
    records: Vec<ContextRecord>,
}

impl ContextProjection {
    pub fn new(path: impl Into<PathBuf>, records: Vec<ContextRecord>) -> Self {
        Self { path: path.into(), records }
    }

    /// Read the contexts file at `path`. A missing or empty file yields an empty projection.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_home(path);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no contexts file yet");
                return Ok(Self::new(path, Vec::new()));
            }
            Err(source) => return Err(KtxError::Read { path, source }),
        };
        if content.trim().is_empty() {
            return Ok(Self::new(path, Vec::new()));
        }
        let records: Vec<ContextRecord> =
            serde_yaml::from_str(&content).map_err(|source| KtxError::Parse { path: path.clone(), source })?;
        Ok(Self::new(path, records))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[ContextRecord] {
        &self.records
    }

    /// Merge user-authored records by context name; unknown names are appended.
    pub fn merge<I: IntoIterator<Item = ContextRecord>>(&mut self, records: I) {
        for record in records {
            let existing = self.records.iter().position(|r| !record.name().is_empty() && r.name() == record.name());
            match existing {
                Some(idx) => self.records[idx].merge(&record),
                None => self.records.push(record),
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name() == name)
    }

    /// First record whose name or alias equals `identifier`.
    pub fn resolve(&self, identifier: &str) -> Option<(usize, &ContextRecord)> {
        self.records.iter().enumerate().find(|(_, r)| r.matches(identifier))
    }

    /// Append a record for every kubeconfig context not yet known, then persist.
    /// Known records without a `kubeconfig` key get one. Returns the number of records added.
    pub fn synchronize(&mut self, kubeconfig: &KubeConfig) -> Result<usize> {
        let kubeconfig_path = kubeconfig.path().to_string_lossy();
        for record in self.records.iter_mut().filter(|r| r.get(KUBECONFIG_KEY).is_none()) {
            record.insert(KUBECONFIG_KEY, &*kubeconfig_path);
        }
        let missing: Vec<ContextRecord> = kubeconfig
            .context_names()
            .filter(|name| !self.contains(name))
            .map(|name| ContextRecord::synced(name, kubeconfig.path()))
            .collect();
        let added = missing.len();
        self.records.extend(missing);
        self.save()?;
        tracing::debug!(path = %self.path.display(), added, "synchronized contexts");
        Ok(added)
    }

    /// Write every non-empty namespace back into the kubeconfig. Returns how many contexts changed.
    pub fn push_namespaces(&self, kubeconfig: &mut KubeConfig) -> Result<usize> {
        let mut changed = 0;
        for record in &self.records {
            let Some(namespace) = record.namespace() else { continue };
            if kubeconfig.set_namespace(record.name(), namespace)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    pub fn save(&self) -> Result<()> {
        write_yaml(&self.path, &self.records)
    }
}
