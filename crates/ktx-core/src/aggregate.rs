use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KtxError, Result};
use crate::io::expand_home;
use crate::kubeconfig::KubeConfig;
use crate::projection::{ContextProjection, ContextRecord};
use crate::state::StateStore;

pub const STATE_FILE: &str = ".state";

/// A kubeconfig as listed in the user configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KubeConfigEntry {
    pub path: PathBuf,
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<ContextRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StateSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<PathBuf>,
}

/// The parsed user configuration: where it came from and which kubeconfigs it binds.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    pub origin: PathBuf,
    pub kube_configs: Vec<KubeConfigEntry>,
    pub state: Option<StateSettings>,
}

/// A kubeconfig file paired with its contexts file.
#[derive(Debug)]
pub struct KubeConfigBinding {
    alias: String,
    kubeconfig: KubeConfig,
    projection: ContextProjection,
}

impl KubeConfigBinding {
    pub fn new(alias: impl Into<String>, kubeconfig: KubeConfig, projection: ContextProjection) -> Self {
        Self { alias: alias.into(), kubeconfig, projection }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn kubeconfig(&self) -> &KubeConfig {
        &self.kubeconfig
    }

    pub fn projection(&self) -> &ContextProjection {
        &self.projection
    }
}

/// Result of a name-or-alias lookup across all bindings.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub binding: usize,
    pub index: usize,
    pub record: &'a ContextRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The named context is now current.
    Switched(String),
    /// No binding knows the identifier.
    UnknownContext(String),
    /// The state file holds no usable previous context.
    NoPrevious,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextItem {
    pub name: String,
    pub description: String,
}

impl From<&ContextRecord> for ContextItem {
    fn from(record: &ContextRecord) -> Self {
        Self { name: record.label().to_string(), description: record.description() }
    }
}

pub struct ContextConfig {
    dir: PathBuf,
    origin: PathBuf,
    bindings: Vec<KubeConfigBinding>,
    state: StateStore,
}

impl ContextConfig {
    /// Load every configured kubeconfig and its contexts file.
    ///
    /// Contexts files default to `contexts_<alias>.yaml` and the state file to `.state`, both next
    /// to the configuration document. Context records given in the document are merged into the
    /// records read from the contexts file.
    pub fn build(document: ConfigDocument) -> Result<Self> {
        let ConfigDocument { origin, kube_configs, state } = document;
        let dir = origin.parent().map(Path::to_path_buf).unwrap_or_default();

        let state_path = state
            .and_then(|s| s.filename)
            .map(|p| resolve_in(&dir, p))
            .unwrap_or_else(|| dir.join(STATE_FILE));

        let mut bindings = Vec::with_capacity(kube_configs.len());
        for entry in kube_configs {
            let kubeconfig = KubeConfig::load(&entry.path)?;
            let projection_path = entry
                .context_file
                .map(|p| resolve_in(&dir, p))
                .unwrap_or_else(|| dir.join(format!("contexts_{}.yaml", entry.alias)));
            let mut projection = ContextProjection::load(&projection_path)?;
            projection.merge(entry.contexts);
            bindings.push(KubeConfigBinding::new(entry.alias, kubeconfig, projection));
        }

        tracing::debug!(origin = %origin.display(), bindings = bindings.len(), "built context config");
        Ok(Self { dir, origin, bindings, state: StateStore::new(state_path) })
    }

    pub fn from_parts(origin: impl Into<PathBuf>, bindings: Vec<KubeConfigBinding>, state: StateStore) -> Self {
        let origin = origin.into();
        let dir = origin.parent().map(Path::to_path_buf).unwrap_or_default();
        Self { dir, origin, bindings, state }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn bindings(&self) -> &[KubeConfigBinding] {
        &self.bindings
    }

    pub fn state_path(&self) -> &Path {
        self.state.path()
    }

    /// Sync every contexts file with its kubeconfig and push namespaces back, in configured order.
    /// Stops at the first failing binding.
    pub fn synchronize_all(&mut self) -> Result<()> {
        for binding in &mut self.bindings {
            let KubeConfigBinding { kubeconfig, projection, .. } = binding;
            projection.synchronize(kubeconfig)?;
            projection.push_namespaces(kubeconfig)?;
        }
        Ok(())
    }

    /// Look up a context by name or alias. The first configured binding wins.
    pub fn resolve_context(&self, identifier: &str) -> Option<Resolved<'_>> {
        self.bindings.iter().enumerate().find_map(|(binding, b)| {
            b.projection.resolve(identifier).map(|(index, record)| Resolved { binding, index, record })
        })
    }

    pub fn binding_by_path(&self, path: &str) -> Option<usize> {
        if path.is_empty() {
            return None;
        }
        self.bindings.iter().position(|b| b.kubeconfig.path() == Path::new(path))
    }

    /// Make `context` the only current context across all kubeconfigs and record the switch.
    ///
    /// The steps run in order: clear every kubeconfig, set the target, advance the state file.
    /// A failing step aborts the rest; finished steps are not rolled back.
    pub fn switch_to(&mut self, binding: usize, context: &str) -> Result<()> {
        if binding >= self.bindings.len() {
            return Err(KtxError::ContextNotFound { name: context.to_string(), path: self.origin.clone() });
        }

        for b in &mut self.bindings {
            b.kubeconfig.clear_current_context()?;
        }
        let target = &mut self.bindings[binding].kubeconfig;
        target.set_current_context(context)?;
        self.state.advance(target.path(), context)?;
        tracing::debug!(context, kubeconfig = %target.path().display(), "switched context");
        Ok(())
    }

    /// Resolve `identifier` and switch to it.
    pub fn use_context(&mut self, identifier: &str) -> Result<SwitchOutcome> {
        let Some(resolved) = self.resolve_context(identifier) else {
            return Ok(SwitchOutcome::UnknownContext(identifier.to_string()));
        };
        let (binding, name) = (resolved.binding, resolved.record.name().to_string());
        self.switch_to(binding, &name)?;
        Ok(SwitchOutcome::Switched(name))
    }

    /// Jump back to the previous context recorded in the state file.
    pub fn switch_back(&mut self) -> Result<SwitchOutcome> {
        let state = self.state.load()?;
        let (last_kubeconfig, last_context) = (state.last_kubeconfig.clone(), state.last_context.clone());
        let Some(binding) = self.binding_by_path(&last_kubeconfig) else {
            return Ok(SwitchOutcome::NoPrevious);
        };
        self.switch_to(binding, &last_context)?;
        Ok(SwitchOutcome::Switched(last_context))
    }

    /// The current context according to the state file, if it belongs to a configured kubeconfig.
    pub fn current_context(&mut self) -> Result<Option<String>> {
        let state = self.state.load()?;
        let (current_kubeconfig, current_context) = (state.current_kubeconfig.clone(), state.current_context.clone());
        Ok(self.binding_by_path(&current_kubeconfig).map(|_| current_context))
    }

    /// Display items for the picker, in configured order.
    ///
    /// `config_filter` keeps only the binding with that alias, `context_filter` keeps records whose
    /// label contains it. Empty filters keep everything.
    pub fn display_items<'a>(
        &'a self,
        config_filter: &'a str,
        context_filter: &'a str,
    ) -> impl Iterator<Item = ContextItem> + Clone + 'a {
        self.bindings
            .iter()
            .filter(move |b| config_filter.is_empty() || b.alias == config_filter)
            .flat_map(|b| b.projection.records().iter())
            .filter(move |r| context_filter.is_empty() || r.label().contains(context_filter))
            .map(ContextItem::from)
    }
}

fn resolve_in(dir: &Path, path: PathBuf) -> PathBuf {
    let path = expand_home(path);
    if path.is_relative() {
        dir.join(path)
    } else {
        path
    }
}
