use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KtxError, Result};
use crate::io::write_yaml;

/// The durable current/previous context pair. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct State {
    #[serde(rename = "currentKubeConfig")]
    pub current_kubeconfig: String,
    #[serde(rename = "lastKubeConfig")]
    pub last_kubeconfig: String,
    #[serde(rename = "currentContext")]
    pub current_context: String,
    #[serde(rename = "lastContext")]
    pub last_context: String,
}

pub struct StateStore {
    path: PathBuf,
    state: State,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), state: State::default() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Re-read the state file. A missing file is the normal first-run case and leaves the state empty.
    pub fn load(&mut self) -> Result<&State> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.state = State::default();
                return Ok(&self.state);
            }
            Err(source) => return Err(KtxError::StateRead { path: self.path.clone(), source }),
        };
        self.state = if content.trim().is_empty() {
            State::default()
        } else {
            serde_yaml::from_str(&content).map_err(|source| KtxError::StateParse { path: self.path.clone(), source })?
        };
        Ok(&self.state)
    }

    /// Shift current into previous and record the new current pair in a single write.
    pub fn advance(&mut self, kubeconfig: &Path, context: &str) -> Result<()> {
        self.load()?;
        let next = State {
            current_kubeconfig: kubeconfig.to_string_lossy().into_owned(),
            current_context: context.to_string(),
            last_kubeconfig: std::mem::take(&mut self.state.current_kubeconfig),
            last_context: std::mem::take(&mut self.state.current_context),
        };
        write_yaml(&self.path, &next)?;
        tracing::debug!(
            current = %next.current_context,
            last = %next.last_context,
            "advanced state"
        );
        self.state = next;
        Ok(())
    }
}
