use anyhow::Context;
use ktx_core::{ContextConfig, SwitchOutcome};

/// Printed when the state file has no usable entry to report or go back to.
pub const NO_CONTEXT_FOUND: &str =
    "No previous context found in state file. You need to switch the kube context at least twice.";

/// Switch to the context named or aliased `identifier`.
pub fn use_context(contexts: &mut ContextConfig, identifier: &str) -> anyhow::Result<String> {
    let outcome = contexts
        .use_context(identifier)
        .with_context(|| format!("failed to set current-context to '{identifier}'"))?;
    match outcome {
        SwitchOutcome::Switched(_) => Ok(identifier.to_string()),
        SwitchOutcome::UnknownContext(_) => anyhow::bail!("context '{identifier}' not found in kube config files"),
        SwitchOutcome::NoPrevious => Ok(NO_CONTEXT_FOUND.to_string()),
    }
}

pub fn switch_back(contexts: &mut ContextConfig) -> anyhow::Result<String> {
    match contexts.switch_back().context("failed to switch back")? {
        SwitchOutcome::Switched(name) => Ok(name),
        SwitchOutcome::NoPrevious | SwitchOutcome::UnknownContext(_) => Ok(NO_CONTEXT_FOUND.to_string()),
    }
}

pub fn current(contexts: &mut ContextConfig) -> anyhow::Result<String> {
    let current = contexts.current_context().context("failed to read state file")?;
    Ok(current.unwrap_or_else(|| NO_CONTEXT_FOUND.to_string()))
}
