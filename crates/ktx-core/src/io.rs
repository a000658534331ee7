use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{KtxError, Result};

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if let Some(rest) = path.to_str().and_then(|p| p.strip_prefix("~/")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Serialize `value` and overwrite the file at `path` with it.
pub(crate) fn write_yaml<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let data =
        serde_yaml::to_string(value).map_err(|source| KtxError::Serialize { path: path.to_path_buf(), source })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| KtxError::Write { path: path.to_path_buf(), source })?;
    }
    std::fs::write(path, data).map_err(|source| KtxError::Write { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "persisted");
    Ok(())
}
