use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KtxError {
    #[error("failed to read from file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicated context name '{name}' in '{}'", path.display())]
    DuplicateContext { name: String, path: PathBuf },

    #[error("no context found with name '{name}' in '{}'", path.display())]
    ContextNotFound { name: String, path: PathBuf },

    #[error("failed to write file '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize content for '{}'", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to read state file '{}'", path.display())]
    StateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse state file '{}'", path.display())]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl KtxError {
    /// True when the error reports an identity that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ContextNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, KtxError>;
