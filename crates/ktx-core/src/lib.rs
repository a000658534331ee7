pub mod aggregate;
pub mod error;
pub mod io;
pub mod kubeconfig;
pub mod projection;
pub mod state;

pub use aggregate::{
    ConfigDocument, ContextConfig, ContextItem, KubeConfigBinding, KubeConfigEntry, Resolved, StateSettings,
    SwitchOutcome, STATE_FILE,
};
pub use error::{KtxError, Result};
pub use io::expand_home;
pub use kubeconfig::{ContextSpec, KubeConfig, NamedContext};
pub use projection::{ContextProjection, ContextRecord};
pub use state::{State, StateStore};
