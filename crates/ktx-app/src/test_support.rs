use std::path::PathBuf;

use tempfile::TempDir;

use crate::bootstrap::{self, Loaded};

pub const ONE: &str = r#"
apiVersion: v1
kind: Config
contexts:
  - name: prod
    context: {cluster: one, user: one}
  - name: dev
    context: {cluster: one, user: one}
current-context: prod
"#;

pub const TWO: &str = r#"
apiVersion: v1
kind: Config
contexts:
  - name: staging
    context: {cluster: two, user: two}
  - name: lab
    context: {cluster: two, user: two}
current-context: lab
"#;

/// Temp dir with two kubeconfigs, `kube.one` and `kube.two`.
pub struct KubeDir {
    dir: TempDir,
}

impl KubeDir {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("kube.one"), ONE).unwrap();
        std::fs::write(dir.path().join("kube.two"), TWO).unwrap();
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn load(&self) -> Loaded {
        bootstrap::load_from_dir(&self.path("cfg"), &[self.path("kube.one"), self.path("kube.two")]).unwrap()
    }

    pub fn current_context(&self, name: &str) -> String {
        ktx_core::KubeConfig::load(self.path(name)).unwrap().current_context
    }
}
