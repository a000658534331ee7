use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub accent: String,
    pub fg: String,
    #[serde(alias = "title-fg")]
    pub title_fg: String,
    #[serde(alias = "title-bg")]
    pub title_bg: String,
    #[serde(alias = "selection-fg")]
    pub selection_fg: String,
    #[serde(alias = "selection-bg")]
    pub selection_bg: String,
    #[serde(alias = "text-dim")]
    pub text_dim: String,
    pub description: String,
    pub status: String,
    pub error: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#00aaa0".into(),
            fg: "#dddada".into(),
            title_fg: "#fffdf5".into(),
            title_bg: "#00aaa0".into(),
            selection_fg: "#ee6ff8".into(),
            selection_bg: "default".into(),
            text_dim: "#777777".into(),
            description: "#a49fa5".into(),
            status: "#ffacac".into(),
            error: "#ff0000".into(),
        }
    }
}
