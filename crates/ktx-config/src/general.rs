use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
    #[serde(alias = "filter-prompt")]
    pub filter_prompt: String,
    #[serde(alias = "tick-rate-ms")]
    pub tick_rate_ms: u64,
    #[serde(alias = "status-message-secs")]
    pub status_message_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Kube Contexts".into(),
            filter_prompt: "Filter: ".into(),
            tick_rate_ms: 250,
            status_message_secs: 10,
        }
    }
}
