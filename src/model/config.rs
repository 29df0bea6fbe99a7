use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from tick.toml. Every field is optional; missing keys
/// keep their defaults so a partial file is fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub toasts: ToastConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Theme slot overrides as hex strings, e.g. `accent = "#7aa2f7"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    /// How long a toast stays visible
    #[serde(default = "default_toast_duration")]
    pub duration_ms: u64,
    /// Visible toasts beyond this evict the oldest
    #[serde(default = "default_toast_cap")]
    pub max_visible: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        ToastConfig {
            duration_ms: 3000,
            max_visible: 3,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_toast_duration() -> u64 {
    3000
}

fn default_toast_cap() -> usize {
    3
}
