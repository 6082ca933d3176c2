use std::env;

use serde::{Deserialize, Serialize};

fn default_show_token_ids() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Print `[id]` before each word so it can be toggled
    #[serde(default = "default_show_token_ids")]
    pub show_token_ids: bool,
    /// Force ANSI styling on or off; detected from the terminal when unset
    #[serde(default)]
    pub color: Option<bool>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_token_ids: default_show_token_ids(),
            color: None,
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        let show_token_ids = env::var("SHOW_TOKEN_IDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_show_token_ids);

        Self {
            show_token_ids,
            color: None,
        }
    }
}
