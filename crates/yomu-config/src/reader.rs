use std::env;

use serde::{Deserialize, Serialize};
use yomu_types::Preset;

fn default_page_size() -> usize {
    1000
}

fn default_prefetch_pages() -> usize {
    2
}

fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new(
            "wagahaiwa_nekodearu.txt",
            "Wagahai Wa Neko De Aru (difficult)",
        ),
        Preset::new("momotaro.txt", "Momotaro (easy)"),
        Preset::new("Book3.txt", "Book 3"),
    ]
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ReaderConfig {
    /// Nominal page length in characters
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// How many pages ahead of the current one are fetched in the background
    #[serde(default = "default_prefetch_pages")]
    pub prefetch_pages: usize,
    #[serde(default = "default_presets")]
    pub presets: Vec<Preset>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            prefetch_pages: default_prefetch_pages(),
            presets: default_presets(),
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        let page_size = env::var("PAGE_SIZE_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or_else(default_page_size);

        let prefetch_pages = env::var("PREFETCH_PAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_prefetch_pages);

        Self {
            page_size,
            prefetch_pages,
            presets: default_presets(),
        }
    }

    /// Resolve a preset by 1-based list position or by id
    pub fn find_preset(&self, key: &str) -> Option<&Preset> {
        if let Ok(n) = key.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.presets.get(i));
        }
        self.presets.iter().find(|p| p.id == key)
    }
}
