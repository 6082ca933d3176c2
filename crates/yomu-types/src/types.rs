use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Text being read. Exactly one source is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Local file whose bytes are uploaded with every page request
    UploadedFile { name: String, content: Arc<[u8]> },
    /// Book the server already knows, addressed by file name
    PresetBook { id: String },
}

impl Source {
    pub fn file(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Source::UploadedFile {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn preset(id: impl Into<String>) -> Self {
        Source::PresetBook { id: id.into() }
    }

    /// Name sent to the backend as `filepath`
    pub fn display_name(&self) -> &str {
        match self {
            Source::UploadedFile { name, .. } => name,
            Source::PresetBook { id } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Word,
    #[default]
    #[serde(other)]
    Text,
}

/// One morpheme as returned by the analyzer.
///
/// `show_furigana` and `show_translation` are client-side display flags. They
/// are never read from the wire, so every freshly fetched token starts hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type", default)]
    pub kind: TokenKind,
    #[serde(default)]
    pub kanji: String,
    #[serde(default)]
    pub furigana: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "showFurigana", default, skip_deserializing)]
    pub show_furigana: bool,
    #[serde(rename = "showTranslation", default, skip_deserializing)]
    pub show_translation: bool,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// Cycle the overlays: hidden -> furigana + translation -> hidden.
    pub fn toggle(&mut self) {
        let both_shown = self.show_furigana && self.show_translation;
        self.show_translation = !self.show_translation;
        self.show_furigana = !both_shown;
    }
}

pub type Paragraph = Vec<Token>;

/// One page of analyzed text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    #[serde(rename = "data", default)]
    pub paragraphs: Vec<Paragraph>,
    /// Character count of the whole source, not of this page
    #[serde(rename = "totalLength", default)]
    pub total_length: usize,
}

impl PageResult {
    pub fn token_mut(&mut self, id: u64) -> Option<&mut Token> {
        self.paragraphs
            .iter_mut()
            .flat_map(|p| p.iter_mut())
            .find(|t| t.id == Some(id))
    }

    pub fn word_count(&self) -> usize {
        self.paragraphs
            .iter()
            .flatten()
            .filter(|t| t.is_word())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub label: String,
}

impl Preset {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// User input forwarded from the front-end to the reader loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderCommand {
    OpenFile(PathBuf),
    /// Preset by list position (1-based) or by id
    Preset(String),
    ListPresets,
    NextPage,
    PrevPage,
    Toggle(u64),
    Cancel,
    Reset,
    ShowPage,
    Help,
    Quit,
}
