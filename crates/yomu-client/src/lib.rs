mod client;

pub use client::AnalyzeClient;

use yomu_types::{PageResult, Source};

/// One page worth of text to analyze
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub source: Source,
    /// Character offset of the first character of the page
    pub start_position: usize,
    pub page_size: usize,
}

impl AnalyzeRequest {
    pub fn for_page(source: Source, page_index: usize, page_size: usize) -> Self {
        Self {
            source,
            start_position: page_index * page_size,
            page_size,
        }
    }
}

/// Text analysis provider interface
#[async_trait::async_trait]
pub trait AnalyzeBackend: Send + Sync {
    /// Tokenize one page of the source and annotate its words
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<PageResult, AnalyzeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Request cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Request timed out")]
    Timeout,
}

impl AnalyzeError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnalyzeError::Cancelled)
    }
}
