use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use yomu_types::{PageResult, Source};

use crate::{AnalyzeBackend, AnalyzeError, AnalyzeRequest};

/// HTTP client for the analyzer's `POST /analyze` endpoint
#[derive(Clone)]
pub struct AnalyzeClient {
    client: reqwest::Client,
    url: String,
}

impl AnalyzeClient {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn with_timeout(url: String, timeout: Option<Duration>) -> Result<Self, AnalyzeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Uploaded files go out as multipart, presets as a JSON body
    fn build(&self, request: &AnalyzeRequest) -> reqwest::RequestBuilder {
        match &request.source {
            Source::UploadedFile { name, content } => {
                let file = Part::bytes(content.to_vec()).file_name(name.clone());
                let form = Form::new()
                    .part("file", file)
                    .text("start_position", request.start_position.to_string())
                    .text("page_size", request.page_size.to_string())
                    .text("filepath", name.clone());

                self.client.post(&self.url).multipart(form)
            }
            Source::PresetBook { id } => self.client.post(&self.url).json(&PresetBody {
                filepath: id,
                start_position: request.start_position,
                page_size: request.page_size,
            }),
        }
    }
}

#[async_trait]
impl AnalyzeBackend for AnalyzeClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<PageResult, AnalyzeError> {
        tracing::debug!(
            "POST {} filepath={} start_position={} page_size={}",
            self.url,
            request.source.display_name(),
            request.start_position,
            request.page_size
        );

        let response = self.build(request).send().await.map_err(classify)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify)?;

        if !status.is_success() {
            return Err(AnalyzeError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| AnalyzeError::Decode(e.to_string()))
    }
}

#[derive(Serialize)]
struct PresetBody<'a> {
    filepath: &'a str,
    start_position: usize,
    page_size: usize,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn classify(e: reqwest::Error) -> AnalyzeError {
    if e.is_timeout() {
        AnalyzeError::Timeout
    } else {
        AnalyzeError::Network(e)
    }
}

/// The analyzer reports failures as `{"error": "..."}`; fall back to the raw body
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}
