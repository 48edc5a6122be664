//! HttpTutorBackend - REST client for the tutor backend.
//!
//! Talks to `POST /api/chat` and `POST /api/get_questions` with JSON bodies.
//! Configuration comes from the `[backend]` section of config.toml.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tutor_core::backend::{ChatReply, ChatRequest, QuestionReply, QuestionRequest, TutorBackend};
use tutor_core::config::BackendConfig;
use tutor_core::error::{Result, TutorError};

const CHAT_PATH: &str = "/api/chat";
const QUESTIONS_PATH: &str = "/api/get_questions";

/// Backend implementation that talks to the tutor HTTP API.
#[derive(Clone, Debug)]
pub struct HttpTutorBackend {
    client: Client,
    base_url: String,
}

impl HttpTutorBackend {
    /// Creates a backend for the given base URL with the default client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Builds a backend from configuration, applying the request timeout.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| TutorError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(config.base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Posts `body` and decodes the reply.
    ///
    /// The HTTP status is not decisive: an error status whose body still
    /// decodes is returned as-is, and the `success` flag inside it decides.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url.as_str())
            .json(body)
            .send()
            .await
            .map_err(|err| TutorError::transport(format!("Request to {url} failed: {err}")))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| TutorError::transport(format!("Failed to read response from {url}: {err}")))?;

        serde_json::from_str::<R>(&body_text).map_err(|err| map_decode_error(status, &url, err))
    }
}

#[async_trait]
impl TutorBackend for HttpTutorBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.post_json(CHAT_PATH, request).await
    }

    async fn get_question(&self, request: &QuestionRequest) -> Result<QuestionReply> {
        self.post_json(QUESTIONS_PATH, request).await
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn map_decode_error(status: StatusCode, url: &str, err: serde_json::Error) -> TutorError {
    if status.is_success() {
        TutorError::transport(format!("Invalid JSON from {url}: {err}"))
    } else {
        TutorError::transport(format!("{url} returned {status} without a JSON body"))
    }
}
