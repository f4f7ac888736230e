//! Remote Fish Speech synthesis client.
//!
//! [`SynthesisClient`] is the seam between the adapter and the network. The
//! [`HttpFishSpeechClient`] implementation posts the request as JSON and
//! streams back raw little-endian PCM.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::pin::Pin;
use thiserror::Error;
use tracing::{debug, info};

/// Stream of raw PCM byte blocks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, ClientError>> + Send>>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

/// One synthesis call as understood by the remote service.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FishSpeechRequest {
    pub session_id: u64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    pub max_new_tokens: u32,
    pub top_p: f32,
    pub temperature: f32,
    pub repetition_penalty: f32,
}

/// Remote synthesis backend.
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    /// Start synthesizing `request` and return the audio as it arrives.
    async fn tts(&self, request: &FishSpeechRequest) -> Result<ByteStream, ClientError>;

    /// Release any resources held for the service. Called once at teardown.
    fn close(&self) {}
}

/// Client for a Fish Speech HTTP server.
pub struct HttpFishSpeechClient {
    endpoint: String,
    client_id: String,
    client: reqwest::Client,
}

impl HttpFishSpeechClient {
    /// Create a new client targeting `endpoint` (e.g. `http://localhost:8080`).
    pub fn new(endpoint: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client_id: client_id.into(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/v1/tts", self.endpoint.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct TtsBody<'a> {
    client_id: &'a str,
    #[serde(flatten)]
    request: &'a FishSpeechRequest,
    format: &'static str,
    streaming: bool,
}

#[async_trait]
impl SynthesisClient for HttpFishSpeechClient {
    async fn tts(&self, request: &FishSpeechRequest) -> Result<ByteStream, ClientError> {
        let url = self.url();
        debug!(%url, session_id = request.session_id, "requesting synthesis");
        let body = TtsBody {
            client_id: &self.client_id,
            request,
            format: "pcm",
            streaming: true,
        };
        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let stream = resp
            .bytes_stream()
            .map(|b| b.map(|bytes| bytes.to_vec()).map_err(ClientError::from));
        Ok(Box::pin(stream))
    }

    fn close(&self) {
        info!(client_id = %self.client_id, "fish speech client closed");
    }
}
