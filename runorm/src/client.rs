//! Remote RuNorm client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{NormalizeError, Result};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuNormRequest {
    pub session_id: u64,
    pub text: String,
}

/// Remote normalization backend.
#[async_trait]
pub trait NormalizeClient: Send + Sync {
    async fn preprocess(&self, request: &RuNormRequest) -> Result<String>;

    /// Release any resources held for the service. Called once at teardown.
    fn close(&self) {}
}

/// Client for a RuNorm HTTP server.
pub struct HttpRuNormClient {
    endpoint: String,
    client_id: String,
    client: reqwest::Client,
}

impl HttpRuNormClient {
    pub fn new(endpoint: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client_id: client_id.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct PreprocessBody<'a> {
    client_id: &'a str,
    #[serde(flatten)]
    request: &'a RuNormRequest,
}

#[derive(Deserialize)]
struct PreprocessResponse {
    text: String,
}

impl From<reqwest::Error> for NormalizeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NormalizeError::Timeout
        } else {
            NormalizeError::Connection(e.to_string())
        }
    }
}

#[async_trait]
impl NormalizeClient for HttpRuNormClient {
    async fn preprocess(&self, request: &RuNormRequest) -> Result<String> {
        let url = format!("{}/v1/preprocess", self.endpoint.trim_end_matches('/'));
        debug!(%url, session_id = request.session_id, "requesting normalization");
        let body = PreprocessBody {
            client_id: &self.client_id,
            request,
        };
        let resp: PreprocessResponse = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.text)
    }
}
