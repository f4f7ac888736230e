//! Text normalization through a remote RuNorm service.
//!
//! [`RuNorm`] spells out numbers, abbreviations and the like before text is
//! handed to the synthesizer. The network side lives behind
//! [`NormalizeClient`].

pub mod client;

use common::ClientHandle;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub use client::{HttpRuNormClient, NormalizeClient, RuNormRequest};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("normalizer is closed")]
    Closed,
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Callable text normalizer.
pub struct RuNorm {
    client: ClientHandle<dyn NormalizeClient>,
    session_id: AtomicU64,
}

impl RuNorm {
    /// Connect to the RuNorm server at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = HttpRuNormClient::new(endpoint, common::client_id());
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn NormalizeClient>) -> Self {
        Self {
            client: ClientHandle::new("RuNorm", client),
            session_id: AtomicU64::new(0),
        }
    }

    /// Normalize `text`. A single trailing period is dropped first, which the
    /// model handles better.
    pub async fn normalize(&self, text: &str) -> Result<String> {
        let client = self.client.get().ok_or(NormalizeError::Closed)?;
        let session_id = self.session_id.fetch_add(1, Ordering::SeqCst) + 1;
        let request = RuNormRequest {
            session_id,
            text: strip_trailing_period(text).to_string(),
        };
        debug!(session_id, "normalizing text");
        client.preprocess(&request).await
    }

    /// Release the client. Safe to call more than once.
    pub fn close(&self) {
        if let Some(client) = self.client.take() {
            client.close();
            info!("runorm closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_closed()
    }
}

fn strip_trailing_period(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}
