//! [`Tts`] adapter for a remote Fish Speech server.

use async_stream::try_stream;
use async_trait::async_trait;
use common::ClientHandle;
use futures::{Stream, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};
use uuid::Uuid;

use crate::audio::{AudioByteStream, NUM_CHANNELS, SAMPLE_RATE};
use crate::chunked::ChunkedStream;
use crate::client::{FishSpeechRequest, HttpFishSpeechClient, SynthesisClient};
use crate::stream::SynthesizeStream;
use crate::traits::{ConnectOptions, SynthesizedAudio, Tts, TtsCapabilities};
use crate::{Result, TtsError};

/// Default sampling parameters sent with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct FishSpeechOptions {
    pub reference_id: Option<String>,
    pub seed: Option<i64>,
    pub max_new_tokens: u32,
    pub top_p: f32,
    pub temperature: f32,
    pub repetition_penalty: f32,
    /// Declare support for [`Tts::stream`].
    pub streaming: bool,
}

impl Default for FishSpeechOptions {
    fn default() -> Self {
        Self {
            reference_id: None,
            seed: None,
            max_new_tokens: 1024,
            top_p: 0.9,
            temperature: 0.6,
            repetition_penalty: 1.2,
            streaming: true,
        }
    }
}

/// Synthesis session backed by Fish Speech.
///
/// Clones share the client and the session counter.
#[derive(Clone)]
pub struct FishSpeech {
    inner: Arc<Inner>,
}

struct Inner {
    client: ClientHandle<dyn SynthesisClient>,
    template: FishSpeechRequest,
    session_id: AtomicU64,
    capabilities: TtsCapabilities,
}

impl FishSpeech {
    /// Connect to the Fish Speech server at `endpoint`.
    pub fn new(endpoint: impl Into<String>, options: FishSpeechOptions) -> Self {
        let client = HttpFishSpeechClient::new(endpoint, common::client_id());
        Self::with_client(Arc::new(client), options)
    }

    pub fn with_client(client: Arc<dyn SynthesisClient>, options: FishSpeechOptions) -> Self {
        let template = FishSpeechRequest {
            session_id: 0,
            text: String::new(),
            reference_id: options.reference_id,
            seed: options.seed,
            max_new_tokens: options.max_new_tokens,
            top_p: options.top_p,
            temperature: options.temperature,
            repetition_penalty: options.repetition_penalty,
        };
        Self {
            inner: Arc::new(Inner {
                client: ClientHandle::new("FishSpeech", client),
                template,
                session_id: AtomicU64::new(0),
                capabilities: TtsCapabilities {
                    streaming: options.streaming,
                },
            }),
        }
    }

    fn make_request(&self, text: &str) -> FishSpeechRequest {
        let session_id = self.inner.session_id.fetch_add(1, Ordering::SeqCst) + 1;
        FishSpeechRequest {
            session_id,
            text: text.to_string(),
            ..self.inner.template.clone()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.client.is_closed()
    }
}

#[async_trait]
impl Tts for FishSpeech {
    fn capabilities(&self) -> TtsCapabilities {
        self.inner.capabilities
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn num_channels(&self) -> u32 {
        NUM_CHANNELS
    }

    fn synthesize(&self, text: &str, conn_options: ConnectOptions) -> Result<ChunkedStream> {
        let client = self.inner.client.get().ok_or(TtsError::Closed)?;
        let request = self.make_request(text);
        let audio = synthesize_request(client, request, conn_options);
        Ok(ChunkedStream::new(text, Box::pin(audio)))
    }

    fn stream(&self, conn_options: ConnectOptions) -> Result<SynthesizeStream> {
        if !self.inner.capabilities.streaming {
            return Err(TtsError::StreamingUnsupported);
        }
        if self.is_closed() {
            return Err(TtsError::Closed);
        }
        Ok(SynthesizeStream::spawn(Arc::new(self.clone()), conn_options))
    }

    async fn aclose(&self) {
        if let Some(client) = self.inner.client.take() {
            client.close();
            info!("fish speech session closed");
        }
    }
}

fn request_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}

/// Run one remote call and cut its bytes into frames as they arrive.
fn synthesize_request(
    client: Arc<dyn SynthesisClient>,
    request: FishSpeechRequest,
    conn_options: ConnectOptions,
) -> impl Stream<Item = Result<SynthesizedAudio>> + Send {
    try_stream! {
        let request_id = request_id();
        let mut bstream = AudioByteStream::new(SAMPLE_RATE, NUM_CHANNELS);
        debug!(session_id = request.session_id, %request_id, "synthesis started");

        let mut bytes = timeout(conn_options.timeout, client.tts(&request))
            .await
            .map_err(|_| TtsError::Timeout)??;
        let mut frames = 0usize;
        while let Some(chunk) = timeout(conn_options.timeout, bytes.next())
            .await
            .map_err(|_| TtsError::Timeout)?
        {
            for frame in bstream.write(&chunk?) {
                frames += 1;
                yield SynthesizedAudio::new(request_id.as_str(), frame);
            }
        }
        for frame in bstream.flush() {
            frames += 1;
            yield SynthesizedAudio::new(request_id.as_str(), frame);
        }
        debug!(session_id = request.session_id, %request_id, frames, "synthesis finished");
    }
}
