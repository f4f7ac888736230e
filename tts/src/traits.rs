use async_trait::async_trait;
use std::time::Duration;

use crate::audio::AudioFrame;
use crate::chunked::ChunkedStream;
use crate::stream::SynthesizeStream;
use crate::{Result, TtsError};

/// Features a synthesizer declares to its host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TtsCapabilities {
    /// Accepts incremental text through [`Tts::stream`].
    pub streaming: bool,
}

/// Per-call connection budget supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Longest wait for the remote stream to open or to deliver the next block.
    pub timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

/// One frame of synthesized speech.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesizedAudio {
    pub request_id: String,
    pub frame: AudioFrame,
    /// Set on the last frame of an utterance.
    pub is_final: bool,
}

impl SynthesizedAudio {
    pub fn new(request_id: impl Into<String>, frame: AudioFrame) -> Self {
        Self {
            request_id: request_id.into(),
            frame,
            is_final: false,
        }
    }
}

/// Text-to-speech engine as seen by the voice agent.
#[async_trait]
pub trait Tts: Send + Sync {
    fn capabilities(&self) -> TtsCapabilities;

    fn sample_rate(&self) -> u32;

    fn num_channels(&self) -> u32;

    /// Synthesize `text` in one call. Nothing is sent until the result is polled.
    fn synthesize(&self, text: &str, conn_options: ConnectOptions) -> Result<ChunkedStream>;

    /// Open a pipeline that accepts text incrementally.
    fn stream(&self, conn_options: ConnectOptions) -> Result<SynthesizeStream> {
        let _ = conn_options;
        Err(TtsError::StreamingUnsupported)
    }

    /// Release the engine. Safe to call more than once.
    async fn aclose(&self);
}
