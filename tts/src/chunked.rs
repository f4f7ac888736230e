//! One-shot synthesis results.

use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::{Result, SynthesizedAudio};

/// Boxed stream of synthesized frames.
pub type AudioStream = Pin<Box<dyn Stream<Item = Result<SynthesizedAudio>> + Send>>;

/// Audio for a single piece of text.
///
/// The stream is lazy: the remote call starts on the first poll. Every frame
/// carries the same request id. An error ends the stream.
pub struct ChunkedStream {
    input_text: String,
    inner: AudioStream,
}

impl ChunkedStream {
    pub fn new(input_text: impl Into<String>, inner: AudioStream) -> Self {
        Self {
            input_text: input_text.into(),
            inner,
        }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Drain the stream, stopping at the first error.
    pub async fn collect_frames(mut self) -> Result<Vec<SynthesizedAudio>> {
        let mut frames = Vec::new();
        while let Some(audio) = self.inner.next().await {
            frames.push(audio?);
        }
        Ok(frames)
    }
}

impl Stream for ChunkedStream {
    type Item = Result<SynthesizedAudio>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
