//! Incremental synthesis driven by live text input.
//!
//! A [`SynthesizeStream`] runs two stages on one task. The forwarding stage
//! feeds caller text into a sentence stream; the synthesis stage takes one
//! sentence at a time, synthesizes it through [`Tts::synthesize`] and relays
//! the frames, marking the last frame of each sentence as final. Sentences
//! are synthesized strictly in order, one after another.

use futures::{Stream, StreamExt};
use lingproc::sentence_stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::traits::{ConnectOptions, SynthesizedAudio, Tts};
use crate::{Result, TtsError};

enum Input {
    Text(String),
    Flush,
}

type EventSender = mpsc::UnboundedSender<Result<SynthesizedAudio>>;

/// Live text in, live audio out.
///
/// Text pushed with [`push_text`](Self::push_text) is batched into sentences;
/// [`flush`](Self::flush) forces out the sentence in progress. Audio arrives by
/// polling the stream. A failure is delivered as the last item.
pub struct SynthesizeStream {
    input: Option<mpsc::UnboundedSender<Input>>,
    events: mpsc::UnboundedReceiver<Result<SynthesizedAudio>>,
    task: Option<JoinHandle<()>>,
}

impl SynthesizeStream {
    /// Start a pipeline that synthesizes each sentence with `tts`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(tts: Arc<dyn Tts>, conn_options: ConnectOptions) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (event_tx, events) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            match run(tts, conn_options, input_rx, &event_tx).await {
                Ok(()) => debug!("synthesis stream finished"),
                Err(_) if event_tx.is_closed() => debug!("synthesis stream abandoned"),
                Err(e) => {
                    warn!(error = %e, "synthesis stream failed");
                    let _ = event_tx.send(Err(e));
                }
            }
        });
        Self {
            input: Some(input_tx),
            events,
            task: Some(task),
        }
    }

    pub fn push_text(&self, text: impl Into<String>) -> Result<()> {
        self.send(Input::Text(text.into()))
    }

    /// Synthesize the buffered text now, even without sentence punctuation.
    pub fn flush(&self) -> Result<()> {
        self.send(Input::Flush)
    }

    /// Signal that no more text will follow. Remaining text is synthesized.
    pub fn end_input(&mut self) {
        self.input.take();
    }

    fn send(&self, input: Input) -> Result<()> {
        let tx = self.input.as_ref().ok_or(TtsError::InputEnded)?;
        tx.send(input).map_err(|_| TtsError::InputEnded)
    }

    /// Cancel the pipeline. Both stages have stopped when this returns.
    pub async fn aclose(mut self) {
        self.input.take();
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        debug!("synthesis stream closed");
    }
}

impl Stream for SynthesizeStream {
    type Item = Result<SynthesizedAudio>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for SynthesizeStream {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

async fn run(
    tts: Arc<dyn Tts>,
    conn_options: ConnectOptions,
    mut input: mpsc::UnboundedReceiver<Input>,
    events: &EventSender,
) -> Result<()> {
    let (mut sink, mut sentences) = sentence_stream();

    let forward = async move {
        while let Some(item) = input.recv().await {
            match item {
                Input::Text(text) => sink.push_text(&text),
                Input::Flush => sink.flush(),
            }
        }
        sink.end_input();
        Ok::<(), TtsError>(())
    };

    let synthesize = async {
        while let Some(sentence) = sentences.next().await {
            debug!(%sentence, "synthesizing sentence");
            let mut audio = tts.synthesize(&sentence, conn_options)?;
            // The last frame is only known once the sub-stream ends.
            let mut pending: Option<SynthesizedAudio> = None;
            while let Some(frame) = audio.next().await {
                if let Some(prev) = pending.replace(frame?) {
                    emit(events, prev)?;
                }
            }
            if let Some(mut last) = pending {
                last.is_final = true;
                emit(events, last)?;
            }
        }
        Ok::<(), TtsError>(())
    };

    tokio::try_join!(forward, synthesize)?;
    Ok(())
}

fn emit(events: &EventSender, audio: SynthesizedAudio) -> Result<()> {
    events.send(Ok(audio)).map_err(|_| TtsError::Closed)
}
