//! Channel-backed sentence stream.
//!
//! [`sentence_stream`] returns a [`SentenceSink`] that accepts text, flush
//! requests and end of input, and a [`SentenceStream`] that yields finished
//! sentences in input order. The stream terminates once the sink has ended
//! (or been dropped) and every buffered sentence has been read.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, trace};

use crate::SentenceSegmenter;

/// Create a connected sink/stream pair.
pub fn sentence_stream() -> (SentenceSink, SentenceStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        SentenceSink {
            segmenter: SentenceSegmenter::new(),
            tx,
        },
        SentenceStream {
            inner: UnboundedReceiverStream::new(rx),
        },
    )
}

/// Writing half of [`sentence_stream`].
pub struct SentenceSink {
    segmenter: SentenceSegmenter,
    tx: mpsc::UnboundedSender<String>,
}

impl SentenceSink {
    /// Append text; complete sentences are forwarded immediately.
    pub fn push_text(&mut self, text: &str) {
        for sentence in self.segmenter.push_str(text) {
            self.emit(sentence);
        }
    }

    /// Forward the partial sentence buffered so far, even without punctuation.
    pub fn flush(&mut self) {
        if let Some(sentence) = self.segmenter.flush() {
            debug!(len = sentence.len(), "flushing partial sentence");
            self.emit(sentence);
        }
    }

    /// Flush any remaining text and close the stream.
    pub fn end_input(mut self) {
        self.flush();
    }

    fn emit(&self, sentence: String) {
        trace!(%sentence, "sentence ready");
        if self.tx.send(sentence).is_err() {
            debug!("sentence stream dropped");
        }
    }
}

/// Reading half of [`sentence_stream`].
pub struct SentenceStream {
    inner: UnboundedReceiverStream<String>,
}

impl Stream for SentenceStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
