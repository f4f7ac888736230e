//! Stateful sentence segmenter.
//!
//! Wraps the `pragmatic_segmenter` crate. The trailing segment of the buffer
//! may still be growing, so it is held back until more text arrives or the
//! caller flushes.

use pragmatic_segmenter::Segmenter as PragmaticSegmenter;
use tracing::trace;

/// A stateful sentence segmenter.
///
/// Feed chunks using [`push_str`](Self::push_str) and collect the sentences it
/// returns. Call [`flush`](Self::flush) to force out the partial sentence.
pub struct SentenceSegmenter {
    leftover: String,
    inner: PragmaticSegmenter,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter {
    /// Create a new `SentenceSegmenter`.
    pub fn new() -> Self {
        Self {
            leftover: String::new(),
            inner: PragmaticSegmenter::new().expect("segmenter init"),
        }
    }

    /// Push a text chunk and return any completed sentences.
    ///
    /// ```
    /// use lingproc::SentenceSegmenter;
    ///
    /// let mut seg = SentenceSegmenter::new();
    /// assert!(seg.push_str("Hello world. How").len() == 1);
    /// assert_eq!(seg.flush().as_deref(), Some("How"));
    /// ```
    pub fn push_str(&mut self, chunk: &str) -> Vec<String> {
        self.leftover.push_str(chunk);
        let starts = self.sentence_starts();
        let Some((&last, _)) = starts.split_last() else {
            return Vec::new();
        };
        let sentences = starts
            .windows(2)
            .filter_map(|w| clean(self.leftover[w[0]..w[1]].to_string()))
            .collect();
        self.leftover.drain(..last);
        sentences
    }

    /// Byte offsets where each sentence of the buffer begins.
    ///
    /// The tokenizer may report a sentence more than once when the same text
    /// repeats, so a segment only counts if it continues where the previous
    /// one ended.
    fn sentence_starts(&self) -> Vec<usize> {
        let text = self.leftover.as_str();
        let mut starts = Vec::new();
        let mut pos = 0;
        for seg in self.inner.segment(text) {
            let seg = seg.trim();
            if seg.is_empty() {
                continue;
            }
            let rest = &text[pos..];
            let at = pos + (rest.len() - rest.trim_start().len());
            if !text[at..].starts_with(seg) {
                trace!(segment = seg, "skipping out-of-order segment");
                continue;
            }
            starts.push(if starts.is_empty() { 0 } else { at });
            pos = at + seg.len();
        }
        starts
    }

    /// Take the buffered text as a sentence, complete or not.
    pub fn flush(&mut self) -> Option<String> {
        clean(std::mem::take(&mut self.leftover))
    }

    /// Whether any non-whitespace text is buffered.
    pub fn is_empty(&self) -> bool {
        self.leftover.trim().is_empty()
    }
}

fn clean(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
