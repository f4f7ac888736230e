//! Linguistic processing utilities.
//!
//! This crate splits incrementally arriving text into sentences. The
//! [`SentenceSegmenter`] does the buffering; [`sentence_stream`] wraps it in a
//! writer/reader pair so one task can push text while another consumes
//! finished sentences.

pub mod segmenter;
pub mod stream;

pub use crate::segmenter::*;
pub use crate::stream::*;
