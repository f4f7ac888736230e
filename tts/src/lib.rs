//! Fish Speech text-to-speech for the voice agent.
//!
//! [`FishSpeech`] implements the [`Tts`] contract on top of a remote
//! [`SynthesisClient`]. Single calls return a [`ChunkedStream`] of 100 ms
//! [`AudioFrame`]s; [`SynthesizeStream`] turns live text into sentences and
//! synthesizes them one after another.

pub mod audio;
pub mod chunked;
pub mod client;
pub mod error;
pub mod fish_speech;
pub mod stream;
pub mod traits;

pub use audio::{AudioByteStream, AudioFrame, NUM_CHANNELS, SAMPLE_RATE};
pub use chunked::{AudioStream, ChunkedStream};
pub use client::{
    ByteStream, ClientError, FishSpeechRequest, HttpFishSpeechClient, SynthesisClient,
};
pub use error::{Result, TtsError};
pub use fish_speech::{FishSpeech, FishSpeechOptions};
pub use stream::SynthesizeStream;
pub use traits::{ConnectOptions, SynthesizedAudio, Tts, TtsCapabilities};
