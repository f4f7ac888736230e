//! Command line and environment configuration.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tts::{ConnectOptions, FishSpeechOptions};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize text into a WAV file
    Synth(SynthArgs),
    /// Print the normalized form of text
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Text to speak
    #[arg(long)]
    pub text: String,
    /// Output WAV file
    #[arg(long, default_value = "out.wav")]
    pub out: PathBuf,
    /// Split the text into sentences and synthesize them one by one
    #[arg(long)]
    pub stream: bool,
    /// Run the text through RuNorm first
    #[arg(long)]
    pub normalize: bool,
    #[command(flatten)]
    pub fish: FishSpeechArgs,
    #[command(flatten)]
    pub runorm: RuNormArgs,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(long)]
    pub text: String,
    #[command(flatten)]
    pub runorm: RuNormArgs,
}

#[derive(Args, Debug)]
pub struct RuNormArgs {
    /// Base URL of the RuNorm server
    #[arg(long, env = "RUNORM_URL", default_value = "http://localhost:8081")]
    pub runorm_url: String,
}

#[derive(Args, Debug)]
pub struct FishSpeechArgs {
    /// Base URL of the Fish Speech server
    #[arg(long, env = "FISH_SPEECH_URL", default_value = "http://localhost:8080")]
    pub fish_speech_url: String,
    /// Reference voice
    #[arg(long, env = "FISH_SPEECH_REFERENCE_ID")]
    pub reference_id: Option<String>,
    #[arg(long, env = "FISH_SPEECH_SEED")]
    pub seed: Option<i64>,
    #[arg(long, default_value_t = 1024)]
    pub max_new_tokens: u32,
    #[arg(long, default_value_t = 0.9)]
    pub top_p: f32,
    #[arg(long, default_value_t = 0.6)]
    pub temperature: f32,
    #[arg(long, default_value_t = 1.2)]
    pub repetition_penalty: f32,
    /// Seconds to wait for the server to open or continue a stream
    #[arg(long, env = "FISH_SPEECH_TIMEOUT", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl FishSpeechArgs {
    pub fn options(&self) -> FishSpeechOptions {
        FishSpeechOptions {
            reference_id: self.reference_id.clone(),
            seed: self.seed,
            max_new_tokens: self.max_new_tokens,
            top_p: self.top_p,
            temperature: self.temperature,
            repetition_penalty: self.repetition_penalty,
            streaming: true,
        }
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
