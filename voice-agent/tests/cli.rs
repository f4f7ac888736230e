use async_trait::async_trait;
use clap::Parser;
use futures::stream;
use std::sync::Arc;
use std::time::Duration;
use tts::{
    ByteStream, ClientError, ConnectOptions, FishSpeech, FishSpeechOptions, FishSpeechRequest,
    SynthesisClient,
};
use voice_agent::{Cli, Command, synthesize, write_wav};

/// Half a frame of audio per word.
struct HalfFramePerWord;

#[async_trait]
impl SynthesisClient for HalfFramePerWord {
    async fn tts(&self, request: &FishSpeechRequest) -> Result<ByteStream, ClientError> {
        let words = request.text.split_whitespace().count();
        let bytes = 7i16.to_le_bytes().repeat(words * 2_205);
        Ok(Box::pin(stream::iter(vec![Ok(bytes)])))
    }
}

#[test]
fn parses_synth_options() {
    let cli = Cli::try_parse_from([
        "voice-agent",
        "synth",
        "--text",
        "Hello.",
        "--stream",
        "--reference-id",
        "anna",
        "--temperature",
        "0.3",
        "--timeout-secs",
        "3",
        "--fish-speech-url",
        "http://tts:8080",
    ])
    .unwrap();
    let Command::Synth(args) = cli.command else {
        panic!("expected synth");
    };
    assert!(args.stream);
    assert!(!args.normalize);
    assert_eq!(args.fish.fish_speech_url, "http://tts:8080");
    let options = args.fish.options();
    assert_eq!(options.reference_id.as_deref(), Some("anna"));
    assert_eq!(options.temperature, 0.3);
    assert_eq!(options.max_new_tokens, 1024);
    assert_eq!(args.fish.connect_options().timeout, Duration::from_secs(3));
}

#[test]
fn parses_normalize() {
    let cli = Cli::try_parse_from(["voice-agent", "normalize", "--text", "2 кг."]).unwrap();
    let Command::Normalize(args) = cli.command else {
        panic!("expected normalize");
    };
    assert_eq!(args.text, "2 кг.");
}

#[tokio::test]
async fn chunked_and_streamed_cover_the_same_audio() {
    let tts = FishSpeech::with_client(Arc::new(HalfFramePerWord), FishSpeechOptions::default());
    let text = "One two. Three four five six.";

    let chunked = synthesize(&tts, text, false, ConnectOptions::default()).await.unwrap();
    let streamed = synthesize(&tts, text, true, ConnectOptions::default()).await.unwrap();

    let samples = |frames: &[tts::SynthesizedAudio]| -> usize {
        frames.iter().map(|a| a.frame.data.len()).sum()
    };
    assert_eq!(samples(&chunked), 6 * 2_205);
    assert_eq!(samples(&streamed), 6 * 2_205);
    assert!(chunked.iter().all(|a| !a.is_final));
    assert_eq!(streamed.iter().filter(|a| a.is_final).count(), 2);
}

#[tokio::test]
async fn writes_playable_wav() {
    let tts = FishSpeech::with_client(Arc::new(HalfFramePerWord), FishSpeechOptions::default());
    let frames = synthesize(&tts, "a b c", false, ConnectOptions::default()).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.wav");
    write_wav(&path, &frames, 44_100, 1).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, 44_100);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len() as usize, 3 * 2_205);
}

#[test]
fn channel_count_out_of_range_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.wav");
    assert!(write_wav(&path, &[], 44_100, 70_000).is_err());
    assert!(!path.exists());
}
