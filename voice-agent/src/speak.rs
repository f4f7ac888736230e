use anyhow::Result;
use futures::StreamExt;
use std::path::Path;
use tts::{ConnectOptions, SynthesizedAudio, Tts};

/// Synthesize `text` in one call, or sentence by sentence when `stream` is set.
pub async fn synthesize(
    tts: &dyn Tts,
    text: &str,
    stream: bool,
    conn_options: ConnectOptions,
) -> tts::Result<Vec<SynthesizedAudio>> {
    if !stream {
        return tts.synthesize(text, conn_options)?.collect_frames().await;
    }
    let mut pipeline = tts.stream(conn_options)?;
    pipeline.push_text(text)?;
    pipeline.end_input();
    let mut frames = Vec::new();
    while let Some(audio) = pipeline.next().await {
        frames.push(audio?);
    }
    Ok(frames)
}

/// Write the frames as one 16-bit PCM WAV file.
pub fn write_wav(
    path: &Path,
    frames: &[SynthesizedAudio],
    sample_rate: u32,
    channels: u32,
) -> Result<()> {
    let spec = hound::WavSpec {
        channels: u16::try_from(channels)?,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for audio in frames {
        for &sample in &audio.frame.data {
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()?;
    Ok(())
}
