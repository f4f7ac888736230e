use anyhow::Result;
use runorm::RuNorm;
use std::time::Duration;
use tracing::info;
use tts::{FishSpeech, Tts};

use crate::config::{NormalizeArgs, SynthArgs};
use crate::speak::{synthesize, write_wav};

pub async fn run_synth(args: SynthArgs) -> Result<()> {
    let text = if args.normalize {
        normalize(&args.runorm.runorm_url, &args.text).await?
    } else {
        args.text.clone()
    };

    let tts = FishSpeech::new(&args.fish.fish_speech_url, args.fish.options());
    let result = synthesize(&tts, &text, args.stream, args.fish.connect_options()).await;
    tts.aclose().await;
    let frames = result?;

    write_wav(&args.out, &frames, tts.sample_rate(), tts.num_channels())?;
    let duration: Duration = frames.iter().map(|a| a.frame.duration()).sum();
    info!(
        out = %args.out.display(),
        frames = frames.len(),
        seconds = duration.as_secs_f32(),
        "audio written"
    );
    Ok(())
}

pub async fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let text = normalize(&args.runorm.runorm_url, &args.text).await?;
    println!("{text}");
    Ok(())
}

async fn normalize(url: &str, text: &str) -> Result<String> {
    let norm = RuNorm::new(url);
    let result = norm.normalize(text).await;
    norm.close();
    Ok(result?)
}
