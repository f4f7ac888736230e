use clap::Parser;
use voice_agent::commands::{run_normalize, run_synth};
use voice_agent::{Cli, Command, init_logging};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Synth(args) => run_synth(args).await,
        Command::Normalize(args) => run_normalize(args).await,
    }
}
