use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use mixcut::{composition::MixEngine, config::Config};

#[derive(Parser)]
#[command(
    name = "mixcut",
    version,
    about = "Batch-assemble short-form videos from hook, shuffled middle segments, and outro clips",
    long_about = "Mixcut slices middle footage folders into fixed-length segments, shuffles each \
                  pool once, and round-robins through the pools to assemble N distinct output \
                  videos with minimal segment reuse."
)]
struct Cli {
    /// Run configuration file (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Root directory for output batches
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Override the number of videos to generate
    #[arg(short, long)]
    num_videos: Option<u32>,

    /// Fixed shuffle seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the edit lists without invoking ffmpeg
    #[arg(long)]
    plan_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting mixcut v{}", env!("CARGO_PKG_VERSION"));
    info!("Config: {:?}", cli.config);

    let mut config = Config::from_file(&cli.config)?;
    if let Some(num_videos) = cli.num_videos {
        info!("Overriding num_videos: {}", num_videos);
        config.global.num_videos = num_videos;
    }

    let engine = MixEngine::new(config).with_seed(cli.seed);

    if cli.plan_only {
        let edit_lists = engine.plan()?;
        for (i, list) in edit_lists.iter().enumerate() {
            println!("video {:03}:", i + 1);
            for entry in list.iter() {
                println!("  {}", entry.describe());
            }
        }
        info!("Plan complete: {} edit list(s), nothing rendered", edit_lists.len());
        return Ok(());
    }

    let output_dir = engine.run(&cli.output).await?;
    info!("All videos written to {:?}", output_dir);
    Ok(())
}
