use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::path::PathBuf;

use game_state::{Config, GameStateProcessor, RunSummary, export_to_csv_with_path};

#[derive(Parser)]
#[command(author, version, about = "Annotate game state with boundary membership and weapon classes", long_about = None)]
struct Args {
    /// Game state CSV file
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config/default.toml")]
    config: PathBuf,

    /// Directory for the annotated CSV
    #[arg(short = 'o', long = "output-dir", default_value = "output")]
    output_dir: PathBuf,

    /// Skip the in-bounds column
    #[arg(long = "no-bounds")]
    no_bounds: bool,

    /// Skip the weapon classes column
    #[arg(long = "no-weapons")]
    no_weapons: bool,

    /// Add the has-rifle-or-SMG column
    #[arg(long = "rifle-smg")]
    rifle_smg: bool,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::load_from_file(&args.config)
            .with_context(|| format!("Failed to load config {}", args.config.display()))?
    } else {
        warn!(
            "Config file not found: {}, using default settings",
            args.config.display()
        );
        Config::default()
    };

    // CLI flags override the config file
    if args.no_bounds {
        config.processing.bounds = false;
    }
    if args.no_weapons {
        config.processing.weapons = false;
    }
    if args.rifle_smg {
        config.processing.rifle_or_smg = true;
    }
    debug!("Processing settings: {:?}", config.processing);

    let processor = GameStateProcessor::new()
        .set_bounds(&config.boundary.vertices, config.boundary.z_band)
        .load_file(&args.input)
        .with_context(|| format!("Failed to load game state from {}", args.input.display()))?;
    info!(
        "Loaded {} rows, boundary has {} edges",
        processor.n_rows(),
        processor.n_edges()
    );

    let annotated = processor.run(config.processing.pipeline())?;
    RunSummary::from_table(&annotated).log();

    let path = export_to_csv_with_path(&annotated, Some(&args.output_dir))
        .context("Failed to write annotated game state")?;
    info!("Annotated game state saved to: {}", path.display());

    Ok(())
}
