//! # Terrablocks Main Entry Point
//!
//! Parses the command line, initializes logging and either opens the game
//! window or builds a board headlessly and prints it.

use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use std::path::PathBuf;
use terrablocks::{
    generation::utils, AsciiRenderer, AutoBuilder, GameState, GenerationConfig, Generator,
    InputHandler, TerraResult,
};

/// Command line arguments for Terrablocks.
#[derive(Parser, Debug)]
#[command(name = "terrablocks")]
#[command(about = "Build a landscape from falling blocks, then survive it")]
#[command(version)]
struct Args {
    /// Random seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Board height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Build a board automatically and print it instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Write the built board as JSON (headless mode)
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);
    info!("Starting Terrablocks v{}", terrablocks::VERSION);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    if args.headless {
        if let Err(e) = run_headless(&args, config) {
            error!("Headless run failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    macroquad::Window::from_config(window_conf(), run_game(config));
}

/// Initializes the logging system based on the specified log level.
///
/// `RUST_LOG` takes precedence over the command line.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        tracing::debug!(filter = log_level, "tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_timestamp(None)
            .init();
    }
}

/// Merges the config file with command line overrides and validates the result.
fn load_config(args: &Args) -> TerraResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GenerationConfig::load_from_file(path)?
        }
        None => GenerationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    config.validate()?;
    Ok(config)
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Terrablocks".to_string(),
        window_width: 1024,
        window_height: 768,
        high_dpi: true,
        ..Default::default()
    }
}

/// Runs the windowed game loop.
async fn run_game(config: GenerationConfig) {
    info!("Seed {} on a {}x{} board", config.seed, config.width, config.height);
    match GameState::new(config) {
        Ok(game_state) => {
            let mut scenes = terrablocks::scenes::SceneManager::new(game_state, InputHandler::new());
            scenes.run().await;
        }
        Err(e) => error!("Could not start the game: {}", e),
    }
}

/// Builds a board without a window, prints it and optionally exports it.
fn run_headless(args: &Args, config: GenerationConfig) -> TerraResult<()> {
    let mut rng = utils::create_rng(&config);
    let builder = AutoBuilder::new();
    let board = builder.generate(&config, &mut rng)?;

    if let Some(path) = &args.export {
        std::fs::write(path, board.to_json()?)?;
        info!("Board exported to {}", path.display());
    }

    let game_state = GameState::new_with_board(config, board)?;
    println!("{}", AsciiRenderer::render(&game_state));

    if let Some(adventure) = game_state.adventure() {
        println!(
            "player {:?}, {} enemies, {} treasures, {} hazard cell(s)",
            adventure.player.position,
            adventure.enemies.len(),
            adventure.treasures.len(),
            game_state.hazard_count()
        );
    }
    Ok(())
}
