use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use snake_arcade::app::App;
use snake_arcade::game::GameConfig;
use snake_arcade::score::HighScoreStore;

#[derive(Parser)]
#[command(name = "snake-arcade")]
#[command(version, about = "Terminal snake with classic and modern rulesets")]
struct Cli {
    /// Grid half-span; both axes cover [-boundary, boundary)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i32).range(2..=32))]
    boundary: i32,

    /// Where high scores are persisted
    #[arg(long, default_value = "highscores.json")]
    highscore_file: PathBuf,

    /// Log file; the game owns the terminal, so logs go to disk
    #[arg(long, default_value = "snake-arcade.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up file logging before touching the terminal
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(LevelFilter::Info, LogConfig::default(), log_file)
        .context("failed to initialize logger")?;

    info!("starting snake-arcade (boundary {})", cli.boundary);

    let config = GameConfig::new(cli.boundary);
    let store = HighScoreStore::new(cli.highscore_file);

    let mut app = App::new(config, store);
    app.run().await
}
