use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use memory_master::config::{default_data_dir, GameConfig};
use memory_master::game::{DigitSource, GameController, RandomDigits};
use memory_master::score::{FileScoreStore, ScoreStore};
use memory_master::tui::app::TuiApp;
use memory_master::tui::runner::run_tui;

#[derive(Parser)]
#[command(name = "memory-master", about = "Watch the digits, type them back.")]
struct Cli {
    /// Config file (defaults to ~/.memory-master/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory for the high score and log (defaults to ~/.memory-master)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Seed the digit generator for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (defaults to <data dir>/memory-master.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the stored high score
    HighScore,
    /// Print the effective configuration as YAML
    Config,
}

/// Log to a file; the terminal belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("memory_master=info".parse()?),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(default_data_dir)
        .unwrap_or_else(|| PathBuf::from(".memory-master"));
    let log_file = cli
        .log_file
        .unwrap_or_else(|| data_dir.join("memory-master.log"));
    init_logging(&log_file)?;

    let config = GameConfig::load(cli.config.as_deref(), &data_dir)?;
    let store = FileScoreStore::new(config.high_score_path(&data_dir));

    match cli.command {
        Some(Command::HighScore) => {
            println!("{}", store.load()?);
            return Ok(());
        }
        Some(Command::Config) => {
            print!("{}", config.to_yaml()?);
            return Ok(());
        }
        None => {}
    }

    let high_score = store.load()?;
    info!(
        data_dir = %data_dir.display(),
        high_score,
        "Memory Master starting"
    );

    let digits: Box<dyn DigitSource> = match cli.seed {
        Some(seed) => Box::new(RandomDigits::seeded(seed)),
        None => Box::new(RandomDigits::new()),
    };
    let app = TuiApp::new(GameController::new(digits, high_score), Box::new(store));

    run_tui(app, config.reveal_timing()).await
}
