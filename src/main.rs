//! lanedrag - Entry Point

use clap::Parser;
use lanedrag::model::AppError;
use lanedrag::replay::Replay;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::info;

/// lanedrag - replay pointer input against a board of sortable lanes
#[derive(Parser, Debug)]
#[command(name = "lanedrag")]
#[command(version)]
#[command(about = "Replay a drag-and-drop input script against a board fixture")]
pub struct Args {
    /// Path to the JSON board fixture
    pub board: PathBuf,

    /// Path to the JSON-lines input script (reads from stdin if not provided)
    pub script: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Drag threshold in pixels
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f32>,

    /// Do not emit haptic pulses on long press
    #[arg(long)]
    pub no_haptics: bool,

    /// Print each lane's final order after the events
    #[arg(long)]
    pub orders: bool,
}

fn parse_threshold(raw: &str) -> Result<f32, String> {
    match raw.parse::<f32>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(format!("`{raw}` is not a non-negative number of pixels")),
    }
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("lanedrag: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = lanedrag::config::load_config_with_precedence(args.config.clone())?;
        let merged = lanedrag::config::merge_config(config_file);
        let with_env = lanedrag::config::apply_env_overrides(merged);
        let haptics_override = if args.no_haptics { Some(false) } else { None };
        lanedrag::config::apply_cli_overrides(with_env, args.threshold, haptics_override)
    };

    lanedrag::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let fixture = lanedrag::fixture::load_fixture(&args.board)?;
    let steps = match &args.script {
        Some(path) => {
            let file = std::fs::File::open(path).map_err(lanedrag::model::ScriptError::from)?;
            lanedrag::script::parse_script(BufReader::new(file))?
        }
        None => lanedrag::script::parse_script(io::stdin().lock())?,
    };
    info!(steps = steps.len(), "script loaded");

    let (board, layout) = fixture.build(config.tuning());
    let mut replay = Replay::new(board, layout);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for step in &steps {
        for event in replay.apply(step) {
            serde_json::to_writer(&mut out, &event).map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }
    if args.orders {
        for order in replay.orders() {
            serde_json::to_writer(&mut out, &order).map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(())
}
