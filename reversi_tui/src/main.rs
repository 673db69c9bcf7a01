mod app;
mod config;
mod input;
mod session;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ratatui::{
    crossterm::{
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use reversi::{Board, Game, Player};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::app::App;
use crate::config::Config;

#[derive(Parser)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Don't animate the flips, regardless of the config file
    #[arg(long, default_value_t = false)]
    no_animation: bool,

    /// Start from a position code, as shown in the status line
    #[arg(short, long)]
    position: Option<String>,

    /// Who moves first when starting from a position code
    #[arg(long, value_enum, default_value_t = Side::One)]
    to_move: Side,

    /// Write logs to this file. Without it, nothing is logged
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    One,
    Two,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::One => Player::One,
            Side::Two => Player::Two,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        initialize_logging(args.log_level, path)?;
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.no_animation {
        config.animation = false;
    }

    let game = match &args.position {
        Some(code) => {
            let board = Board::from_state_code(code)
                .with_context(|| format!("Invalid position code '{}'", code))?;
            let requested: Player = args.to_move.into();
            let game = Game::from_board(board, requested);
            if game.current_player() != requested {
                info!(passing = ?requested, "No legal move in the starting position");
            }
            game
        }
        None => Game::new(),
    };
    info!(position = %game.board().state_code(), to_move = ?game.current_player(), ?config, "Starting");

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Restore the terminal before reporting any error
    let mut app = App::new(game, config, Instant::now());
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result?;

    info!(
        scores = ?app.game().scores(),
        clock = %app.session().clock(Instant::now()),
        "Quitting"
    );
    Ok(())
}

fn initialize_logging(level: LevelFilter, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create log file '{}'", path.display()))?;

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}
