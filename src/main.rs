//! Slide Puzzle - terminal sliding-tile puzzle game.

#![warn(missing_docs)]

mod cli;

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use slide_puzzle::{FileStorage, LobbyController, ProgressStore};

use cli::Cli;

fn main() -> Result<()> {
    // Log to stderr so output never corrupts the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    info!(
        level = ?args.level,
        data_dir = %args.data_dir.display(),
        "Starting Slide Puzzle"
    );

    let progress = ProgressStore::new(FileStorage::new(args.data_dir));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = LobbyController::new(progress, args.level);
    let res = controller.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}
