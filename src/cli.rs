//! Command-line interface for slide_puzzle.

use std::path::PathBuf;

use clap::Parser;

/// Slide Puzzle - terminal sliding-tile game with levels and highscores
#[derive(Parser, Debug)]
#[command(name = "slide_puzzle")]
#[command(about = "Terminal sliding-tile puzzle", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Level to open directly, skipping the menus (unknown ids fall back
    /// to the default configuration)
    #[arg(short, long)]
    pub level: Option<u8>,

    /// Directory for persisted progress and highscores
    #[arg(long, default_value = ".slide_puzzle")]
    pub data_dir: PathBuf,
}
