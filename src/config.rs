use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::algorithms::Strategy;
use crate::control::speed_from_secs;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Step-by-step maze search visualizer", long_about = None)]
pub struct Config {
    /// Directory holding the `*.txt` maze files offered in the menu
    #[arg(long, default_value = "dataset")]
    pub maze_dir: PathBuf,

    /// Maze file to select (or, with --headless, to solve)
    #[arg(long)]
    pub maze: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Strategy::Bfs)]
    pub algorithm: Strategy,

    /// Seconds per search step, between 0.0001 and 5
    #[arg(long, default_value_t = 0.1)]
    pub speed: f64,

    /// Seed for the random strategy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Solve once without the terminal UI and print statistics
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn step_delay(&self) -> Duration {
        speed_from_secs(self.speed)
    }
}
