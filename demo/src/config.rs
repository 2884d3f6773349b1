//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

/// Interactive A* maze solver.
///
/// Left click places the start, then the end, then barriers. Right click
/// clears a cell. Space runs the search (Esc aborts it), `r` scatters random
/// barriers, `c` clears the grid and `q` quits.
#[derive(Parser, Debug, Clone)]
#[command(name = "maze", version)]
pub struct Config {
    /// Number of rows (and columns) of the square grid.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(2..=200))]
    pub rows: i32,

    /// Pause after each search step, in milliseconds.
    #[arg(long, default_value_t = 15)]
    pub delay_ms: u64,

    /// Probability that `r` turns a free cell into a barrier.
    #[arg(long, default_value_t = 0.3, value_parser = parse_density)]
    pub density: f64,

    /// Seed for random barriers; a fresh one is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the screen is taken by the grid).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("density must be between 0 and 1, got {s}"))
    }
}
