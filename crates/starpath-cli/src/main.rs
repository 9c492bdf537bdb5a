//! Starpath CLI
//!
//! Command-line interface for:
//! - Finding degrees of separation between two people in a
//!   movie-credits dataset (`degrees`)
//! - Browsing a dataset sample as a mnemonic before searching
//!   (`sample`)
//! - Playing tic-tac-toe against the minimax evaluator (`tictactoe`)

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod degrees;
mod sample;
mod tictactoe;

#[derive(Parser)]
#[command(name = "starpath")]
#[command(
    author,
    version,
    about = "Degrees of separation over a movie-credits graph"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest chain of shared movies between two people.
    ///
    /// Names are resolved case-insensitively; ambiguous names list
    /// every candidate and prompt for the intended dataset id.
    Degrees {
        /// Dataset directory containing people.csv, movies.csv, stars.csv
        dir: PathBuf,
        /// Source person name (prompted for when omitted)
        #[arg(short, long)]
        source: Option<String>,
        /// Target person name (prompted for when omitted)
        #[arg(short, long)]
        target: Option<String>,
        /// Emit the path as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Print dataset counts and a random sample of names.
    Sample {
        /// Dataset directory containing people.csv, movies.csv, stars.csv
        dir: PathBuf,
        /// Number of names to sample
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },

    /// Play tic-tac-toe against the minimax evaluator.
    Tictactoe {
        /// Side to play
        #[arg(long, value_enum, default_value_t = tictactoe::Side::X)]
        side: tictactoe::Side,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Degrees {
            dir,
            source,
            target,
            json,
        } => degrees::cmd_degrees(&dir, source.as_deref(), target.as_deref(), json),
        Commands::Sample { dir, count } => sample::cmd_sample(&dir, count),
        Commands::Tictactoe { side } => tictactoe::cmd_tictactoe(side),
    }
}

/// Print `label`, flush, and read one trimmed line from stdin.
pub(crate) fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
