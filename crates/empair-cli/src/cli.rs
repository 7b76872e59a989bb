//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Longest-working employee pair finder.
///
/// Reads a table of `EmpID, ProjectID, DateFrom, DateTo` rows and reports
/// which two employees shared the most days on common projects.
#[derive(Debug, Parser)]
#[command(name = "empair", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the pair of employees who worked together longest.
    Pair {
        /// Input CSV file, or `-` for stdin.
        input: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check an input file without computing pairs.
    Validate {
        /// Input CSV file, or `-` for stdin.
        input: PathBuf,
    },

    /// Show assignments after overlapping and adjacent ranges are merged.
    Merge {
        /// Input CSV file, or `-` for stdin.
        input: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
