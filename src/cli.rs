//! Command-line interface for tingshuo
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Phonetic assessment of spoken Chinese practice answers
#[derive(Parser, Debug)]
#[command(
    name = "tingshuo",
    version,
    about = "Phonetic assessment of spoken Chinese practice answers"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: session progress, -vv: per-stage diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess a session and print its report as JSON
    Assess {
        /// Session input JSON ({ sessionId, questions: [...] })
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Seed for reproducible confidence values (default: system entropy)
        #[arg(long, value_name = "N")]
        seed: Option<u64>,

        /// Also save the report to the report store
        #[arg(long)]
        save: bool,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Manage saved reports
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Report store actions
#[derive(Subcommand, Debug)]
pub enum ReportsAction {
    /// List saved session ids
    List,
    /// Print a saved report
    Show {
        /// Session id
        id: String,
    },
    /// Delete a saved report
    Delete {
        /// Session id
        id: String,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the default configuration file path
    Path,
}
