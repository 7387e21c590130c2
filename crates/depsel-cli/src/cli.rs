//! CLI argument definitions for depsel.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "depsel",
    version,
    about = "Select a curated subset of a Maven project's dependencies",
    long_about = "depsel narrows a project's resolved dependency artifacts to the subset \
                  matched by the [[filter]] rules in Depsel.toml, optionally re-resolving \
                  the matches transitively, and merges the results across rules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the filter rules and print each rule's selection
    Select {
        /// Resolve from the local repository only
        #[arg(long)]
        offline: bool,
        /// Re-check snapshots and cached metadata
        #[arg(short = 'U', long)]
        update_snapshots: bool,
        /// Local repository directory (default: ~/.m2/repository)
        #[arg(long, value_name = "PATH")]
        local_repository: Option<PathBuf>,
        /// Settings file (default: ~/.depsel/settings.toml)
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,
        /// Write the final artifact set to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Output file format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the configured filter rules and their normalized patterns
    Rules,

    /// Check how each rule treats an artifact coordinate
    Check {
        /// Coordinate (group:artifact:version, group:artifact:type:version or
        /// group:artifact:type:classifier:version)
        coordinate: String,
        /// Check only this rule (1-based)
        #[arg(long)]
        rule: Option<usize>,
    },
}

/// Parse command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}
