//! Command-line interface for bollworm.
//!
//! This module provides the CLI structure, the command handlers and output
//! rendering for the `bollworm` binary.

mod commands;
pub mod handlers;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, EstimateCommand, InitCommand,
    ListCommand, OutputFormat, ShowCommand, StatsCommand,
};

use crate::logging::Verbosity;

/// bollworm - Cotton bollworm yield-loss records
///
/// Log first- and second-generation larval counts, compute the theoretical
/// yield loss, and keep a history of measurements.
#[derive(Debug, Parser)]
#[command(name = "bollworm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database schema
    Init(InitCommand),

    /// Load the historical seed records
    Seed,

    /// Compute the yield loss without storing it
    Estimate(EstimateCommand),

    /// Record a new measurement
    Add(AddCommand),

    /// List stored records
    List(ListCommand),

    /// Show one record
    Show(ShowCommand),

    /// Change a record and recompute its loss
    Edit(EditCommand),

    /// Delete a record
    Delete(DeleteCommand),

    /// Show database statistics
    Stats(StatsCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
