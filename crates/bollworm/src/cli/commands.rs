//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Database initialization arguments.
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Delete all existing records before initializing
    #[arg(long)]
    pub drop: bool,
}

/// Estimate command arguments.
#[derive(Debug, Args)]
pub struct EstimateCommand {
    /// First-generation larvae per hundred plants
    pub first: String,

    /// Second-generation larvae per hundred plants
    pub second: String,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// First-generation larvae per hundred plants
    pub first: String,

    /// Second-generation larvae per hundred plants
    pub second: String,

    /// Measurement date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only records measured on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,

    /// Only records measured on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,

    /// Maximum number of records (defaults to listing.default_limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format (defaults to listing.default_format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Record id
    pub id: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Record id
    pub id: i64,

    /// New first-generation count
    #[arg(long)]
    pub first: Option<String>,

    /// New second-generation count
    #[arg(long)]
    pub second: Option<String>,

    /// New measurement date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Record id
    pub id: i64,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Resolve a format name from configuration, falling back to plain.
    #[must_use]
    pub fn from_config(name: &str) -> Self {
        <Self as ValueEnum>::from_str(name, true).unwrap_or_default()
    }
}
