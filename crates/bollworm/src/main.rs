//! `bollworm` - CLI for cotton bollworm yield-loss records
//!
//! This binary validates larval counts entered on the command line, computes
//! the theoretical yield loss, and manages the stored records.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use bollworm::cli::{handlers, Cli, Command};
use bollworm::{init_logging, Config, Storage};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config_path = cli.config;
    let output = match cli.command {
        // `config` loads (or deliberately skips) the configuration itself.
        Command::Config(cmd) => handlers::config(&cmd, config_path.as_deref())?,
        Command::Estimate(cmd) => handlers::estimate(&cmd)?,
        Command::Init(cmd) => with_storage(config_path, |s, _| handlers::init(s, cmd.drop))?,
        Command::Seed => with_storage(config_path, |s, _| handlers::seed(s))?,
        Command::Add(cmd) => with_storage(config_path, |s, _| handlers::add(s, &cmd))?,
        Command::List(cmd) => with_storage(config_path, |s, c| handlers::list(s, &cmd, c))?,
        Command::Show(cmd) => with_storage(config_path, |s, _| handlers::show(s, &cmd))?,
        Command::Edit(cmd) => with_storage(config_path, |s, _| handlers::edit(s, &cmd))?,
        Command::Delete(cmd) => with_storage(config_path, |s, _| handlers::delete(s, cmd.id))?,
        Command::Stats(cmd) => with_storage(config_path, |s, _| handlers::stats(s, cmd.json))?,
    };

    println!("{output}");
    Ok(())
}

/// Load the configuration, open the record database and run `handler`.
fn with_storage<F>(config_path: Option<PathBuf>, handler: F) -> anyhow::Result<String>
where
    F: FnOnce(&Storage, &Config) -> bollworm::Result<String>,
{
    let config = Config::load_from(config_path).context("loading configuration")?;
    let path = config.database_path();
    debug!("Using database {}", path.display());

    let storage = Storage::open(&path)
        .with_context(|| format!("opening record database {}", path.display()))?;
    Ok(handler(&storage, &config)?)
}
