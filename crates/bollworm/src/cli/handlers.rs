//! Command handlers.
//!
//! Each handler runs one subcommand against an open [`Storage`] (or none, for
//! `estimate` and `config`) and returns the text to print. The binary only
//! loads configuration, opens the store and prints.

use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::estimator::format_loss;
use crate::record::{parse_date, today, LarvalCounts, NewRecord};
use crate::storage::{RecordFilter, RecordUpdate, Storage};

use super::output::{render_record, render_records, render_stats};
use super::{
    AddCommand, ConfigCommand, EditCommand, EstimateCommand, ListCommand, OutputFormat, ShowCommand,
};

/// Create the schema, optionally clearing every record first.
///
/// # Errors
///
/// Returns an error if clearing the records fails.
pub fn init(storage: &Storage, drop: bool) -> Result<String> {
    let mut out = String::new();
    if drop {
        let removed = storage.clear()?;
        let _ = writeln!(out, "Dropped {removed} records.");
    }
    let _ = write!(out, "Database initialized at {}", storage.path().display());
    Ok(out)
}

/// Load the historical seed records.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn seed(storage: &Storage) -> Result<String> {
    let inserted = storage.seed()?;
    Ok(format!("Inserted {inserted} seed records."))
}

/// Compute the loss for two counts without storing anything.
///
/// # Errors
///
/// Returns [`Error::InvalidCount`] if either count is malformed.
pub fn estimate(cmd: &EstimateCommand) -> Result<String> {
    let counts = LarvalCounts::parse(&cmd.first, &cmd.second)?;
    Ok(format_loss(counts.estimated_loss()))
}

/// Validate and store a new measurement.
///
/// # Errors
///
/// Returns an input error for malformed counts or dates, or a storage error.
pub fn add(storage: &Storage, cmd: &AddCommand) -> Result<String> {
    let counts = LarvalCounts::parse(&cmd.first, &cmd.second)?;
    let recorded_date = match &cmd.date {
        Some(date) => parse_date(date)?,
        None => today(),
    };

    let record = NewRecord::new(counts, recorded_date);
    let id = storage.insert(&record)?;

    info!("Stored record {}", id);
    Ok(format!(
        "Record {id}: estimated loss {}%",
        format_loss(record.estimated_loss)
    ))
}

/// Build the listing filter and format, falling back to the configured
/// defaults for anything the command line leaves unset.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] for a malformed bound, or
/// [`Error::InvalidArgument`] when `--since` is later than `--until`.
pub fn list_filter(cmd: &ListCommand, config: &Config) -> Result<(RecordFilter, OutputFormat)> {
    let filter = RecordFilter {
        since: cmd.since.as_deref().map(parse_date).transpose()?,
        until: cmd.until.as_deref().map(parse_date).transpose()?,
        limit: cmd.limit.unwrap_or(config.listing.default_limit),
    };
    if let (Some(since), Some(until)) = (filter.since, filter.until) {
        if since > until {
            return Err(Error::invalid_argument(format!(
                "--since {since} is after --until {until}"
            )));
        }
    }

    let format = cmd
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.listing.default_format));

    Ok((filter, format))
}

/// List stored records.
///
/// # Errors
///
/// Returns an error if the arguments are invalid or the query fails.
pub fn list(storage: &Storage, cmd: &ListCommand, config: &Config) -> Result<String> {
    let (filter, format) = list_filter(cmd, config)?;
    debug!(?filter, ?format, "Listing records");
    let records = storage.list(&filter)?;
    render_records(&records, format)
}

/// Show one record.
///
/// # Errors
///
/// Returns [`Error::RecordNotFound`] if no record has the id.
pub fn show(storage: &Storage, cmd: &ShowCommand) -> Result<String> {
    let record = storage
        .get(cmd.id)?
        .ok_or(Error::RecordNotFound { id: cmd.id })?;
    render_record(&record, cmd.format)
}

/// Turn the edit flags into a [`RecordUpdate`].
///
/// # Errors
///
/// Returns an input error for malformed values, or
/// [`Error::InvalidArgument`] when no field is given.
pub fn record_update(cmd: &EditCommand) -> Result<RecordUpdate> {
    let update = RecordUpdate {
        first_gen_count: cmd.first.as_deref().map(LarvalCounts::parse_first).transpose()?,
        second_gen_count: cmd.second.as_deref().map(LarvalCounts::parse_second).transpose()?,
        recorded_date: cmd.date.as_deref().map(parse_date).transpose()?,
    };
    if update.is_empty() {
        return Err(Error::invalid_argument(
            "nothing to change: pass --first, --second or --date",
        ));
    }
    Ok(update)
}

/// Change a record and recompute its loss.
///
/// # Errors
///
/// Returns an error if the flags are invalid or the record does not exist.
pub fn edit(storage: &Storage, cmd: &EditCommand) -> Result<String> {
    let update = record_update(cmd)?;
    let record = storage
        .update(cmd.id, &update)?
        .ok_or(Error::RecordNotFound { id: cmd.id })?;

    Ok(format!(
        "Record {}: estimated loss {}%",
        record.id,
        record.loss_display()
    ))
}

/// Delete one record.
///
/// # Errors
///
/// Returns [`Error::RecordNotFound`] if no record has the id.
pub fn delete(storage: &Storage, id: i64) -> Result<String> {
    if !storage.delete(id)? {
        return Err(Error::RecordNotFound { id });
    }
    Ok(format!("Deleted record {id}."))
}

/// Show store statistics.
///
/// # Errors
///
/// Returns an error if the query or JSON serialization fails.
pub fn stats(storage: &Storage, json: bool) -> Result<String> {
    let stats = storage.stats()?;
    if json {
        Ok(serde_json::to_string_pretty(&stats)?)
    } else {
        Ok(format!(
            "Database: {}\n{}",
            storage.path().display(),
            render_stats(&stats)
        ))
    }
}

/// Run a `config` subcommand.
///
/// `path` and `validate` never load the active configuration, so a broken
/// file can still be located and checked. `custom_path` is the global
/// `--config` option.
///
/// # Errors
///
/// Returns the load or validation error of the file being shown or validated.
pub fn config(cmd: &ConfigCommand, custom_path: Option<&Path>) -> Result<String> {
    let config_file = custom_path.map_or_else(Config::default_config_path, Path::to_path_buf);

    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(Some(config_file))?;
            show_config(&config, *json)
        }
        ConfigCommand::Path => Ok(config_file.display().to_string()),
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or(config_file);
            debug!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))?;
            Ok(format!("Configuration is valid: {}", path.display()))
        }
    }
}

fn show_config(config: &Config, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(config)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Current Configuration");
    let _ = writeln!(out, "=====================");
    let _ = writeln!(out);
    let _ = writeln!(out, "[Storage]");
    let _ = writeln!(out, "  Database path:   {}", config.database_path().display());
    let _ = writeln!(out);
    let _ = writeln!(out, "[Listing]");
    let _ = writeln!(out, "  Default limit:   {}", config.listing.default_limit);
    let _ = write!(out, "  Default format:  {}", config.listing.default_format);
    Ok(out)
}
