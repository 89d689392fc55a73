//! Rendering of records and statistics for the terminal.

use std::fmt::Write as _;

use crate::error::Result;
use crate::estimator::format_loss;
use crate::record::Record;
use crate::storage::StorageStats;

use super::OutputFormat;

const TABLE_HEADER: &str = "   ID  DATE        1ST GEN   2ND GEN  LOSS (%)";

/// Render a list of records.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_records(records: &[Record], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Plain => Ok(records
            .iter()
            .map(plain_line)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => {
            let mut out = String::from(TABLE_HEADER);
            for record in records {
                let _ = write!(
                    out,
                    "\n{:>5}  {}  {:>8}  {:>8}  {}",
                    record.id,
                    record.recorded_date,
                    record.first_gen_count,
                    record.second_gen_count,
                    record.loss_display(),
                );
            }
            let _ = write!(out, "\n({} records)", records.len());
            Ok(out)
        }
    }
}

/// Render a single record.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_record(record: &Record, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Plain => Ok(plain_line(record)),
        OutputFormat::Table => {
            let mut out = String::new();
            let _ = writeln!(out, "Record {}", record.id);
            let _ = writeln!(out, "  Date:               {}", record.recorded_date);
            let _ = writeln!(out, "  First generation:   {}", record.first_gen_count);
            let _ = writeln!(out, "  Second generation:  {}", record.second_gen_count);
            let _ = writeln!(out, "  Estimated loss (%): {}", record.loss_display());
            let _ = writeln!(out, "  Created:            {}", record.created_at.to_rfc3339());
            let _ = write!(out, "  Updated:            {}", record.updated_at.to_rfc3339());
            Ok(out)
        }
    }
}

/// Render storage statistics as human-readable text.
#[must_use]
pub fn render_stats(stats: &StorageStats) -> String {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "Records:        {}", stats.total_records);
    let _ = writeln!(out, "Mean loss (%):  {}", or_dash(stats.mean_loss.map(format_loss)));
    let _ = writeln!(out, "Max loss (%):   {}", or_dash(stats.max_loss.map(format_loss)));
    let _ = writeln!(
        out,
        "Earliest date:  {}",
        or_dash(stats.earliest_date.map(|d| d.to_string()))
    );
    let _ = writeln!(
        out,
        "Latest date:    {}",
        or_dash(stats.latest_date.map(|d| d.to_string()))
    );
    let _ = writeln!(out, "Database size:  {} bytes", stats.db_size_bytes);
    let _ = write!(out, "Schema version: {}", stats.schema_version);
    out
}

fn plain_line(record: &Record) -> String {
    format!(
        "#{} {} first={} second={} loss={}",
        record.id,
        record.recorded_date,
        record.first_gen_count,
        record.second_gen_count,
        record.loss_display()
    )
}
