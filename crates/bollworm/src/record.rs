//! Record types for bollworm.
//!
//! A record pairs the two larval-generation counts with the yield loss
//! computed from them and the date they were measured. The loss is never
//! supplied by the caller: it is always derived from the counts.

use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::estimator;

/// Field name used in errors for the first-generation count.
const FIRST_GEN_FIELD: &str = "first-generation";

/// Field name used in errors for the second-generation count.
const SECOND_GEN_FIELD: &str = "second-generation";

/// Plain decimal: optional `+`, digits, optional fractional part.
const COUNT_PATTERN: &str = r"^\+?(\d+(\.\d*)?|\.\d+)$";

fn count_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COUNT_PATTERN).expect("count pattern is valid"))
}

/// Validated larval counts, per hundred plants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LarvalCounts {
    /// First-generation larvae per hundred plants.
    pub first_gen_count: f64,
    /// Second-generation larvae per hundred plants.
    pub second_gen_count: f64,
}

impl LarvalCounts {
    /// Create counts from numeric values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCount`] if either value is NaN, infinite, or negative.
    pub fn new(first_gen_count: f64, second_gen_count: f64) -> Result<Self> {
        check_count(FIRST_GEN_FIELD, first_gen_count)?;
        check_count(SECOND_GEN_FIELD, second_gen_count)?;
        Ok(Self {
            first_gen_count,
            second_gen_count,
        })
    }

    /// Parse counts from user-supplied text.
    ///
    /// Only plain decimal numbers are accepted. Expressions, exponents,
    /// `inf` and `nan` are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCount`] naming the first field that fails to parse.
    pub fn parse(first_gen_count: &str, second_gen_count: &str) -> Result<Self> {
        let first = parse_count(FIRST_GEN_FIELD, first_gen_count)?;
        let second = parse_count(SECOND_GEN_FIELD, second_gen_count)?;
        Self::new(first, second)
    }

    /// Parse a single first-generation count, as for an edit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCount`] if the input is not a non-negative decimal.
    pub fn parse_first(input: &str) -> Result<f64> {
        parse_count(FIRST_GEN_FIELD, input)
    }

    /// Parse a single second-generation count, as for an edit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCount`] if the input is not a non-negative decimal.
    pub fn parse_second(input: &str) -> Result<f64> {
        parse_count(SECOND_GEN_FIELD, input)
    }

    /// The counts divided by the estimator's fixed divisors.
    #[must_use]
    pub fn normalized(&self) -> (f64, f64) {
        estimator::normalize(self.first_gen_count, self.second_gen_count)
    }

    /// The theoretical yield loss (%) for these counts.
    #[must_use]
    pub fn estimated_loss(&self) -> f64 {
        let (x1, x2) = self.normalized();
        estimator::estimate(x1, x2)
    }
}

fn check_count(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid_count(field, value.to_string(), "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::invalid_count(field, value.to_string(), "must not be negative"));
    }
    Ok(())
}

fn parse_count(field: &'static str, input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if !count_regex().is_match(trimmed) {
        return Err(Error::invalid_count(field, input, "not a decimal number"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| Error::invalid_count(field, input, "not a decimal number"))
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the input is not a valid calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::invalid_date(input))
}

/// Today's date in the local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A record that has not been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    /// The measured counts.
    pub counts: LarvalCounts,
    /// Loss computed from `counts` at construction.
    pub estimated_loss: f64,
    /// Date of the measurement.
    pub recorded_date: NaiveDate,
}

impl NewRecord {
    /// Create a new record, computing its loss from the counts.
    #[must_use]
    pub fn new(counts: LarvalCounts, recorded_date: NaiveDate) -> Self {
        Self {
            counts,
            estimated_loss: counts.estimated_loss(),
            recorded_date,
        }
    }
}

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier assigned by the storage layer.
    pub id: i64,
    /// First-generation larvae per hundred plants.
    pub first_gen_count: f64,
    /// Second-generation larvae per hundred plants.
    pub second_gen_count: f64,
    /// Theoretical yield loss (%).
    pub estimated_loss: f64,
    /// Date of the measurement.
    pub recorded_date: NaiveDate,
    /// When the record was first stored.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// The record's counts.
    #[must_use]
    pub fn counts(&self) -> LarvalCounts {
        LarvalCounts {
            first_gen_count: self.first_gen_count,
            second_gen_count: self.second_gen_count,
        }
    }

    /// Replace the counts and date, recomputing the loss.
    pub fn revise(&mut self, counts: LarvalCounts, recorded_date: NaiveDate) {
        self.first_gen_count = counts.first_gen_count;
        self.second_gen_count = counts.second_gen_count;
        self.estimated_loss = counts.estimated_loss();
        self.recorded_date = recorded_date;
    }

    /// The loss rendered with full precision.
    #[must_use]
    pub fn loss_display(&self) -> String {
        estimator::format_loss(self.estimated_loss)
    }

    /// Whether the stored loss still matches the counts.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.counts().estimated_loss().to_bits() == self.estimated_loss.to_bits()
    }
}
