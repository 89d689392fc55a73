//! `bollworm` - Cotton bollworm larval counts and theoretical yield-loss records
//!
//! This library converts first- and second-generation larval counts into a
//! theoretical yield-loss percentage and keeps the resulting records in a
//! local `SQLite` database.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod estimator;
pub mod logging;
pub mod record;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use estimator::{estimate, estimate_from_counts, format_loss};
pub use logging::init_logging;
pub use record::{LarvalCounts, NewRecord, Record};
pub use storage::{RecordFilter, RecordUpdate, Storage, StorageStats};
