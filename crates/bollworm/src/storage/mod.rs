//! Storage layer for bollworm.
//!
//! This module provides `SQLite`-based persistent storage for yield-loss
//! records: insertion, lookup, filtered listing, edits that recompute the
//! loss, deletion, and loading of the historical seed fixtures.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::estimator::SEED_FIXTURES;
use crate::record::{parse_date, LarvalCounts, NewRecord, Record};

/// Date format used for the `recorded_date` column. Sorts lexically.
const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_RECORD: &str = r"
SELECT id, first_gen_count, second_gen_count, estimated_loss, recorded_date, created_at, updated_at
FROM records
";

/// Storage engine for yield-loss records.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

/// Filter for [`Storage::list`].
///
/// Date bounds are inclusive. Results are ordered newest `recorded_date`
/// first, with ties broken by descending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFilter {
    /// Earliest recorded date to include.
    pub since: Option<NaiveDate>,
    /// Latest recorded date to include.
    pub until: Option<NaiveDate>,
    /// Maximum number of records to return.
    pub limit: usize,
}

impl RecordFilter {
    /// A filter with no date bounds.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            since: None,
            until: None,
            limit,
        }
    }
}

/// Changes to apply to a stored record. Unset fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordUpdate {
    /// New first-generation count.
    pub first_gen_count: Option<f64>,
    /// New second-generation count.
    pub second_gen_count: Option<f64>,
    /// New measurement date.
    pub recorded_date: Option<NaiveDate>,
}

impl RecordUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_gen_count.is_none()
            && self.second_gen_count.is_none()
            && self.recorded_date.is_none()
    }
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store a new record and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, record: &NewRecord) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            r"
            INSERT INTO records
                (first_gen_count, second_gen_count, estimated_loss, recorded_date, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ",
            params![
                record.counts.first_gen_count,
                record.counts.second_gen_count,
                record.estimated_loss,
                record.recorded_date.format(DATE_FORMAT).to_string(),
                now,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted record {} (loss {})", id, record.estimated_loss);
        Ok(id)
    }

    /// Get a record by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<Record>> {
        let sql = format!("{SELECT_RECORD} WHERE id = ?1");
        let record = self
            .conn
            .query_row(&sql, [id], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    /// List records matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self, filter: &RecordFilter) -> Result<Vec<Record>> {
        let sql = format!(
            "{SELECT_RECORD}
            WHERE (?1 IS NULL OR recorded_date >= ?1)
              AND (?2 IS NULL OR recorded_date <= ?2)
            ORDER BY recorded_date DESC, id DESC
            LIMIT ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let since = filter.since.map(|d| d.format(DATE_FORMAT).to_string());
        let until = filter.until.map(|d| d.format(DATE_FORMAT).to_string());
        let limit = i64::try_from(filter.limit).unwrap_or(i64::MAX);

        let records = stmt
            .query_map(params![since, until, limit], Self::row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Apply an update to a stored record, recomputing its loss.
    ///
    /// Returns `None` if no record has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCount`] if the merged counts are invalid, or an
    /// error if the database operation fails.
    pub fn update(&self, id: i64, update: &RecordUpdate) -> Result<Option<Record>> {
        let Some(mut record) = self.get(id)? else {
            return Ok(None);
        };

        let counts = LarvalCounts::new(
            update.first_gen_count.unwrap_or(record.first_gen_count),
            update.second_gen_count.unwrap_or(record.second_gen_count),
        )?;
        let recorded_date = update.recorded_date.unwrap_or(record.recorded_date);
        record.revise(counts, recorded_date);
        record.updated_at = Utc::now();

        self.conn.execute(
            r"
            UPDATE records
            SET first_gen_count = ?1, second_gen_count = ?2, estimated_loss = ?3,
                recorded_date = ?4, updated_at = ?5
            WHERE id = ?6
            ",
            params![
                record.first_gen_count,
                record.second_gen_count,
                record.estimated_loss,
                record.recorded_date.format(DATE_FORMAT).to_string(),
                record.updated_at.to_rfc3339(),
                id,
            ],
        )?;

        debug!("Updated record {} (loss {})", id, record.estimated_loss);
        Ok(Some(record))
    }

    /// Delete a record by id.
    ///
    /// Returns `true` if a record was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
        if affected > 0 {
            debug!("Deleted record {}", id);
        }
        Ok(affected > 0)
    }

    /// Count stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete every record and restart id assignment.
    ///
    /// Returns the number of records deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear(&self) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let affected = tx.execute("DELETE FROM records", [])?;
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'records'", [])?;
        tx.commit()?;

        info!("Cleared {} records", affected);
        Ok(affected)
    }

    /// Insert the historical seed fixtures.
    ///
    /// Each loss is computed from the fixture's counts. Fixtures already
    /// present (same counts and date) are skipped, so seeding twice does not
    /// duplicate rows. Returns the number of records inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn seed(&self) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;

        for fixture in &SEED_FIXTURES {
            let counts = LarvalCounts::new(fixture.first_gen_count, fixture.second_gen_count)?;
            let record = NewRecord::new(counts, parse_date(fixture.recorded_date)?);

            let exists: i64 = tx.query_row(
                r"
                SELECT COUNT(*) FROM records
                WHERE first_gen_count = ?1 AND second_gen_count = ?2 AND recorded_date = ?3
                ",
                params![
                    counts.first_gen_count,
                    counts.second_gen_count,
                    fixture.recorded_date,
                ],
                |row| row.get(0),
            )?;
            if exists > 0 {
                debug!("Seed fixture for {} already present", fixture.recorded_date);
                continue;
            }

            self.insert(&record)?;
            inserted += 1;
        }

        tx.commit()?;
        info!("Seeded {} records", inserted);
        Ok(inserted)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let (total_records, mean_loss, max_loss, earliest, latest) = self.conn.query_row(
            r"
            SELECT COUNT(*), AVG(estimated_loss), MAX(estimated_loss),
                   MIN(recorded_date), MAX(recorded_date)
            FROM records
            ",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<f64>>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            },
        )?;

        let earliest_date = earliest.map(|s| parse_date(&s)).transpose()?;
        let latest_date = latest.map(|s| parse_date(&s)).transpose()?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_records,
            mean_loss,
            max_loss,
            earliest_date,
            latest_date,
            db_size_bytes,
            schema_version: migrations::schema_version(&self.conn)?,
        })
    }

    /// Convert a database row to a Record.
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
        let recorded_date: String = row.get(4)?;
        let created_at: String = row.get(5)?;
        let updated_at: String = row.get(6)?;

        Ok(Record {
            id: row.get(0)?,
            first_gen_count: row.get(1)?,
            second_gen_count: row.get(2)?,
            estimated_loss: row.get(3)?,
            recorded_date: NaiveDate::parse_from_str(&recorded_date, DATE_FORMAT)
                .map_err(|e| conversion_error(4, e))?,
            created_at: parse_timestamp(5, &created_at)?,
            updated_at: parse_timestamp(6, &updated_at)?,
        })
    }
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// Statistics about the stored records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageStats {
    /// Total number of records stored.
    pub total_records: i64,
    /// Mean estimated loss, if any records exist.
    pub mean_loss: Option<f64>,
    /// Highest estimated loss, if any records exist.
    pub max_loss: Option<f64>,
    /// Earliest recorded date.
    pub earliest_date: Option<NaiveDate>,
    /// Latest recorded date.
    pub latest_date: Option<NaiveDate>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
    /// Schema version of the database.
    pub schema_version: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator;

    fn create_test_storage() -> Storage {
        crate::logging::init_test_logging();
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn new_record(first: f64, second: f64, day: &str) -> NewRecord {
        NewRecord::new(LarvalCounts::new(first, second).unwrap(), date(day))
    }

    #[test]
    fn test_open_in_memory() {
        let storage = Storage::open_in_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_insert_and_get() {
        let storage = create_test_storage();
        let id = storage
            .insert(&new_record(50.0, 300.0, "2022-01-29"))
            .unwrap();

        let record = storage.get(id).unwrap().expect("record should exist");
        assert_eq!(record.id, id);
        assert_eq!(record.first_gen_count, 50.0);
        assert_eq!(record.second_gen_count, 300.0);
        assert_eq!(record.recorded_date, date("2022-01-29"));
        assert!((record.estimated_loss - 25.624_243).abs() < 1e-9);
        assert!(record.is_consistent());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_loss_round_trips_bit_exact() {
        let storage = create_test_storage();
        let new = new_record(40.0, 250.0, "2022-01-28");
        let id = storage.insert(&new).unwrap();

        let record = storage.get(id).unwrap().unwrap();
        assert_eq!(record.estimated_loss.to_bits(), new.estimated_loss.to_bits());
    }

    #[test]
    fn test_get_nonexistent() {
        let storage = create_test_storage();
        assert!(storage.get(99999).unwrap().is_none());
    }

    #[test]
    fn test_list_orders_newest_first() {
        let storage = create_test_storage();
        storage.insert(&new_record(10.0, 60.0, "2022-01-25")).unwrap();
        storage.insert(&new_record(50.0, 300.0, "2022-01-29")).unwrap();
        let first_tie = storage.insert(&new_record(20.0, 120.0, "2022-01-26")).unwrap();
        let second_tie = storage.insert(&new_record(30.0, 180.0, "2022-01-26")).unwrap();

        let records = storage.list(&RecordFilter::with_limit(10)).unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.recorded_date).collect();
        assert_eq!(
            dates,
            vec![
                date("2022-01-29"),
                date("2022-01-26"),
                date("2022-01-26"),
                date("2022-01-25"),
            ]
        );
        assert_eq!(records[1].id, second_tie);
        assert_eq!(records[2].id, first_tie);
    }

    #[test]
    fn test_list_limit() {
        let storage = create_test_storage();
        storage.seed().unwrap();

        assert_eq!(storage.list(&RecordFilter::with_limit(3)).unwrap().len(), 3);
        assert!(storage.list(&RecordFilter::with_limit(0)).unwrap().is_empty());
    }

    #[test]
    fn test_list_date_bounds_inclusive() {
        let storage = create_test_storage();
        storage.seed().unwrap();

        let filter = RecordFilter {
            since: Some(date("2022-01-26")),
            until: Some(date("2022-01-28")),
            limit: 10,
        };
        let records = storage.list(&filter).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records
            .iter()
            .all(|r| r.recorded_date >= date("2022-01-26") && r.recorded_date <= date("2022-01-28")));

        let filter = RecordFilter {
            since: Some(date("2022-01-29")),
            until: None,
            limit: 10,
        };
        assert_eq!(storage.list(&filter).unwrap().len(), 1);
    }

    #[test]
    fn test_update_recomputes_loss() {
        let storage = create_test_storage();
        let id = storage.insert(&new_record(10.0, 60.0, "2022-01-25")).unwrap();

        let update = RecordUpdate {
            first_gen_count: Some(50.0),
            second_gen_count: Some(300.0),
            recorded_date: None,
        };
        let updated = storage.update(id, &update).unwrap().unwrap();
        assert!((updated.estimated_loss - 25.624_243).abs() < 1e-9);
        assert_eq!(updated.recorded_date, date("2022-01-25"));

        let stored = storage.get(id).unwrap().unwrap();
        assert_eq!(stored, updated);
        assert!(stored.is_consistent());
        assert!(stored.updated_at >= stored.created_at);
    }

    #[test]
    fn test_update_single_count_keeps_other() {
        let storage = create_test_storage();
        let id = storage.insert(&new_record(10.0, 60.0, "2022-01-25")).unwrap();

        let update = RecordUpdate {
            second_gen_count: Some(120.0),
            ..RecordUpdate::default()
        };
        let updated = storage.update(id, &update).unwrap().unwrap();
        assert_eq!(updated.first_gen_count, 10.0);
        assert_eq!(updated.second_gen_count, 120.0);
        assert_eq!(
            updated.estimated_loss.to_bits(),
            estimator::estimate_from_counts(10.0, 120.0).to_bits()
        );
    }

    #[test]
    fn test_update_date_only() {
        let storage = create_test_storage();
        let id = storage.insert(&new_record(10.0, 60.0, "2022-01-25")).unwrap();

        let update = RecordUpdate {
            recorded_date: Some(date("2022-02-01")),
            ..RecordUpdate::default()
        };
        let updated = storage.update(id, &update).unwrap().unwrap();
        assert_eq!(updated.recorded_date, date("2022-02-01"));
        assert!((updated.estimated_loss - 15.435_247).abs() < 1e-9);
    }

    #[test]
    fn test_update_nonexistent() {
        let storage = create_test_storage();
        let update = RecordUpdate {
            first_gen_count: Some(1.0),
            ..RecordUpdate::default()
        };
        assert!(storage.update(42, &update).unwrap().is_none());
    }

    #[test]
    fn test_update_rejects_invalid_count() {
        let storage = create_test_storage();
        let id = storage.insert(&new_record(10.0, 60.0, "2022-01-25")).unwrap();

        let update = RecordUpdate {
            first_gen_count: Some(-5.0),
            ..RecordUpdate::default()
        };
        let err = storage.update(id, &update).unwrap_err();
        assert!(err.is_input_error());

        let stored = storage.get(id).unwrap().unwrap();
        assert_eq!(stored.first_gen_count, 10.0);
    }

    #[test]
    fn test_record_update_is_empty() {
        assert!(RecordUpdate::default().is_empty());
        let update = RecordUpdate {
            first_gen_count: Some(1.0),
            ..RecordUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_delete() {
        let storage = create_test_storage();
        let id = storage.insert(&new_record(1.0, 1.0, "2022-01-01")).unwrap();

        assert!(storage.get(id).unwrap().is_some());
        assert!(storage.delete(id).unwrap());
        assert!(storage.get(id).unwrap().is_none());
    }

    #[test]
    fn test_delete_nonexistent() {
        let storage = create_test_storage();
        assert!(!storage.delete(99999).unwrap());
    }

    #[test]
    fn test_count() {
        let storage = create_test_storage();
        assert_eq!(storage.count().unwrap(), 0);

        storage.insert(&new_record(1.0, 1.0, "2022-01-01")).unwrap();
        storage.insert(&new_record(2.0, 2.0, "2022-01-02")).unwrap();
        assert_eq!(storage.count().unwrap(), 2);
    }

    #[test]
    fn test_clear_restarts_ids() {
        let storage = create_test_storage();
        storage.insert(&new_record(1.0, 1.0, "2022-01-01")).unwrap();
        storage.insert(&new_record(2.0, 2.0, "2022-01-02")).unwrap();

        assert_eq!(storage.clear().unwrap(), 2);
        assert_eq!(storage.count().unwrap(), 0);

        let id = storage.insert(&new_record(3.0, 3.0, "2022-01-03")).unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_clear_empty() {
        let storage = create_test_storage();
        assert_eq!(storage.clear().unwrap(), 0);
    }

    #[test]
    fn test_seed_reproduces_published_losses() {
        let storage = create_test_storage();
        assert_eq!(storage.seed().unwrap(), SEED_FIXTURES.len());

        let records = storage.list(&RecordFilter::with_limit(10)).unwrap();
        assert_eq!(records.len(), SEED_FIXTURES.len());

        for fixture in &SEED_FIXTURES {
            let record = records
                .iter()
                .find(|r| r.recorded_date == date(fixture.recorded_date))
                .expect("fixture should be stored");
            assert_eq!(record.first_gen_count, fixture.first_gen_count);
            assert_eq!(record.second_gen_count, fixture.second_gen_count);
            assert_eq!(record.loss_display(), estimator::format_loss(fixture.published_loss));
            assert!(record.is_consistent());
        }
    }

    #[test]
    fn test_seed_is_idempotent() {
        let storage = create_test_storage();
        assert_eq!(storage.seed().unwrap(), 5);
        assert_eq!(storage.seed().unwrap(), 0);
        assert_eq!(storage.count().unwrap(), 5);
    }

    #[test]
    fn test_seed_after_partial_delete() {
        let storage = create_test_storage();
        storage.seed().unwrap();
        let newest = storage.list(&RecordFilter::with_limit(1)).unwrap();
        storage.delete(newest[0].id).unwrap();

        assert_eq!(storage.seed().unwrap(), 1);
        assert_eq!(storage.count().unwrap(), 5);
    }

    #[test]
    fn test_stats_empty() {
        let storage = create_test_storage();
        let stats = storage.stats().unwrap();

        assert_eq!(stats.total_records, 0);
        assert!(stats.mean_loss.is_none());
        assert!(stats.max_loss.is_none());
        assert!(stats.earliest_date.is_none());
        assert!(stats.latest_date.is_none());
        assert_eq!(stats.db_size_bytes, 0);
        assert_eq!(stats.schema_version, migrations::CURRENT_VERSION);
    }

    #[test]
    fn test_stats_with_seed() {
        let storage = create_test_storage();
        storage.seed().unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_records, 5);
        assert_eq!(stats.earliest_date, Some(date("2022-01-25")));
        assert_eq!(stats.latest_date, Some(date("2022-01-29")));
        assert!((stats.max_loss.unwrap() - 25.624_243).abs() < 1e-9);

        let expected_mean: f64 =
            SEED_FIXTURES.iter().map(|f| f.published_loss).sum::<f64>() / 5.0;
        assert!((stats.mean_loss.unwrap() - expected_mean).abs() < 1e-9);
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("records.db");

        let storage = Storage::open(&db_path).unwrap();
        let id = storage.insert(&new_record(10.0, 60.0, "2022-01-25")).unwrap();
        assert_eq!(storage.path(), db_path);
        drop(storage);

        let reopened = Storage::open(&db_path).unwrap();
        let record = reopened.get(id).unwrap().unwrap();
        assert!((record.estimated_loss - 15.435_247).abs() < 1e-9);
        assert!(reopened.stats().unwrap().db_size_bytes > 0);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested_path = dir.path().join("nested/deeper/records.db");

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());
        drop(storage);
    }

    #[test]
    fn test_storage_stats_serialize() {
        let storage = create_test_storage();
        storage.seed().unwrap();
        let json = serde_json::to_string(&storage.stats().unwrap()).unwrap();
        assert!(json.contains("\"total_records\":5"));
        assert!(json.contains("\"earliest_date\":\"2022-01-25\""));
    }
}
