//! Gazetteer schema and a bulk writer for building new files.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

/// Feature and coordinate tables. Feature columns are nullable so that the
/// file faithfully stores whatever the source data had; lookups reject
/// NULLs at read time. `coordinates.feature_id` carries no foreign key,
/// matching existing gazetteer files.
pub const SCHEMA_SQL: &str = "
CREATE TABLE everything (
    id INTEGER PRIMARY KEY,
    name TEXT,
    asciiname TEXT,
    admin_name TEXT,
    country_code TEXT,
    country_name TEXT,
    latitude REAL,
    longitude REAL
);
CREATE TABLE coordinates (
    feature_id INTEGER NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL
);";

/// Built after the bulk load so inserts don't pay for index maintenance.
pub const INDEX_SQL: &str = "
CREATE INDEX coordinates_lat_lon ON coordinates (latitude, longitude);
ANALYZE;";

const INSERT_FEATURE_SQL: &str = "INSERT INTO everything
    (id, name, asciiname, admin_name, country_code, country_name, latitude, longitude)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const INSERT_COORDINATE_SQL: &str =
    "INSERT INTO coordinates (feature_id, latitude, longitude) VALUES (?1, ?2, ?3)";

/// A feature as written into a new gazetteer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub id: i64,
    pub name: String,
    pub ascii_name: String,
    pub admin_name: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl FeatureRecord {
    pub fn new(id: i64, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        let name = name.into();
        Self {
            id,
            ascii_name: name.clone(),
            name,
            admin_name: None,
            country_code: None,
            country_name: None,
            latitude,
            longitude,
        }
    }

    pub fn with_ascii_name(mut self, ascii_name: impl Into<String>) -> Self {
        self.ascii_name = ascii_name.into();
        self
    }

    pub fn with_admin(mut self, admin_name: impl Into<String>) -> Self {
        self.admin_name = Some(admin_name.into());
        self
    }

    pub fn with_country(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self.country_name = Some(name.into());
        self
    }
}

/// Creates a fresh gazetteer file and bulk-loads features into it.
///
/// ```no_run
/// use revgeo::store::{FeatureRecord, GazetteerWriter};
///
/// let mut writer = GazetteerWriter::create("cities.sqlite")?;
/// writer.insert_batch(&[FeatureRecord::new(1, "Null Island", 0.0, 0.0)])?;
/// let written = writer.finish()?;
/// assert_eq!(written, 1);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct GazetteerWriter {
    conn: Connection,
    written: u64,
}

impl GazetteerWriter {
    /// Create the file and its tables. Refuses to touch an existing file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            anyhow::bail!("Refusing to overwrite existing file {}", path.display());
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to create gazetteer at {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode = OFF; PRAGMA synchronous = OFF;")?;
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to create gazetteer schema")?;

        Ok(Self { conn, written: 0 })
    }

    /// Insert a batch of features in one transaction.
    pub fn insert_batch(&mut self, records: &[FeatureRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut feature = tx.prepare_cached(INSERT_FEATURE_SQL)?;
            let mut coordinate = tx.prepare_cached(INSERT_COORDINATE_SQL)?;

            for r in records {
                feature
                    .execute(params![
                        r.id,
                        r.name,
                        r.ascii_name,
                        r.admin_name,
                        r.country_code,
                        r.country_name,
                        r.latitude,
                        r.longitude,
                    ])
                    .with_context(|| format!("Failed to insert feature {}", r.id))?;
                coordinate.execute(params![r.id, r.latitude, r.longitude])?;
            }
        }
        tx.commit().context("Failed to commit feature batch")?;

        self.written += records.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Build the coordinate index and close the file. Returns the number of
    /// features written.
    pub fn finish(self) -> Result<u64> {
        self.conn
            .execute_batch(INDEX_SQL)
            .context("Failed to build coordinate index")?;
        Ok(self.written)
    }
}
