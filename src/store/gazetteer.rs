//! Read-only access to a gazetteer file.

use rusqlite::types::Value;
use rusqlite::{named_params, Connection, OpenFlags};
use std::path::Path;

use super::FeatureRow;
use crate::error::{ResolveError, Result};
use crate::models::{BoundingBox, CoordinateQuery};

/// Candidate query template.
///
/// The box predicate and the ranking expression must stay exactly as they
/// are for results to match existing datasets. `feature_id ASC` only decides
/// between candidates at identical distance.
pub const CANDIDATE_SQL: &str = "
SELECT * FROM everything WHERE id IN (
    SELECT feature_id
    FROM coordinates
    WHERE latitude BETWEEN :min_lat AND :max_lat
      AND longitude BETWEEN :min_lon AND :max_lon
    ORDER BY (
        (:lat - latitude) * (:lat - latitude) +
        (:lon - longitude) * (:lon - longitude) * :scale
    ) ASC, feature_id ASC
    LIMIT :limit
)";

/// Parameters bound into [`CANDIDATE_SQL`] for one lookup.
#[derive(Debug, Clone, Copy)]
pub struct CandidateQuery {
    pub point: CoordinateQuery,
    pub bbox: BoundingBox,
    pub limit: u32,
}

/// One open, read-only gazetteer connection.
///
/// The candidate statement lives in the connection's prepared-statement
/// cache, so it is parsed and planned once on open and reused by every
/// lookup. The connection is `Send` but not `Sync`: share it by moving it,
/// or put it behind a lock.
pub struct GazetteerStore {
    conn: Connection,
    path: String,
}

impl GazetteerStore {
    /// Open `path` read-only and prepare the candidate query.
    ///
    /// Fails with [`ResolveError::Connection`] if the file is missing, is not
    /// an SQLite database, or lacks the expected tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| ResolveError::connection(&display, e))?;

        conn.prepare_cached(CANDIDATE_SQL)
            .map_err(|e| ResolveError::connection(&display, e))?;

        Ok(Self {
            conn,
            path: display,
        })
    }

    /// Run the ranked box query and return the raw rows.
    ///
    /// Rows come back in the order SQLite produces them for the outer
    /// `id IN (...)` scan, which is not necessarily rank order when the limit
    /// is above one.
    pub fn candidates(&self, query: &CandidateQuery) -> Result<Vec<FeatureRow>> {
        let mut stmt = self.conn.prepare_cached(CANDIDATE_SQL)?;
        let column_count = stmt.column_count();

        let mut rows = stmt.query(named_params! {
            ":min_lat": query.bbox.min_lat,
            ":max_lat": query.bbox.max_lat,
            ":min_lon": query.bbox.min_lon,
            ":max_lon": query.bbox.max_lon,
            ":lat": query.point.latitude,
            ":lon": query.point.longitude,
            ":scale": query.point.scale,
            ":limit": i64::from(query.limit),
        })?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..column_count)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            out.push(FeatureRow::new(values));
        }

        Ok(out)
    }

    /// Number of rows in the feature table.
    pub fn feature_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM everything", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
