//! SQLite-backed spatial index store.
//!
//! The gazetteer is a single SQLite file with two tables: `everything`
//! (one row per feature) and `coordinates` (feature id + lat/lon, indexed for
//! range scans). Lookups only ever open it read-only; [`GazetteerWriter`]
//! exists to build new files.

mod gazetteer;
mod row;
mod schema;

pub use gazetteer::{CandidateQuery, GazetteerStore, CANDIDATE_SQL};
pub use row::{column, FeatureRow};
pub use schema::{FeatureRecord, GazetteerWriter, INDEX_SQL, SCHEMA_SQL};
