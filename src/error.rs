//! Error types for gazetteer lookups.

use thiserror::Error;

/// Errors surfaced by [`crate::Resolver`] and [`crate::store::GazetteerStore`].
///
/// `NotFound` is an expected outcome for sparse regions, while
/// `InvalidRecord` means the dataset itself is corrupt or has drifted from
/// the schema. Callers usually treat the two very differently.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The dataset could not be opened or the candidate query could not be prepared
    #[error("failed to open gazetteer at {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// No feature fell inside the search box
    #[error("no feature found near ({latitude}, {longitude})")]
    NotFound { latitude: f64, longitude: f64 },

    /// A candidate row was missing a required column or held the wrong type
    #[error("invalid feature record: column `{column}` {reason}")]
    InvalidRecord {
        column: &'static str,
        reason: String,
    },

    /// Input coordinate was not finite or outside the geographic range
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// The store failed while executing the prepared query
    #[error("gazetteer query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("invalid resolver configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

impl ResolveError {
    pub(crate) fn connection(path: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Connection {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_record(column: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            column,
            reason: reason.into(),
        }
    }

    /// True for the "no data here" outcome, as opposed to a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
