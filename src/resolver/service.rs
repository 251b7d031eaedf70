//! Resolver service for mapping a coordinate to its nearest feature.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use super::decode::rank_fields;
use super::decode_location;
use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::log::{Logger, TracingLogger};
use crate::models::{CoordinateQuery, LocationDescription};
use crate::store::{CandidateQuery, GazetteerStore};
use crate::{log_debug, log_info, log_warn};

/// Nearest-feature lookup over one gazetteer connection.
///
/// Lookups are synchronous and run on the caller's thread. A `Resolver` is
/// `Send` but not `Sync`; serialize access to a shared instance or open one
/// per concurrent caller.
pub struct Resolver {
    store: GazetteerStore,
    config: ResolverConfig,
    logger: Arc<dyn Logger>,
}

impl Resolver {
    /// Open a gazetteer with the default search box and the `tracing` logger.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ResolverConfig::default(), Arc::new(TracingLogger))
    }

    pub fn open_with(
        path: impl AsRef<Path>,
        config: ResolverConfig,
        logger: Arc<dyn Logger>,
    ) -> Result<Self> {
        config.validate()?;
        let store = GazetteerStore::open(path)?;

        log_info!(
            logger,
            "Opened gazetteer {} (half-width {}°, limit {})",
            store.path(),
            config.half_width_deg,
            config.max_candidates
        );

        Ok(Self {
            store,
            config,
            logger,
        })
    }

    /// Find the feature nearest to `(latitude, longitude)`.
    ///
    /// Returns [`ResolveError::NotFound`] when nothing lies inside the search
    /// box and [`ResolveError::InvalidRecord`] when the nearest row is
    /// malformed. The box is never widened and nothing is retried.
    pub fn resolve(&self, latitude: f64, longitude: f64) -> Result<LocationDescription> {
        let point = CoordinateQuery::new(latitude, longitude)?;
        let query = CandidateQuery {
            point,
            bbox: point.bounding_box(self.config.half_width_deg),
            limit: self.config.max_candidates,
        };

        let rows = self.store.candidates(&query)?;
        log_debug!(
            self.logger,
            "Lookup at ({}, {}) scale {:.6}: {} candidates",
            latitude,
            longitude,
            point.scale,
            rows.len()
        );

        // Rank on the stored id and coordinates alone. Rows whose ranking
        // cells are unreadable sort after every readable row.
        let best = rows
            .iter()
            .map(|row| {
                let key = rank_fields(row)
                    .map(|(id, lat, lon)| (point.corrected_distance_sq(lat, lon), id));
                (key, row)
            })
            .min_by(|(a, _), (b, _)| match (a, b) {
                (Some((da, ia)), Some((db, ib))) => da.total_cmp(db).then(ia.cmp(ib)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });

        let Some((_, row)) = best else {
            return Err(ResolveError::NotFound {
                latitude,
                longitude,
            });
        };

        let location = decode_location(row).map_err(|e| {
            log_warn!(
                self.logger,
                "Malformed row in {} near ({}, {}): {}",
                self.store.path(),
                latitude,
                longitude,
                e
            );
            e
        })?;

        log_debug!(
            self.logger,
            "Resolved ({}, {}) to {} [{}] at corrected distance² {:.6}",
            latitude,
            longitude,
            location.name,
            location.id,
            point.corrected_distance_sq(location.latitude, location.longitude)
        );
        Ok(location)
    }

    pub fn store(&self) -> &GazetteerStore {
        &self.store
    }
}
