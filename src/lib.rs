//! revgeo - nearest-place reverse geocoding over an SQLite gazetteer
//!
//! Given a latitude/longitude, finds the closest feature in a pre-built
//! gazetteer using a bounding-box prefilter and a latitude-corrected squared
//! distance. This library is shared by the `query` and `ingest` binaries.
//!
//! ```no_run
//! use revgeo::Resolver;
//!
//! let resolver = Resolver::open("cities.sqlite")?;
//! let place = resolver.resolve(47.3769, 8.5417)?;
//! println!("{place}");
//! # Ok::<(), revgeo::ResolveError>(())
//! ```

pub mod config;
pub mod error;
pub mod log;
pub mod models;
pub mod resolver;
pub mod store;

pub use config::{Config, ResolverConfig};
pub use error::{ResolveError, Result};
pub use models::{BoundingBox, CoordinateQuery, LocationDescription};
pub use resolver::Resolver;
