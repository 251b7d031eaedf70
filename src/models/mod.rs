//! Core data models for gazetteer lookups.

pub mod geo;
pub mod location;

pub use geo::{scale_factor, BoundingBox, CoordinateQuery};
pub use location::LocationDescription;
