//! Nearest-feature resolution.
//!
//! A lookup computes the latitude's scale factor, asks the store for the
//! best-ranked rows inside a fixed box around the point, ranks them on their
//! stored coordinates and strictly decodes the closest one.

mod decode;
mod service;

pub use decode::decode_location;
pub use service::Resolver;
