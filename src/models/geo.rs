//! Query-side geometry: scale factor, bounding box and the corrected metric.

use std::f64::consts::PI;

use crate::error::{ResolveError, Result};

/// Longitude weight at a given latitude: `cos(latitude · π/180)²`.
///
/// Meridians converge toward the poles, so a degree of longitude covers less
/// ground at high latitude. The factor is 1.0 on the equator and ~0 at the
/// poles. Computed on `|latitude|` so that `+lat` and `-lat` agree bit for bit.
pub fn scale_factor(latitude: f64) -> f64 {
    (latitude.abs() * PI / 180.0).cos().powi(2)
}

/// Axis-aligned latitude/longitude rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Square box of `half_width` degrees on each side of the point.
    ///
    /// The box is deliberately not scaled by [`scale_factor`]; only the
    /// ranking metric is.
    pub fn around(latitude: f64, longitude: f64, half_width: f64) -> Self {
        Self {
            min_lat: latitude - half_width,
            max_lat: latitude + half_width,
            min_lon: longitude - half_width,
            max_lon: longitude + half_width,
        }
    }
}

/// One validated lookup request with its derived scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub scale: f64,
}

impl CoordinateQuery {
    /// Build a query, rejecting non-finite or out-of-range input.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(ResolveError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
            scale: scale_factor(latitude),
        })
    }

    pub fn bounding_box(&self, half_width: f64) -> BoundingBox {
        BoundingBox::around(self.latitude, self.longitude, half_width)
    }

    /// `(Δlat)² + (Δlon)² · scale`, the same expression the store ranks by.
    pub fn corrected_distance_sq(&self, latitude: f64, longitude: f64) -> f64 {
        let dlat = self.latitude - latitude;
        let dlon = self.longitude - longitude;
        dlat * dlat + dlon * dlon * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_one_on_equator() {
        assert_eq!(scale_factor(0.0), 1.0);
    }

    #[test]
    fn test_scale_vanishes_at_poles() {
        assert!(scale_factor(90.0).abs() < 1e-15);
        assert!(scale_factor(-90.0).abs() < 1e-15);
    }

    #[test]
    fn test_scale_is_symmetric() {
        for lat in [0.1, 12.5, 37.7749, 45.0, 66.5, 89.9] {
            assert_eq!(scale_factor(lat), scale_factor(-lat));
        }
    }

    #[test]
    fn test_scale_stays_in_unit_interval() {
        let mut lat = -90.0;
        while lat <= 90.0 {
            let s = scale_factor(lat);
            assert!((0.0..=1.0).contains(&s), "scale {s} at {lat}");
            lat += 0.5;
        }
    }

    #[test]
    fn test_scale_at_sixty_degrees() {
        assert!((scale_factor(60.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box_is_unscaled() {
        let q = CoordinateQuery::new(60.0, 10.0).unwrap();
        let bbox = q.bounding_box(1.5);
        assert_eq!(bbox.min_lat, 58.5);
        assert_eq!(bbox.max_lat, 61.5);
        assert_eq!(bbox.min_lon, 8.5);
        assert_eq!(bbox.max_lon, 11.5);
    }

    #[test]
    fn test_corrected_distance_weights_longitude() {
        let q = CoordinateQuery::new(60.0, 0.0).unwrap();
        // One degree east counts a quarter as much as one degree north at 60°.
        let east = q.corrected_distance_sq(60.0, 1.0);
        let north = q.corrected_distance_sq(61.0, 0.0);
        assert!((east - 0.25).abs() < 1e-12);
        assert_eq!(north, 1.0);
    }

    #[test]
    fn test_exact_match_has_zero_distance() {
        let q = CoordinateQuery::new(10.0, 20.0).unwrap();
        assert_eq!(q.corrected_distance_sq(10.0, 20.0), 0.0);
    }

    #[test]
    fn test_rejects_out_of_range_and_nan() {
        assert!(CoordinateQuery::new(90.5, 0.0).is_err());
        assert!(CoordinateQuery::new(0.0, -180.5).is_err());
        assert!(CoordinateQuery::new(f64::NAN, 0.0).is_err());
        assert!(CoordinateQuery::new(0.0, f64::INFINITY).is_err());
        assert!(CoordinateQuery::new(-90.0, 180.0).is_ok());
    }
}
