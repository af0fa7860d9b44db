//! PIP service for looking up the regions containing a lat/lon.

use tracing::debug;

use super::RegionIndex;
use crate::error::LookupError;
use crate::models::Point;

pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LON_RANGE: (f64, f64) = (-180.0, 180.0);

/// Point-in-Polygon lookup service
pub struct PipService {
    index: RegionIndex,
}

impl PipService {
    /// Create a new PIP service from a loaded region index
    pub fn new(index: RegionIndex) -> Self {
        Self { index }
    }

    /// Validate coordinate ranges, then return every region containing the point
    pub fn lookup(&self, latitude: f64, longitude: f64) -> Result<Vec<String>, LookupError> {
        if !valid_coordinates(latitude, longitude) {
            return Err(LookupError::OutOfBounds {
                latitude,
                longitude,
            });
        }

        let matched = self
            .index
            .find_matches(Point::from_lat_lon(latitude, longitude));

        debug!(
            "PIP lookup at ({}, {}): {} regions",
            latitude,
            longitude,
            matched.len()
        );

        Ok(matched)
    }

    /// Get the region index (for stats/health)
    pub fn index(&self) -> &RegionIndex {
        &self.index
    }
}

/// Latitude in [-90, 90] and longitude in [-180, 180]; NaN fails both
pub fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    (LAT_RANGE.0..=LAT_RANGE.1).contains(&latitude)
        && (LON_RANGE.0..=LON_RANGE.1).contains(&longitude)
}
