//! Immutable region index and the containment scan.

use tracing::info;

use super::geometry::ContainsPoint;
use crate::models::{NamedRegion, Point};

/// Ordered, read-only set of named regions.
///
/// Built once at startup and shared by reference; nothing mutates it afterwards,
/// so concurrent lookups need no locking.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    regions: Vec<NamedRegion>,
}

impl RegionIndex {
    /// Build the index, keeping the given order as the match reporting order
    pub fn new(regions: Vec<NamedRegion>) -> Self {
        info!("Building region index for {} regions", regions.len());
        Self { regions }
    }

    /// Names of every region containing `point`, in index order.
    ///
    /// Linear scan; each polygon's cached bounding box rejects most regions
    /// before any ring is walked. A region is reported at most once however
    /// many of its parts contain the point. Boundary points are contained, so
    /// a point on a shared border matches both neighbours.
    pub fn find_matches(&self, point: Point) -> Vec<String> {
        self.regions
            .iter()
            .filter(|region| region.contains_point(point))
            .map(|region| region.name.clone())
            .collect()
    }

    /// Get total number of indexed regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Total polygon parts across all regions
    pub fn polygon_count(&self) -> usize {
        self.regions.iter().map(|r| r.polygons.len()).sum()
    }

    /// Iterate over all indexed regions
    pub fn regions(&self) -> impl Iterator<Item = &NamedRegion> {
        self.regions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }
}
