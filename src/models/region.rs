//! Named region type produced by the loader.

use super::geometry::{BoundingBox, Polygon};

/// A named, possibly multi-part region (e.g. a state with offshore islands)
#[derive(Debug, Clone)]
pub struct NamedRegion {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl NamedRegion {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        Self {
            name: name.into(),
            polygons,
        }
    }

    /// Bounding box over all parts
    pub fn bbox(&self) -> Option<BoundingBox> {
        let mut parts = self.polygons.iter().map(|p| *p.bbox());
        let first = parts.next()?;
        Some(parts.fold(first, |acc, bb| acc.merge(&bb)))
    }
}
