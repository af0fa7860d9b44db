//! Core data models for region containment.

pub mod geometry;
pub mod region;

pub use geometry::{BoundingBox, Point, Polygon, Ring};
pub use region::NamedRegion;
