//! Point-in-Polygon (PIP) region lookup.
//!
//! Loads named region boundaries from GeoJSON and answers which regions
//! contain a point using a bounding-box pre-filter plus ray casting.

mod boundary;
mod geometry;
mod index;
mod service;

pub use boundary::{
    extract_regions, load_regions, parse_regions, read_regions, resolve_name, NAME_KEYS,
};
pub use geometry::{locate, ContainsPoint, RingPosition};
pub use index::RegionIndex;
pub use service::{valid_coordinates, PipService};
