//! Statepip - point-in-polygon lookup of named regions
//!
//! This library provides the region index, loader and HTTP router shared by
//! the query and lookup binaries.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pip;

pub use error::{LoadError, LookupError};
pub use models::{NamedRegion, Point, Polygon, Ring};
pub use pip::{load_regions, PipService, RegionIndex};
