//! Error types for dataset loading and point lookups.

use std::path::PathBuf;

/// Errors raised while loading a boundary dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Dataset file is missing or unreadable
    #[error("Could not read dataset '{}': {source}", .path.display())]
    DatasetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset does not have the FeatureCollection shape
    #[error("Malformed dataset: {0}")]
    DatasetMalformed(String),

    /// A single feature's geometry is unusable. Skipped by the loader.
    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),
}

/// Public source for a US-states boundary file in the expected format
pub const US_STATES_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";

impl LoadError {
    /// Remediation text for fatal startup errors, if there is one
    pub fn hint(&self) -> Option<String> {
        match self {
            LoadError::DatasetNotFound { path, .. } => Some(format!(
                "Please download a US-states GeoJSON (e.g. from {}) and save it as '{}'",
                US_STATES_GEOJSON_URL,
                path.display()
            )),
            _ => None,
        }
    }
}

/// Errors raised by [`crate::pip::PipService::lookup`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("latitude or longitude out of bounds: ({latitude}, {longitude})")]
    OutOfBounds { latitude: f64, longitude: f64 },
}
