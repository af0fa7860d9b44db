//! Region boundary extraction from GeoJSON feature collections.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::RegionIndex;
use crate::error::LoadError;
use crate::models::{NamedRegion, Point, Polygon, Ring};

/// Property keys tried in order when resolving a feature's name.
/// Datasets disagree on casing.
pub const NAME_KEYS: &[&str] = &["name", "NAME"];

/// Load a region index from a GeoJSON file on disk
pub fn load_regions<P: AsRef<Path>>(path: P) -> Result<RegionIndex, LoadError> {
    let path = path.as_ref();
    info!("Loading regions from {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::DatasetNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    // A path that opens but cannot be read (e.g. a directory) is still "not found"
    let value: Value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            LoadError::DatasetNotFound {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            LoadError::DatasetMalformed(e.to_string())
        }
    })?;

    extract_regions(&value).map(RegionIndex::new)
}

/// Load a region index from any reader yielding GeoJSON
pub fn read_regions<R: Read>(reader: R) -> Result<RegionIndex, LoadError> {
    let value: Value =
        serde_json::from_reader(reader).map_err(|e| LoadError::DatasetMalformed(e.to_string()))?;
    extract_regions(&value).map(RegionIndex::new)
}

/// Load a region index from an in-memory GeoJSON string
pub fn parse_regions(geojson: &str) -> Result<RegionIndex, LoadError> {
    read_regions(geojson.as_bytes())
}

/// Convert a FeatureCollection into named regions, preserving feature order.
///
/// Strict on the overall shape (an object with a `features` array), lenient per
/// feature: features without a usable name or geometry are skipped.
pub fn extract_regions(collection: &Value) -> Result<Vec<NamedRegion>, LoadError> {
    let features = collection
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            LoadError::DatasetMalformed("expected an object with a 'features' array".into())
        })?;

    let mut regions = Vec::with_capacity(features.len());
    let mut skipped = 0usize;

    for (i, feature) in features.iter().enumerate() {
        let Some(name) = resolve_name(feature.get("properties")) else {
            debug!("Skipping feature {}: no usable name", i);
            skipped += 1;
            continue;
        };

        let geometry = match feature.get("geometry") {
            Some(g) if !g.is_null() => g,
            _ => {
                debug!("Skipping feature {} ({}): missing geometry", i, name);
                skipped += 1;
                continue;
            }
        };

        match parse_geometry(geometry) {
            Ok(polygons) => regions.push(NamedRegion::new(name, polygons)),
            Err(e) => {
                debug!("Skipping feature {} ({}): {}", i, name, e);
                skipped += 1;
            }
        }
    }

    let polygon_count: usize = regions.iter().map(|r| r.polygons.len()).sum();
    info!(
        "Loaded {} regions ({} polygons), skipped {} features",
        regions.len(),
        polygon_count,
        skipped
    );

    Ok(regions)
}

/// First candidate key holding a string that is non-empty after trimming
pub fn resolve_name(properties: Option<&Value>) -> Option<String> {
    let properties = properties?;
    NAME_KEYS
        .iter()
        .filter_map(|key| properties.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

/// Polygon -> one part, MultiPolygon -> one part per member.
/// Any malformed part rejects the whole geometry.
fn parse_geometry(geometry: &Value) -> Result<Vec<Polygon>, LoadError> {
    let geo_type = geometry.get("type").and_then(Value::as_str).unwrap_or("");
    let coordinates = geometry
        .get("coordinates")
        .ok_or_else(|| LoadError::MalformedGeometry("missing coordinates".into()))?;

    match geo_type {
        "Polygon" => Ok(vec![parse_polygon(coordinates)?]),
        "MultiPolygon" => {
            let parts = as_array(coordinates, "multipolygon")?;
            if parts.is_empty() {
                return Err(LoadError::MalformedGeometry("empty multipolygon".into()));
            }
            parts.iter().map(parse_polygon).collect()
        }
        other => Err(LoadError::MalformedGeometry(format!(
            "unsupported geometry type '{}'",
            other
        ))),
    }
}

/// First ring is the exterior, the rest are holes
fn parse_polygon(rings: &Value) -> Result<Polygon, LoadError> {
    let rings = as_array(rings, "polygon")?;
    let (exterior, holes) = rings
        .split_first()
        .ok_or_else(|| LoadError::MalformedGeometry("polygon has no rings".into()))?;

    let exterior = parse_ring(exterior)?;
    let holes = holes.iter().map(parse_ring).collect::<Result<Vec<_>, _>>()?;

    Ok(Polygon::new(exterior, holes))
}

fn parse_ring(ring: &Value) -> Result<Ring, LoadError> {
    let mut points = as_array(ring, "ring")?
        .iter()
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()?;

    // Repeated positions add zero-length edges only
    points.dedup();

    // GeoJSON repeats the first position at the end
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let distinct = count_distinct(&points, 3);
    if distinct < 3 {
        return Err(LoadError::MalformedGeometry(format!(
            "ring has {} distinct points, need at least 3",
            distinct
        )));
    }

    Ok(Ring::new(points))
}

/// Number of distinct points, counting no further than `limit`
fn count_distinct(points: &[Point], limit: usize) -> usize {
    let mut seen: Vec<Point> = Vec::with_capacity(limit);
    for p in points {
        if !seen.contains(p) {
            seen.push(*p);
            if seen.len() == limit {
                break;
            }
        }
    }
    seen.len()
}

/// `[x, y]` or `[x, y, z]`; extra ordinates are ignored
fn parse_point(position: &Value) -> Result<Point, LoadError> {
    let coords = as_array(position, "position")?;
    match (
        coords.first().and_then(Value::as_f64),
        coords.get(1).and_then(Value::as_f64),
    ) {
        (Some(x), Some(y)) => Ok(Point::new(x, y)),
        _ => Err(LoadError::MalformedGeometry(format!(
            "invalid position {}",
            position
        ))),
    }
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, LoadError> {
    value
        .as_array()
        .ok_or_else(|| LoadError::MalformedGeometry(format!("{} is not an array", what)))
}
