//! End-to-end containment tests against the bundled US states sample
//! and small hand-written datasets.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use statepip::pip::ContainsPoint;
use statepip::{load_regions, LoadError, NamedRegion, Point, Polygon, RegionIndex, Ring};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/us-states-sample.json")
}

fn states() -> RegionIndex {
    load_regions(fixture_path()).expect("fixture should load")
}

fn find(index: &RegionIndex, lat: f64, lon: f64) -> Vec<String> {
    index.find_matches(Point::from_lat_lon(lat, lon))
}

/// PA/NJ corner on the Delaware, read back from the loaded geometry so the
/// coordinates are bit-identical to the ring vertex
fn shared_vertex(index: &RegionIndex) -> Point {
    let pennsylvania = index.regions().next().unwrap();
    pennsylvania.polygons[0].exterior().points()[3]
}

fn write_dataset(geojson: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(geojson.as_bytes()).unwrap();
    file
}

#[test]
fn test_fixture_loads_named_features_only() {
    let index = states();
    assert_eq!(
        index.names().collect::<Vec<_>>(),
        vec!["Pennsylvania", "New Jersey", "Nevada", "Minnesota", "Hawaii"]
    );
    assert_eq!(index.polygon_count(), 6);
}

#[test]
fn test_find_states_basic() {
    let index = states();
    // Harrisburg, PA
    assert_eq!(find(&index, 40.2732, -76.8867), vec!["Pennsylvania"]);
    // Nevada uses the upper-case NAME key
    assert_eq!(find(&index, 39.0, -116.0), vec!["Nevada"]);
    // Gulf of Guinea
    assert!(find(&index, 0.0, 0.0).is_empty());
    assert_eq!(find(&index, 45.0, -93.0), vec!["Minnesota"]);
}

#[test]
fn test_near_delaware_river_is_new_jersey() {
    let index = states();
    let result = find(&index, 40.0, -75.0);
    assert!(result.contains(&"New Jersey".to_string()));
    assert!(!result.contains(&"Pennsylvania".to_string()));
}

#[test]
fn test_unnamed_feature_never_matches() {
    // Inside the unnamed Puerto Rico feature
    assert!(find(&states(), 18.2, -66.5).is_empty());
}

#[test]
fn test_multipart_region_matches_each_part() {
    let index = states();
    assert_eq!(find(&index, 21.3, -157.85), vec!["Hawaii"]);
    assert_eq!(find(&index, 19.7, -155.3), vec!["Hawaii"]);
    // Between the islands
    assert!(find(&index, 20.8, -156.8).is_empty());
}

#[test]
fn test_shared_border_vertex_matches_both() {
    let index = states();
    let vertex = shared_vertex(&index);
    assert_eq!(
        index.find_matches(vertex),
        vec!["Pennsylvania", "New Jersey"]
    );
}

#[test]
fn test_reversed_shared_edge_never_drops_a_point() {
    let a = Point::new(-75.13, 39.95);
    let b = Point::new(-75.05, 40.20);
    let index = RegionIndex::new(vec![
        NamedRegion::new(
            "West",
            vec![Polygon::new(
                Ring::new(vec![Point::new(-76.0, 39.95), a, b, Point::new(-76.0, 40.20)]),
                vec![],
            )],
        ),
        NamedRegion::new(
            "East",
            vec![Polygon::new(
                Ring::new(vec![Point::new(-74.0, 39.95), Point::new(-74.0, 40.20), b, a]),
                vec![],
            )],
        ),
    ]);

    let steps = 20_000;
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let p = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
        let matches = index.find_matches(p);
        // Exactly one side, or both when the point sits on the edge
        assert!(
            matches == vec!["West"] || matches == vec!["East"] || matches == vec!["West", "East"],
            "{:?} matched {:?}",
            p,
            matches
        );
    }
}

#[test]
fn test_outside_all_bounding_boxes() {
    let index = states();
    let boxes: Vec<_> = index.regions().filter_map(|r| r.bbox()).collect();
    for (lat, lon) in [(60.0, 10.0), (-45.0, 100.0), (-89.0, -179.0), (50.0, -60.0)] {
        let p = Point::from_lat_lon(lat, lon);
        assert!(boxes.iter().all(|bb| !bb.contains(p)));
        assert!(index.find_matches(p).is_empty());
    }
}

#[test]
fn test_repeated_lookups_are_stable() {
    let index = states();
    let first = find(&index, 40.2732, -76.8867);
    for _ in 0..10 {
        assert_eq!(find(&index, 40.2732, -76.8867), first);
        assert_eq!(
            index.find_matches(shared_vertex(&index)),
            vec!["Pennsylvania", "New Jersey"]
        );
    }
}

#[test]
fn test_concurrent_lookups_share_index() {
    let index = Arc::new(states());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let index = Arc::clone(&index);
            std::thread::spawn(move || {
                (0..100)
                    .map(|_| find(&index, 45.0, -93.0))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            assert_eq!(result, vec!["Minnesota"]);
        }
    }
}

#[test]
fn test_hole_subtracts_from_region() {
    let file = write_dataset(
        r#"{
          "type": "FeatureCollection",
          "features": [
            {
              "type": "Feature",
              "properties": { "name": "Ring County" },
              "geometry": {
                "type": "Polygon",
                "coordinates": [
                  [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                  [[4, 4], [6, 4], [6, 6], [4, 6], [4, 4]]
                ]
              }
            },
            {
              "type": "Feature",
              "properties": { "name": "Enclave" },
              "geometry": {
                "type": "Polygon",
                "coordinates": [[[4, 4], [6, 4], [6, 6], [4, 6], [4, 4]]]
              }
            }
          ]
        }"#,
    );
    let index = load_regions(file.path()).unwrap();

    assert_eq!(index.find_matches(Point::new(2.0, 2.0)), vec!["Ring County"]);
    assert_eq!(index.find_matches(Point::new(5.0, 5.0)), vec!["Enclave"]);
    // The hole's edge is the shared border
    assert_eq!(
        index.find_matches(Point::new(4.0, 5.0)),
        vec!["Ring County", "Enclave"]
    );
}

#[test]
fn test_overlapping_parts_reported_once() {
    let file = write_dataset(
        r#"{
          "type": "FeatureCollection",
          "features": [
            {
              "type": "Feature",
              "properties": { "NAME": "Twin Lakes" },
              "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                  [[[0, 0], [3, 0], [3, 3], [0, 3], [0, 0]]],
                  [[[1, 1], [4, 1], [4, 4], [1, 4], [1, 1]]]
                ]
              }
            }
          ]
        }"#,
    );
    let index = load_regions(file.path()).unwrap();
    assert_eq!(index.find_matches(Point::new(2.0, 2.0)), vec!["Twin Lakes"]);
}

#[test]
fn test_load_errors() {
    assert!(matches!(
        load_regions("/no/such/dir/us-states.json"),
        Err(LoadError::DatasetNotFound { .. })
    ));

    let file = write_dataset(r#"{ "type": "FeatureCollection" }"#);
    assert!(matches!(
        load_regions(file.path()),
        Err(LoadError::DatasetMalformed(_))
    ));

    let file = write_dataset("not json at all");
    assert!(matches!(
        load_regions(file.path()),
        Err(LoadError::DatasetMalformed(_))
    ));
}

/// Strictly interior/exterior grid points must agree with `geo::Contains`
#[test]
fn test_agrees_with_geo_contains() {
    use geo::{Contains, LineString, MultiPolygon, Polygon};

    let index = states();
    let to_line = |ring: &statepip::Ring| {
        LineString::from(ring.points().iter().map(|p| (p.x, p.y)).collect::<Vec<_>>())
    };

    for region in index.regions() {
        let oracle = MultiPolygon::new(
            region
                .polygons
                .iter()
                .map(|p| Polygon::new(to_line(p.exterior()), p.holes().iter().map(to_line).collect()))
                .collect(),
        );

        let mut lon = -159.013;
        while lon < -73.0 {
            let mut lat = 18.017;
            while lat < 50.0 {
                let p = Point::new(lon, lat);
                assert_eq!(
                    region.contains_point(p),
                    oracle.contains(&geo::Point::new(lon, lat)),
                    "{} disagrees at ({}, {})",
                    region.name,
                    lat,
                    lon
                );
                lat += 0.373;
            }
            lon += 0.419;
        }
    }
}
