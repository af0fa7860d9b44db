use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::io::{Read, Write};

use statepip::PipService;

/// One input row, with coordinates kept as written so output echoes them verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct PointRow {
    pub latitude: String,
    pub longitude: String,
}

/// A resolved row. `regions` is `None` when the coordinates were rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRow {
    pub point: PointRow,
    pub regions: Option<Vec<String>>,
}

/// Read `latitude`/`longitude` columns from a headed CSV
pub fn read_points<R: Read>(reader: R) -> Result<Vec<PointRow>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();

    // Find column indices
    let lat_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("latitude"))
        .context("Column 'latitude' not found")?;
    let lon_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("longitude"))
        .context("Column 'longitude' not found")?;

    let mut points = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        points.push(PointRow {
            latitude: record.get(lat_idx).unwrap_or("").to_string(),
            longitude: record.get(lon_idx).unwrap_or("").to_string(),
        });
    }

    Ok(points)
}

/// Resolve all points in parallel; output order matches input order
pub fn resolve_points(
    service: &PipService,
    points: &[PointRow],
    pb: &ProgressBar,
) -> Vec<LookupRow> {
    points
        .par_iter()
        .map(|point| {
            let regions = match (point.latitude.parse::<f64>(), point.longitude.parse::<f64>()) {
                (Ok(lat), Ok(lon)) => service.lookup(lat, lon).ok(),
                _ => None,
            };
            pb.inc(1);
            LookupRow {
                point: point.clone(),
                regions,
            }
        })
        .collect()
}

/// Write `latitude,longitude,regions` with region names joined by `;`
pub fn write_rows<W: Write>(writer: W, rows: &[LookupRow]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(["latitude", "longitude", "regions"])?;

    for row in rows {
        let regions = row
            .regions
            .as_ref()
            .map(|names| names.join(";"))
            .unwrap_or_default();
        csv_writer.write_record([
            row.point.latitude.as_str(),
            row.point.longitude.as_str(),
            regions.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
