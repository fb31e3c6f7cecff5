use crate::api::zone::Zone;
use crate::geom::parse::{parse_geometry, polygon_to_geojson, polygon_to_wkt};
use crate::util::error::GeohexError;
use geo::Centroid;
use geo_types::Geometry;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

/// Output format for zone outline geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text, e.g. `POLYGON((...))`
    Wkt,
    GeoJson,
}

/// Where each CSV row keeps its location.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column holding WKT or GeoJSON in lon/lat degrees.
    GeometryColumn(String),
    /// Separate longitude and latitude columns.
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Configuration for tagging CSV rows with zone codes.
#[derive(Debug, Clone)]
pub struct ZoneCsvConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub level: u8,
    pub include_position: bool,
    pub include_zone_geometry: Option<GeometryFormat>,
}

impl ZoneCsvConfig {
    /// Config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use geohex_rs::ZoneCsvConfig;
    ///
    /// let config = ZoneCsvConfig::new("geometry", 10);
    /// assert_eq!(config.level, 10);
    /// ```
    pub fn new(geometry_column: impl Into<String>, level: u8) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            level,
            include_position: false,
            include_zone_geometry: None,
        }
    }

    /// Config for a CSV with separate longitude and latitude columns.
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        level: u8,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            level,
            include_position: false,
            include_zone_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Also write `geohex_x` and `geohex_y`, the keys used for proximity
    /// ordering.
    pub fn with_position(mut self) -> Self {
        self.include_position = true;
        self
    }

    /// Also write the zone outline.
    pub fn with_zone_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_zone_geometry = Some(format);
        self
    }
}

pub trait CsvToZones {
    fn to_zone_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &ZoneCsvConfig,
    ) -> Result<(), GeohexError>;
}

impl<P: AsRef<Path>> CsvToZones for P {
    fn to_zone_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &ZoneCsvConfig,
    ) -> Result<(), GeohexError> {
        csv_to_zone_csv(self, output_path, config)
    }
}

fn geometry_to_zones(geom: Geometry<f64>, level: u8) -> Result<Vec<Zone>, GeohexError> {
    match geom {
        Geometry::Point(pt) => Ok(vec![Zone::from_wgs84(&pt, level)?]),
        Geometry::MultiPoint(mp) => mp
            .0
            .iter()
            .map(|pt| Zone::from_wgs84(pt, level))
            .collect(),
        Geometry::LineString(line) => Zone::from_line_string(&line, level),
        Geometry::MultiLineString(mls) => {
            let mut zones = Vec::new();
            for line in &mls.0 {
                zones.extend(Zone::from_line_string(line, level)?);
            }
            Ok(zones)
        }
        Geometry::Polygon(poly) => poly
            .centroid()
            .map(|c| Zone::from_wgs84(&c, level))
            .into_iter()
            .collect(),
        Geometry::MultiPolygon(mp) => mp
            .0
            .iter()
            .filter_map(|poly| poly.centroid())
            .map(|c| Zone::from_wgs84(&c, level))
            .collect(),
        Geometry::GeometryCollection(gc) => {
            let mut zones = Vec::new();
            for g in gc.0 {
                zones.extend(geometry_to_zones(g, level)?);
            }
            Ok(zones)
        }
        _ => Err(GeohexError::GeometryParseError(
            "Unsupported geometry type".to_string(),
        )),
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, GeohexError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| GeohexError::CsvError(format!("Column '{}' not found", name)))
}

fn parse_degrees(record: &csv::StringRecord, idx: usize) -> Result<f64, GeohexError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| GeohexError::CsvError(format!("Missing column at index {}", idx)))?
        .trim();
    raw.parse()
        .map_err(|_| GeohexError::CsvError(format!("Invalid coordinate: '{}'", raw)))
}

/// Converts a CSV of located records into a CSV tagged with zone codes.
///
/// Output columns are `geohex`, then `geohex_x`/`geohex_y` and
/// `geohex_geometry` when configured, then every input column not consumed
/// as a location or excluded. Rows are streamed. A row whose geometry yields
/// several zones (multipoints, lines) is written once per zone.
///
/// The first row that fails to parse or encode aborts the conversion with a
/// [`GeohexError::Row`] naming it.
///
/// ```no_run
/// use geohex_rs::{GeometryFormat, ZoneCsvConfig, csv_to_zone_csv};
///
/// let config = ZoneCsvConfig::from_coords("lng", "lat", 7)
///     .with_position()
///     .with_zone_geometry(GeometryFormat::Wkt);
///
/// csv_to_zone_csv("spots.csv", "spots_geohex.csv", &config).unwrap();
/// ```
pub fn csv_to_zone_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ZoneCsvConfig,
) -> Result<(), GeohexError> {
    let csv_path = csv_path.as_ref();
    let file = File::open(csv_path).map_err(|e| GeohexError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| GeohexError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = find_column(&headers, col)?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = find_column(&headers, lon_column)?;
            let lat_idx = find_column(&headers, lat_column)?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        match headers.iter().position(|h| h == col_name) {
            Some(idx) => {
                exclude_indices.insert(idx);
            }
            None => tracing::warn!(column = %col_name, "excluded column not in header"),
        }
    }

    let out_file = File::create(output_path).map_err(|e| GeohexError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["geohex"];
    if config.include_position {
        header_row.extend(["geohex_x", "geohex_y"]);
    }
    if config.include_zone_geometry.is_some() {
        header_row.push("geohex_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| GeohexError::CsvError(e.to_string()))?;

    tracing::info!(path = %csv_path.display(), level = config.level, "tagging csv rows with zones");

    let mut rows = 0usize;
    let mut written = 0usize;
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| GeohexError::CsvError(e.to_string()).at_row(row))?;

        let zones = match &source_indices {
            SourceIndices::Geometry(idx) => record
                .get(*idx)
                .ok_or_else(|| GeohexError::CsvError(format!("Missing geometry at index {}", idx)))
                .and_then(parse_geometry)
                .and_then(|geom| geometry_to_zones(geom, config.level)),
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                parse_degrees(&record, *lon_idx).and_then(|lon| {
                    let lat = parse_degrees(&record, *lat_idx)?;
                    Ok(vec![Zone::encode(lat, lon, config.level)?])
                })
            }
        }
        .map_err(|e| e.at_row(row))?;

        if zones.is_empty() {
            tracing::debug!(row, "row produced no zones");
        }

        for zone in zones {
            let mut out: Vec<String> = vec![zone.code().to_string()];

            if config.include_position {
                out.push(zone.x().to_string());
                out.push(zone.y().to_string());
            }

            if let Some(format) = config.include_zone_geometry {
                let polygon = zone.to_polygon();
                out.push(match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                });
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    out.push(field.to_string());
                }
            }
            writer
                .write_record(&out)
                .map_err(|e| GeohexError::CsvError(e.to_string()))?;
            written += 1;
        }
        rows += 1;
    }

    writer
        .flush()
        .map_err(|e| GeohexError::IoError(e.to_string()))?;

    tracing::info!(rows, written, "csv conversion finished");
    Ok(())
}
