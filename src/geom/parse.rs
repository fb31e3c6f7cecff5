use crate::util::error::GeohexError;
use geo_types::{Geometry, Polygon};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a geometry cell from a CSV row, auto-detecting WKT or GeoJSON.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, GeohexError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or feature.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, GeohexError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| GeohexError::GeometryParseError(e.to_string()))?;

    let geometry = match geojson {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat.geometry.ok_or_else(|| {
            GeohexError::GeometryParseError("Feature has no geometry".to_string())
        })?,
        GeoJson::FeatureCollection(_) => {
            return Err(GeohexError::GeometryParseError(
                "FeatureCollection not supported, use one geometry per row".to_string(),
            ));
        }
    };

    Geometry::try_from(geometry).map_err(|e| GeohexError::GeometryParseError(e.to_string()))
}

pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, GeohexError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| GeohexError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        GeohexError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    geojson::Geometry::from(polygon).to_string()
}
