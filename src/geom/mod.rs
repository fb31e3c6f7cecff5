pub mod parse;

pub use parse::{parse_geojson, parse_geometry, parse_wkt, polygon_to_geojson, polygon_to_wkt};
