use crate::core::constants::H_DEG_60_TAN;
use crate::core::grid::hex_size;
use crate::core::projection::{LatLon, PlanePoint, to_geo, to_plane};
use geo_types::{Coord, LineString, Polygon};

/// Builds the outline of the cell centered on `centroid` at `level`.
///
/// Vertices run left, top-left, top-right, right, bottom-right,
/// bottom-left, in (lon, lat) degrees. The ring is closed.
pub fn zone_outline(centroid: LatLon, level: u8) -> Polygon<f64> {
    let center = to_plane(centroid.lon, centroid.lat);
    let size = hex_size(level);
    let at = |dx: f64, dy: f64| {
        to_geo(PlanePoint {
            x: center.x + dx,
            y: center.y + dy,
        })
    };

    let top = at(0.0, H_DEG_60_TAN * size).lat;
    let bottom = at(0.0, -H_DEG_60_TAN * size).lat;
    let left = at(-2.0 * size, 0.0).lon;
    let right = at(2.0 * size, 0.0).lon;
    let center_left = at(-size, 0.0).lon;
    let center_right = at(size, 0.0).lon;

    let mut coords = vec![
        Coord { x: left, y: centroid.lat },
        Coord { x: center_left, y: top },
        Coord { x: center_right, y: top },
        Coord { x: right, y: centroid.lat },
        Coord { x: center_right, y: bottom },
        Coord { x: center_left, y: bottom },
    ];
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}
