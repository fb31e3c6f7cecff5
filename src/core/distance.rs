use crate::core::constants::EARTH_RADIUS_KM;
use crate::core::grid::Position;
use crate::core::projection::LatLon;

/// Haversine distance between two points, in kilometers.
pub fn great_circle_km(a: LatLon, b: LatLon) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Planar lattice distance scaled by `unit_size` meters, in kilometers.
///
/// Only meaningful for two positions at the same level that are close
/// together; the lattice is not equal-area.
pub fn grid_distance_km(a: Position, b: Position, unit_size: f64) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt() * unit_size / 1000.0
}
