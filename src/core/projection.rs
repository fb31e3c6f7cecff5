//! Spherical Mercator transform between degrees and the projected plane.

use crate::core::constants::H_BASE;
use std::f64::consts::PI;

/// A point on the projected plane, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Projects a longitude/latitude pair onto the plane.
pub fn to_plane(lon: f64, lat: f64) -> PlanePoint {
    let x = lon * H_BASE / 180.0;
    let t = ((90.0 + lat) * PI / 360.0).tan();
    // tan reaches zero at the south pole; asinh(tan φ) is the same curve and stays finite.
    let y = if t > 0.0 {
        t.ln() / (PI / 180.0)
    } else {
        lat.to_radians().tan().asinh() / (PI / 180.0)
    };
    let y = y * H_BASE / 180.0;

    PlanePoint { x, y }
}

/// Inverse of [`to_plane`].
pub fn to_geo(point: PlanePoint) -> LatLon {
    let lon = (point.x / H_BASE) * 180.0;
    let lat = (point.y / H_BASE) * 180.0;
    let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);

    LatLon { lat, lon }
}
