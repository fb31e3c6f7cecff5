/// Half of the projected equatorial circumference, in meters.
pub const H_BASE: f64 = 20037508.34;

/// Skew angle of the lattice axes (30 degrees) in radians.
pub const H_DEG: f64 = std::f64::consts::PI * (30.0 / 180.0);

/// `tan(H_DEG)`.
pub const H_K: f64 = 0.5773502691896257;

/// `tan(60°)`, used for the vertical half-extent of a cell outline.
pub(crate) const H_DEG_60_TAN: f64 = 1.7320508075688767;

/// Symbols used for the two-character code prefix.
///
/// Only the first [`PREFIX_RADIX`] symbols are ever produced.
pub const CODE_ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Radix of each prefix character.
pub const PREFIX_RADIX: usize = 30;

/// Maximum level (0-15)
pub const MAX_LEVEL: u8 = 15;

/// Mean Earth radius used for great-circle distances, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Hex-distance of the neighbor ring returned by `Zone::ring`.
pub const RING_RADIUS: usize = 3;
