pub mod adjust;
pub mod codec;
pub mod constants;
pub mod distance;
pub mod geometry;
pub mod grid;
pub mod lookup;
pub mod projection;
pub mod ring;

pub use adjust::{Adjusted, adjust_xy};
pub use codec::{
    Digits, decodable_reach, digits_to_code, digits_to_xy, parse_code, reread_digits, xy_to_digits,
};
pub use constants::{
    CODE_ALPHABET, EARTH_RADIUS_KM, H_BASE, H_DEG, H_K, MAX_LEVEL, PREFIX_RADIX, RING_RADIUS,
};
pub use distance::{great_circle_km, grid_distance_km};
pub use geometry::zone_outline;
pub use grid::{Position, check_level, check_position, hex_size, point_to_xy, xy_to_plane};
pub use lookup::{Located, locate, settle};
pub use projection::{LatLon, PlanePoint, to_geo, to_plane};
pub use ring::{DIRECTIONS, ring_at, ring_offsets};
