use crate::core::codec::decodable_reach;
use crate::core::constants::{H_BASE, H_K, MAX_LEVEL};
use crate::core::projection::{PlanePoint, to_plane};
use crate::util::error::GeohexError;

/// Integer lattice address of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// `|Δx| + |Δy|`, the ordering key used for "nearest by grid distance" queries.
    pub fn manhattan_distance(&self, other: &Position) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub(crate) fn swapped(self) -> Self {
        Self::new(self.y, self.x)
    }
}

impl std::ops::Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

pub fn check_level(level: u8) -> Result<(), GeohexError> {
    if level > MAX_LEVEL {
        return Err(GeohexError::InvalidLevel(level));
    }
    Ok(())
}

/// Rejects positions a code at `level` cannot spell.
///
/// Call after [`check_level`].
pub fn check_position(position: Position, level: u8) -> Result<(), GeohexError> {
    let span = -decodable_reach(level)..=decodable_reach(level);
    if !span.contains(&position.x) || !span.contains(&position.y) {
        return Err(GeohexError::PositionOutOfRange {
            x: position.x,
            y: position.y,
            level,
        });
    }
    Ok(())
}

/// Edge length of a cell at `level`, in projected meters.
pub fn hex_size(level: u8) -> f64 {
    H_BASE / 3.0_f64.powi(level as i32 + 3)
}

/// Lattice step lengths `(unit_x, unit_y)` along the two skewed axes.
fn lattice_units(level: u8) -> (f64, f64) {
    let h_size = hex_size(level);
    (6.0 * h_size, 6.0 * h_size * H_K)
}

/// Converts a lattice position to the projected centroid of its cell.
pub fn xy_to_plane(position: Position, level: u8) -> PlanePoint {
    let (unit_x, unit_y) = lattice_units(level);
    let (x, y) = (position.x as f64, position.y as f64);

    let h_lat = (H_K * x * unit_x + y * unit_y) / 2.0;
    let h_lon = (h_lat - y * unit_y) / H_K;

    PlanePoint { x: h_lon, y: h_lat }
}

/// Finds the lattice position of the cell containing a lon/lat point.
///
/// Points in the triangular overlap between two candidate cells are resolved
/// by the rounding overrides below, and cells within one hex of the eastern
/// edge of the plane get their axes swapped onto the western side.
pub fn point_to_xy(lon: f64, lat: f64, level: u8) -> Position {
    let h_size = hex_size(level);
    let (unit_x, unit_y) = lattice_units(level);

    let grid = to_plane(lon, lat);
    let pos_x = (grid.x + grid.y / H_K) / unit_x;
    let pos_y = (grid.y - H_K * grid.x) / unit_y;

    let x0 = pos_x.floor();
    let y0 = pos_y.floor();
    let qx = pos_x - x0;
    let qy = pos_y - y0;

    let (mut x, mut y) = (pos_x.round(), pos_y.round());
    if qy > -qx + 1.0 {
        if qy < 2.0 * qx && qy > 0.5 * qx {
            x = x0 + 1.0;
            y = y0 + 1.0;
        }
    } else if qy < -qx + 1.0 && qy > 2.0 * qx - 1.0 && qy < 0.5 * qx + 0.5 {
        x = x0;
        y = y0;
    }

    let position = Position::new(x as i64, y as i64);
    let centroid = xy_to_plane(position, level);
    if H_BASE - centroid.x < h_size {
        position.swapped()
    } else {
        position
    }
}
