use crate::core::adjust::adjust_xy;
use crate::core::codec::{Digits, digits_to_code, digits_to_xy, pow3, reread_digits, xy_to_digits};
use crate::core::grid::{Position, xy_to_plane};
use crate::core::projection::{LatLon, to_geo};

/// Canonical description of the cell at a lattice position.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub centroid: LatLon,
    pub position: Position,
    pub code: String,
}

/// Computes the centroid and canonical code for `position` at `level`.
///
/// Every path that turns a lattice position into a zone goes through here,
/// so encoding, decoding and ring expansion agree on codes for edge cells.
pub fn locate(position: Position, level: u8) -> Located {
    locate_digits(position, level).0
}

/// Folds `position` into the lattice, locates it, and then moves to the cell
/// its code decodes to.
///
/// The result is a fixed point: its code decodes to its own position. This
/// holds even for positions beyond the span the code digits can spell, which
/// occur near the poles and one ring past the antimeridian edge.
pub fn settle(position: Position, level: u8) -> Located {
    let precision = level as usize + 2;
    let (_, digits) = locate_digits(adjust_xy(position, level).position, level);
    let reread = digits_to_xy(&reread_digits(&digits), precision);
    locate(adjust_xy(reread, level).position, level)
}

fn locate_digits(position: Position, level: u8) -> (Located, Digits) {
    let mut centroid = to_geo(xy_to_plane(position, level));
    let mut position = position;

    let max_steps = pow3(level as usize + 2);
    if (position.x - position.y).abs() == max_steps {
        if position.x > position.y {
            position = position.swapped();
        }
        centroid.lon = -180.0;
    }

    let mut digits = xy_to_digits(position, level as usize + 2);

    // East of the prime meridian, leading triangles 7 and 3 are spelled 5 and 1.
    // parse_code maps them back.
    if centroid.lon == -180.0 || centroid.lon >= 0.0 {
        let tail_on_diagonal = digits.x[1] == digits.y[1] && digits.x[2] == digits.y[2];
        if tail_on_diagonal {
            let lead = match (digits.x[0], digits.y[0]) {
                (2, 1) => Some((1, 2)),
                (1, 0) => Some((0, 1)),
                _ => None,
            };
            if let Some((x, y)) = lead {
                digits.x[0] = x;
                digits.y[0] = y;
            }
        }
    }

    let located = Located {
        centroid,
        position,
        code: digits_to_code(&digits),
    };
    (located, digits)
}
