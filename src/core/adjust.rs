use crate::core::codec::pow3;
use crate::core::grid::Position;

/// Result of [`adjust_xy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjusted {
    pub position: Position,
    /// Set when a cell sitting exactly on the lattice edge had its axes swapped.
    pub reversed: bool,
}

/// Folds a decoded position back inside the lattice span for `level`.
///
/// The span is `|x - y| <= 3^(level + 2)`. A cell exactly on the edge is
/// canonicalized to `x < y`; a cell past it is wrapped across the
/// antimeridian by swapping its edge projection.
///
/// A single fold suffices for positions within
/// [`decodable_reach`](crate::core::codec::decodable_reach) of the origin,
/// which is every position a code can name. Check wider input with
/// [`check_position`](crate::core::grid::check_position) first.
pub fn adjust_xy(position: Position, level: u8) -> Adjusted {
    let Position { x, y } = position;
    let max_steps = pow3(level as usize + 2);
    let steps = (x - y).abs();

    if steps == max_steps && x > y {
        return Adjusted {
            position: position.swapped(),
            reversed: true,
        };
    }

    let position = if steps > max_steps {
        let diff = steps - max_steps;
        let diff_x = diff / 2;
        let diff_y = diff - diff_x;

        if x > y {
            let (edge_x, edge_y) = (y + diff_y, x - diff_x);
            Position::new(edge_x + diff_x, edge_y - diff_y)
        } else {
            let (edge_x, edge_y) = (y - diff_y, x + diff_x);
            Position::new(edge_x - diff_x, edge_y + diff_y)
        }
    } else {
        position
    };

    Adjusted {
        position,
        reversed: false,
    }
}
