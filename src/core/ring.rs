use crate::core::constants::RING_RADIUS;
use crate::core::grid::Position;
use std::collections::{HashSet, VecDeque};
use std::sync::OnceLock;

/// Unit steps between adjacent cells.
pub const DIRECTIONS: [Position; 6] = [
    Position::new(1, 0),
    Position::new(1, -1),
    Position::new(0, -1),
    Position::new(-1, 0),
    Position::new(-1, 1),
    Position::new(0, 1),
];

static RING_OFFSETS: OnceLock<Vec<Position>> = OnceLock::new();

/// Offsets of every cell exactly [`RING_RADIUS`] steps from the origin,
/// ordered by `x² + y²`.
///
/// Computed on first use and shared afterwards.
pub fn ring_offsets() -> &'static [Position] {
    RING_OFFSETS.get_or_init(|| ring_at(RING_RADIUS))
}

/// Breadth-first ring of the cells first reached at exactly `radius` steps.
///
/// Ties in squared distance keep discovery order.
pub fn ring_at(radius: usize) -> Vec<Position> {
    let origin = Position::default();
    let mut visited: HashSet<Position> = HashSet::from([origin]);
    let mut queue: VecDeque<(Position, usize)> = VecDeque::from([(origin, 0)]);
    let mut ring = Vec::with_capacity(6 * radius.max(1));

    while let Some((position, depth)) = queue.pop_front() {
        if depth == radius {
            ring.push(position);
            continue;
        }

        for step in DIRECTIONS {
            let next = position + step;
            if visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    ring.sort_by_key(|p| p.x * p.x + p.y * p.y);
    ring
}
