use crate::api::zone::Zone;
use crate::core::grid::Position;

/// Orders records by hex distance from `target` and keeps the closest `limit`.
///
/// `key` returns the stored lattice position of a record, as persisted next
/// to its zone code. Records at equal distance keep their input order.
/// Positions only compare meaningfully when they were computed at the
/// target's level.
///
/// # Example
/// ```
/// use geohex_rs::{Zone, nearest_by_position};
///
/// # fn main() -> Result<(), geohex_rs::GeohexError> {
/// let stations = vec![
///     ("Shinjuku", Zone::encode(35.689729, 139.700464, 10)?.position()),
///     ("Tokyo", Zone::encode(35.681236, 139.767125, 10)?.position()),
/// ];
/// let here = Zone::encode(35.6812, 139.7671, 10)?;
///
/// let nearest = nearest_by_position(stations, |s| s.1, &here, 1);
/// assert_eq!(nearest[0].0, "Tokyo");
/// # Ok(())
/// # }
/// ```
pub fn nearest_by_position<T, F>(mut items: Vec<T>, key: F, target: &Zone, limit: usize) -> Vec<T>
where
    F: Fn(&T) -> Position,
{
    let origin = target.position();
    items.sort_by_cached_key(|item| key(item).manhattan_distance(&origin));
    items.truncate(limit);
    items
}
