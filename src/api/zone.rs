use crate::core::adjust::adjust_xy;
use crate::core::codec::{digits_to_xy, parse_code};
use crate::core::distance::{great_circle_km, grid_distance_km};
use crate::core::geometry::zone_outline;
use crate::core::grid::{Position, check_level, check_position, hex_size, point_to_xy};
use crate::core::lookup::{Located, locate, settle};
use crate::core::projection::{LatLon, PlanePoint, to_geo, to_plane};
use crate::core::ring::ring_offsets;
use crate::util::coord::{Coordinate, check_wgs84};
use crate::util::error::GeohexError;
use geo_types::{LineString, Point, Polygon};
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A single GeoHex cell.
///
/// A zone is an immutable value: every constructor computes it fresh from
/// the codec, and two zones are equal when their level and lattice position
/// match (which is equivalent to their codes matching).
///
/// # Example
///
/// ```
/// use geohex_rs::Zone;
///
/// # fn main() -> Result<(), geohex_rs::GeohexError> {
/// let zone = Zone::encode(35.681236, 139.767125, 10)?;
/// assert_eq!(zone.code(), "XM4885487361");
///
/// let same = Zone::decode(zone.code())?.expect("non-empty code");
/// assert_eq!(zone, same);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Zone {
    code: String,
    latitude: f64,
    longitude: f64,
    level: u8,
    position: Position,
}

impl Zone {
    fn from_located(located: Located, level: u8) -> Self {
        Self {
            code: located.code,
            latitude: located.centroid.lat,
            longitude: located.centroid.lon,
            level,
            position: located.position,
        }
    }

    fn settled(position: Position, level: u8) -> Self {
        Self::from_located(settle(position, level), level)
    }

    /// Finds the zone containing a latitude/longitude at `level` (0-15).
    ///
    /// Bounds are inclusive. Fails with a range error for anything outside
    /// them, including NaN.
    pub fn encode(latitude: f64, longitude: f64, level: u8) -> Result<Self, GeohexError> {
        check_wgs84(latitude, longitude)?;
        check_level(level)?;

        let position = point_to_xy(longitude, latitude, level);
        Ok(Self::settled(position, level))
    }

    /// Finds the zone containing a WGS84 coordinate given as (lon, lat).
    ///
    /// # Example
    /// ```
    /// use geohex_rs::Zone;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), geohex_rs::GeohexError> {
    /// let from_tuple = Zone::from_wgs84(&(139.767125, 35.681236), 7)?;
    /// let from_point = Zone::from_wgs84(&Point::new(139.767125, 35.681236), 7)?;
    /// assert_eq!(from_tuple, from_point);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate, level: u8) -> Result<Self, GeohexError> {
        Self::encode(coord.y(), coord.x(), level)
    }

    /// Decodes a zone code.
    ///
    /// An absent, empty, or whitespace-only code yields `Ok(None)`. Codes with
    /// characters outside the alphabet or an impossible length are errors.
    ///
    /// # Example
    /// ```
    /// use geohex_rs::Zone;
    ///
    /// # fn main() -> Result<(), geohex_rs::GeohexError> {
    /// let zone = Zone::decode("XM488548")?.expect("non-empty code");
    /// assert_eq!(zone.level(), 6);
    ///
    /// assert!(Zone::decode("")?.is_none());
    /// assert!(Zone::decode(None::<&str>)?.is_none());
    /// assert!(Zone::decode("XM4!").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn decode<'a>(code: impl Into<Option<&'a str>>) -> Result<Option<Self>, GeohexError> {
        let Some(code) = code.into().filter(|c| !c.trim().is_empty()) else {
            return Ok(None);
        };

        let (level, nonary) = parse_code(code).inspect_err(|e| {
            tracing::debug!(code, error = %e, "rejected zone code");
        })?;
        let position = digits_to_xy(&nonary, level as usize + 2);
        let adjusted = adjust_xy(position, level);

        Ok(Some(Self::from_located(locate(adjusted.position, level), level)))
    }

    /// Builds the zone at lattice position `(x, y)`.
    ///
    /// Positions past the antimeridian edge of the lattice are wrapped first.
    /// Positions whose coordinates exceed what a code at `level` can spell
    /// are rejected with [`GeohexError::PositionOutOfRange`].
    pub fn from_xy(x: i64, y: i64, level: u8) -> Result<Self, GeohexError> {
        check_level(level)?;
        let position = Position::new(x, y);
        check_position(position, level)?;
        Ok(Self::settled(position, level))
    }

    /// Returns the unique zones a lon/lat line passes through, in order.
    ///
    /// The line is walked in the projected plane at half a cell edge per
    /// step, so no crossed cell is skipped.
    pub fn from_line_string(line: &LineString<f64>, level: u8) -> Result<Vec<Self>, GeohexError> {
        check_level(level)?;
        for c in line.coords() {
            check_wgs84(c.y, c.x)?;
        }

        let step_size = hex_size(level) * 0.5;
        let projected: Vec<PlanePoint> = line.coords().map(|c| to_plane(c.x, c.y)).collect();

        let mut seen: HashSet<Position> = HashSet::new();
        let mut zones = Vec::new();
        let mut visit = |point: PlanePoint| -> Result<(), GeohexError> {
            let geo = to_geo(point);
            let zone = Self::encode(geo.lat.clamp(-90.0, 90.0), geo.lon.clamp(-180.0, 180.0), level)?;
            if seen.insert(zone.position) {
                zones.push(zone);
            }
            Ok(())
        };

        if let [only] = projected.as_slice() {
            visit(*only)?;
        }
        for window in projected.windows(2) {
            let (start, end) = (window[0], window[1]);
            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let steps = ((dx * dx + dy * dy).sqrt() / step_size).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
                visit(PlanePoint {
                    x: start.x + t * dx,
                    y: start.y + t * dy,
                })?;
            }
        }

        Ok(zones)
    }

    /// The 18 zones exactly three steps away, nearest offsets first.
    pub fn ring(&self) -> Vec<Zone> {
        ring_offsets()
            .iter()
            .map(|&offset| Self::settled(self.position + offset, self.level))
            .collect()
    }

    /// Great-circle distance between the two centroids, in kilometers.
    pub fn distance_to(&self, other: &Zone) -> f64 {
        great_circle_km(self.centroid(), other.centroid())
    }

    /// Great-circle distance to the zone named by `code`, in kilometers.
    ///
    /// Absent or blank codes yield `Ok(None)`.
    pub fn distance_to_code<'a>(
        &self,
        code: impl Into<Option<&'a str>>,
    ) -> Result<Option<f64>, GeohexError> {
        Ok(Self::decode(code)?.map(|other| self.distance_to(&other)))
    }

    /// Planar lattice distance in kilometers, scaled by this zone's unit size.
    ///
    /// Only meaningful for nearby zones at the same level.
    pub fn grid_distance_to(&self, other: &Zone) -> f64 {
        grid_distance_km(self.position, other.position, self.unit_size())
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Latitude of the cell centroid.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude of the cell centroid.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn x(&self) -> i64 {
        self.position.x
    }

    pub fn y(&self) -> i64 {
        self.position.y
    }

    /// Lattice position, the key record stores sort on for proximity.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Edge length of this zone's cells in meters.
    pub fn unit_size(&self) -> f64 {
        hex_size(self.level)
    }

    /// Centroid as a `Point` (x = lon, y = lat).
    pub fn center(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    fn centroid(&self) -> LatLon {
        LatLon {
            lat: self.latitude,
            lon: self.longitude,
        }
    }

    /// Converts this zone to its hexagonal outline in lon/lat degrees.
    pub fn to_polygon(&self) -> Polygon<f64> {
        zone_outline(self.centroid(), self.level)
    }
}

/// Encodes many (lon, lat) coordinates in parallel, preserving order.
///
/// Fails with the first error encountered.
pub fn encode_batch<C>(coords: &[C], level: u8) -> Result<Vec<Zone>, GeohexError>
where
    C: Coordinate + Sync,
{
    check_level(level)?;
    coords
        .par_iter()
        .map(|coord| Zone::from_wgs84(coord, level))
        .collect()
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.position == other.position
    }
}

impl Eq for Zone {}

impl Hash for Zone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level.hash(state);
        self.position.hash(state);
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for Zone {
    type Err = GeohexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::decode(s)?.ok_or_else(|| GeohexError::MalformedCode("blank code".to_string()))
    }
}

impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Zone", 7)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("latitude", &self.latitude)?;
        state.serialize_field("longitude", &self.longitude)?;
        state.serialize_field("level", &self.level)?;
        state.serialize_field("x", &self.position.x)?;
        state.serialize_field("y", &self.position.y)?;
        state.serialize_field("unit_size", &self.unit_size())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO_STATION: (f64, f64) = (35.681236, 139.767125);

    #[test]
    fn test_tokyo_station_golden() -> Result<(), GeohexError> {
        let (lat, lon) = TOKYO_STATION;
        let zone = Zone::encode(lat, lon, 10)?;

        assert_eq!(zone.code(), "XM4885487361");
        assert_eq!(zone.position(), Position::new(304103, -108552));
        assert_eq!(zone.level(), 10);
        assert!((zone.latitude() - 35.68123014).abs() < 1e-6);
        assert!((zone.longitude() - 139.76697319).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_fixture_battery() -> Result<(), GeohexError> {
        let fixtures: &[(f64, f64, u8, &str)] = &[
            (35.681236, 139.767125, 0, "XM"),
            (35.681236, 139.767125, 5, "XM48854"),
            (35.681236, 139.767125, 15, "XM488548736162722"),
            (0.0, 0.0, 0, "OY"),
            (0.0, 0.0, 15, "OY444444444444444"),
            (51.5074, -0.1278, 10, "QE0166623003"),
            (40.7128, -74.006, 10, "PF3817281274"),
            (-33.8688, 151.2093, 10, "MW6143286546"),
            (-17.7134, 178.065, 10, "GI0543865521"),
            (-13.759, -172.1046, 10, "GI3751084122"),
            (-77.8419, 166.6863, 10, "EU2088878252"),
            (-0.1807, -78.4678, 10, "OG4460868154"),
            (0.0, 180.0, 3, "PQ666"),
            (0.0, -180.0, 3, "PQ666"),
            (0.0, 180.0, 5, "QU00000"),
            (0.0, -180.0, 5, "GI88888"),
        ];

        for &(lat, lon, level, expected) in fixtures {
            let zone = Zone::encode(lat, lon, level)?;
            assert_eq!(zone.code(), expected, "({lat}, {lon}) at level {level}");
        }
        Ok(())
    }

    #[test]
    fn test_range_validation() {
        assert_eq!(
            Zone::encode(91.0, 0.0, 5),
            Err(GeohexError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Zone::encode(0.0, 181.0, 5),
            Err(GeohexError::LongitudeOutOfRange(181.0))
        );
        assert_eq!(Zone::encode(0.0, 0.0, 16), Err(GeohexError::InvalidLevel(16)));
        assert!(Zone::encode(f64::NAN, 0.0, 5).is_err_and(|e| e.is_range_error()));
    }

    #[test]
    fn test_bounds_are_inclusive() -> Result<(), GeohexError> {
        let north_east = Zone::encode(90.0, 180.0, 0)?;
        let south_west = Zone::encode(-90.0, -180.0, 15)?;

        assert_eq!(north_east.code().len(), 2);
        assert_eq!(south_west.code().len(), 17);
        Ok(())
    }

    #[test]
    fn test_code_length_tracks_level() -> Result<(), GeohexError> {
        for level in 0..=15u8 {
            let zone = Zone::encode(35.0, 135.0, level)?;
            assert_eq!(zone.code().len(), level as usize + 2);
        }
        Ok(())
    }

    #[test]
    fn test_roundtrip_grid() -> Result<(), GeohexError> {
        for level in 0..=15u8 {
            for i in 0..=72 {
                let lat = -90.0 + 2.5 * i as f64;
                for j in 0..=48 {
                    let lon = -180.0 + 7.5 * j as f64;

                    let zone = Zone::encode(lat, lon, level)?;
                    let decoded = Zone::decode(zone.code())?.expect("encoded code is non-empty");

                    assert_eq!(decoded.code(), zone.code(), "({lat}, {lon}) at level {level}");
                    assert_eq!(decoded.level(), level);
                    assert_eq!(decoded, zone);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_decode_is_idempotent_near_poles() -> Result<(), GeohexError> {
        for level in 0..=15u8 {
            for lat in [90.0, -90.0, 89.0, -89.0, 85.0, -85.0] {
                for lon in [-180.0, -90.0, 0.0, 45.0, 180.0] {
                    let code = Zone::encode(lat, lon, level)?.code().to_string();
                    let once = Zone::decode(code.as_str())?.expect("non-empty");
                    let twice = Zone::decode(once.code())?.expect("non-empty");
                    assert_eq!(once.code(), twice.code());
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_decode_blank_input() -> Result<(), GeohexError> {
        assert_eq!(Zone::decode("")?, None);
        assert_eq!(Zone::decode("   ")?, None);
        assert_eq!(Zone::decode(None::<&str>)?, None);
        Ok(())
    }

    #[test]
    fn test_decode_malformed_input() {
        for code in ["X", "XM 48", "xm4885", "XM4885487361999", "XM48854873616272211", "東京"] {
            let err = Zone::decode(code).expect_err(code);
            assert!(err.is_malformed_code(), "{code}: {err}");
        }
    }

    #[test]
    fn test_decode_rewrites_ambiguous_triangle() -> Result<(), GeohexError> {
        let zone = Zone::decode("TO274")?.expect("non-empty");
        assert_eq!(zone.position(), Position::new(318, 90));
        assert_eq!(zone.code(), "TO274");
        Ok(())
    }

    #[test]
    fn test_from_xy_matches_encode() -> Result<(), GeohexError> {
        let zone = Zone::encode(51.5074, -0.1278, 10)?;
        let again = Zone::from_xy(zone.x(), zone.y(), 10)?;
        assert_eq!(zone.code(), again.code());
        assert!(Zone::from_xy(0, 0, 16).is_err());
        Ok(())
    }

    #[test]
    fn test_ring() -> Result<(), GeohexError> {
        let (lat, lon) = TOKYO_STATION;
        let zone = Zone::encode(lat, lon, 10)?;
        let ring = zone.ring();

        assert_eq!(ring.len(), 18);
        let codes: HashSet<&str> = ring.iter().map(|z| z.code()).collect();
        assert_eq!(codes.len(), 18);
        assert!(!codes.contains(zone.code()));

        let sq = |z: &Zone| {
            let dx = z.x() - zone.x();
            let dy = z.y() - zone.y();
            dx * dx + dy * dy
        };
        assert!(ring.windows(2).all(|w| sq(&w[0]) <= sq(&w[1])));
        assert!(ring.iter().all(|z| z.level() == 10));
        Ok(())
    }

    #[test]
    fn test_ring_neighbor_decodes_to_itself() -> Result<(), GeohexError> {
        let zone = Zone::encode(-33.8688, 151.2093, 7)?;
        for neighbor in zone.ring() {
            let decoded = Zone::decode(neighbor.code())?.expect("non-empty");
            assert_eq!(decoded, neighbor);
        }
        Ok(())
    }

    #[test]
    fn test_ring_across_antimeridian_decodes_to_itself() -> Result<(), GeohexError> {
        for level in 0..=15u8 {
            for lat in [0.0, 45.0, -45.0] {
                for lon in [179.9, -179.9, 180.0, -180.0] {
                    let zone = Zone::encode(lat, lon, level)?;
                    let ring = zone.ring();

                    let codes: HashSet<&str> = ring.iter().map(|z| z.code()).collect();
                    assert_eq!(codes.len(), 18, "({lat}, {lon}) at level {level}");
                    assert!(!codes.contains(zone.code()));

                    for neighbor in &ring {
                        let decoded = Zone::decode(neighbor.code())?.expect("non-empty");
                        assert_eq!(&decoded, neighbor, "{} at level {level}", neighbor.code());
                        assert_eq!(decoded.code(), neighbor.code());
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_from_xy_rejects_positions_beyond_code_span() -> Result<(), GeohexError> {
        assert_eq!(
            Zone::from_xy(100, -100, 0),
            Err(GeohexError::PositionOutOfRange { x: 100, y: -100, level: 0 })
        );
        assert!(Zone::from_xy(i64::MAX, i64::MIN, 0).is_err_and(|e| e.is_range_error()));
        assert!(Zone::from_xy(i64::MIN, 0, 15).is_err());

        // The corners of the span are accepted and name themselves.
        for (x, y) in [(13, -13), (-13, 13), (13, 13), (-13, -13)] {
            let zone = Zone::from_xy(x, y, 0)?;
            let decoded = Zone::decode(zone.code())?.expect("non-empty");
            assert_eq!(decoded, zone);
        }
        Ok(())
    }

    #[test]
    fn test_distances() -> Result<(), GeohexError> {
        let tokyo = Zone::encode(35.681236, 139.767125, 10)?;
        let sydney = Zone::encode(-33.8688, 151.2093, 10)?;

        let there = tokyo.distance_to(&sydney);
        let back = sydney.distance_to(&tokyo);
        assert!((there - 7824.5).abs() < 1.0);
        assert!((there - back).abs() <= there * 1e-9);

        assert_eq!(tokyo.distance_to_code("")?, None);
        assert_eq!(tokyo.distance_to_code(None::<&str>)?, None);
        let by_code = tokyo.distance_to_code(sydney.code())?.expect("non-empty");
        assert!((by_code - there).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_grid_distance_to_ring() -> Result<(), GeohexError> {
        let zone = Zone::encode(35.681236, 139.767125, 10)?;
        let ring = zone.ring();
        let far = &ring[17];

        assert_eq!(zone.grid_distance_to(&zone), 0.0);
        let expected = (18.0_f64).sqrt() * zone.unit_size() / 1000.0;
        assert!((zone.grid_distance_to(far) - expected).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_unit_size() -> Result<(), GeohexError> {
        let zone = Zone::encode(0.0, 0.0, 0)?;
        assert!((zone.unit_size() - 20037508.34 / 27.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_display_and_from_str() -> Result<(), GeohexError> {
        let zone: Zone = "XM4885487361".parse()?;
        assert_eq!(zone.to_string(), "XM4885487361");
        assert!("".parse::<Zone>().is_err());
        Ok(())
    }

    #[test]
    fn test_json_shape() -> Result<(), GeohexError> {
        let zone = Zone::encode(35.681236, 139.767125, 10)?;
        let json = serde_json::to_value(&zone).map_err(|e| GeohexError::IoError(e.to_string()))?;

        assert_eq!(json["code"], "XM4885487361");
        assert_eq!(json["level"], 10);
        assert_eq!(json["x"], 304103);
        assert_eq!(json["y"], -108552);
        assert!(json["unit_size"].as_f64().is_some());
        assert!(json["latitude"].as_f64().is_some());
        Ok(())
    }

    #[test]
    fn test_polygon_contains_center() -> Result<(), GeohexError> {
        use geo::Contains;

        let zone = Zone::encode(35.681236, 139.767125, 7)?;
        let polygon = zone.to_polygon();

        assert_eq!(polygon.exterior().coords().count(), 7);
        assert!(polygon.contains(&zone.center()));
        Ok(())
    }

    #[test]
    fn test_from_line_string() -> Result<(), GeohexError> {
        // Tokyo to Shinjuku
        let line = LineString::from(vec![(139.767125, 35.681236), (139.700464, 35.689729)]);
        let zones = Zone::from_line_string(&line, 7)?;

        assert!(zones.len() > 1);
        assert_eq!(zones[0], Zone::encode(35.681236, 139.767125, 7)?);
        assert_eq!(zones[zones.len() - 1], Zone::encode(35.689729, 139.700464, 7)?);

        let unique: HashSet<&Zone> = zones.iter().collect();
        assert_eq!(unique.len(), zones.len());
        Ok(())
    }

    #[test]
    fn test_from_line_string_rejects_bad_vertex() {
        let line = LineString::from(vec![(139.0, 35.0), (200.0, 35.0)]);
        assert_eq!(
            Zone::from_line_string(&line, 7),
            Err(GeohexError::LongitudeOutOfRange(200.0))
        );
    }

    #[test]
    fn test_encode_batch() -> Result<(), GeohexError> {
        let coords = vec![(139.767125, 35.681236), (-0.1278, 51.5074), (151.2093, -33.8688)];
        let zones = encode_batch(&coords, 10)?;

        let codes: Vec<&str> = zones.iter().map(|z| z.code()).collect();
        assert_eq!(codes, vec!["XM4885487361", "QE0166623003", "MW6143286546"]);

        let bad = vec![(0.0, 0.0), (0.0, 95.0)];
        assert_eq!(encode_batch(&bad, 10), Err(GeohexError::LatitudeOutOfRange(95.0)));
        Ok(())
    }
}
