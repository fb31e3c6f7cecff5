use crate::util::error::GeohexError;
use geo_types::Point;

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples and `geo_types::Point<f64>`. For
/// geographic input, x is longitude and y is latitude.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// Rejects latitudes outside [-90, 90] and longitudes outside [-180, 180].
///
/// NaN fails both checks.
pub fn check_wgs84(lat: f64, lon: f64) -> Result<(), GeohexError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeohexError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeohexError::LongitudeOutOfRange(lon));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (139.767125, 35.681236);
        assert_eq!(tuple.x(), 139.767125);
        assert_eq!(tuple.y(), 35.681236);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(139.767125, 35.681236);
        assert_eq!(point.x(), 139.767125);
        assert_eq!(point.y(), 35.681236);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(check_wgs84(90.0, 180.0).is_ok());
        assert!(check_wgs84(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(
            check_wgs84(91.0, 0.0),
            Err(GeohexError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            check_wgs84(0.0, -180.5),
            Err(GeohexError::LongitudeOutOfRange(-180.5))
        );
        assert!(check_wgs84(f64::NAN, 0.0).is_err());
    }
}
