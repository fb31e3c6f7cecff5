//! # geohex-rs
//!
//! GeoHex v3: a hierarchical hexagonal grid over a Mercator projection of the
//! globe. Any latitude/longitude maps to a short code (`level + 2`
//! characters) naming the hexagon that contains it, and codes decode back
//! to the cell's centroid.
//!
//! ### 1. `Zone` - Single Cell Operations
//!
//! ```
//! use geohex_rs::Zone;
//!
//! # fn main() -> Result<(), geohex_rs::GeohexError> {
//! let zone = Zone::encode(35.681236, 139.767125, 10)?;
//! assert_eq!(zone.code(), "XM4885487361");
//! assert_eq!((zone.x(), zone.y()), (304103, -108552));
//!
//! let ring = zone.ring();
//! assert_eq!(ring.len(), 18);
//!
//! let polygon = zone.to_polygon();
//! # let _ = polygon;
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Proximity
//!
//! Stores keep the lattice position next to each code and order by hex
//! distance:
//!
//! ```
//! use geohex_rs::{Zone, nearest_by_position};
//!
//! # fn main() -> Result<(), geohex_rs::GeohexError> {
//! let here = Zone::encode(35.6812, 139.7671, 10)?;
//! let spots = vec![Zone::encode(35.6895, 139.6917, 10)?, here.clone()];
//!
//! let closest = nearest_by_position(spots, |z| z.position(), &here, 1);
//! assert_eq!(closest[0], here);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToZones` - CSV File Conversion
//!
//! ```no_run
//! use geohex_rs::{CsvToZones, GeometryFormat, ZoneCsvConfig};
//!
//! let config = ZoneCsvConfig::new("geometry", 7)
//!     .exclude(vec!["Geo Point".into()])
//!     .with_zone_geometry(GeometryFormat::GeoJson);
//!
//! "input.csv".to_zone_csv("output.csv", &config).unwrap();
//! ```

pub mod api;
pub mod core;
pub mod geom;
pub mod util;

pub use api::{
    CoordinateSource, CsvToZones, GeometryFormat, Zone, ZoneCsvConfig, csv_to_zone_csv,
    encode_batch, nearest_by_position,
};
pub use crate::core::{MAX_LEVEL, Position, hex_size};
pub use util::{Coordinate, GeohexError};

pub use geo_types;
