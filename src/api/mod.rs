pub mod nearest;
pub mod zone;
pub mod zone_csv;

pub use nearest::nearest_by_position;
pub use zone::{Zone, encode_batch};
pub use zone_csv::{CoordinateSource, CsvToZones, GeometryFormat, ZoneCsvConfig, csv_to_zone_csv};
