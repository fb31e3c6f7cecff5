pub mod coord;
pub mod error;

pub use coord::{Coordinate, check_wgs84};
pub use error::GeohexError;
