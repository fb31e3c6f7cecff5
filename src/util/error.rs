/// Error type for geohex-rs operations.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GeohexError {
    /// Latitude is outside [-90, 90] (or not a number).
    #[error("latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
    /// Longitude is outside [-180, 180] (or not a number).
    #[error("longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
    /// The level is outside the valid range (0-15).
    #[error("level must be between 0 and 15, got {0}")]
    InvalidLevel(u8),
    /// A lattice position lies outside what a code at this level can spell.
    #[error("position ({x}, {y}) is outside the level {level} lattice")]
    PositionOutOfRange { x: i64, y: i64, level: u8 },
    /// A code cannot have this many characters.
    #[error("invalid code length: {0}")]
    InvalidCodeLength(usize),
    /// A code contains a character outside its alphabet.
    #[error("invalid code character: {0:?}")]
    InvalidCodeCharacter(char),
    /// A code is well-formed character-wise but does not name a cell.
    #[error("malformed code: {0}")]
    MalformedCode(String),
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
    /// A bulk conversion failed on a specific data row (1-based, header excluded).
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<GeohexError>,
    },
}

impl GeohexError {
    /// True for argument-range failures raised by encoding.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            GeohexError::LatitudeOutOfRange(_)
                | GeohexError::LongitudeOutOfRange(_)
                | GeohexError::InvalidLevel(_)
                | GeohexError::PositionOutOfRange { .. }
        )
    }

    /// True when a code string could not be decoded.
    pub fn is_malformed_code(&self) -> bool {
        matches!(
            self,
            GeohexError::InvalidCodeLength(_)
                | GeohexError::InvalidCodeCharacter(_)
                | GeohexError::MalformedCode(_)
        )
    }

    pub(crate) fn at_row(self, row: usize) -> Self {
        GeohexError::Row {
            row,
            source: Box::new(self),
        }
    }
}
