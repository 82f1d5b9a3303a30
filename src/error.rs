/// Error taxonomy for the hextile pipeline.
///
/// Per-cell failures during aggregation are logged and skipped by the
/// pipeline; these variants surface only for whole-dataset problems or when
/// a reducer is invoked directly.
use h3o::CellIndex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum HexTileError {
    /// A cell's grouped point list was empty at aggregation time.
    EmptyCell { cell: CellIndex },
    /// An input dataset does not have the expected shape (bad GeoJSON,
    /// bad pre-binned array, unparsable cell id). Fatal for the build.
    MalformedDataset(String),
    /// A resolution range with min > max, or a level outside H3's 0..=15.
    InvalidResolutionRange { min: u8, max: u8 },
    /// A latitude/longitude pair the hex grid rejects.
    InvalidCoordinate { lat: f64, lng: f64 },
}

impl fmt::Display for HexTileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexTileError::EmptyCell { cell } => {
                write!(f, "empty point group for cell {}", cell)
            }
            HexTileError::MalformedDataset(msg) => {
                write!(f, "malformed dataset: {}", msg)
            }
            HexTileError::InvalidResolutionRange { min, max } => {
                write!(f, "invalid resolution range {}..={}", min, max)
            }
            HexTileError::InvalidCoordinate { lat, lng } => {
                write!(f, "invalid coordinate ({}, {})", lat, lng)
            }
        }
    }
}

impl Error for HexTileError {}
