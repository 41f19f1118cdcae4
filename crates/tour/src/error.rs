// ---------------------------------------------------------------------------
// Error types for tour navigation, coordinates and the itinerary dataset
// ---------------------------------------------------------------------------

use std::fmt;

/// Reasons a navigation request is rejected.
///
/// A rejected request never mutates `TourState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourError {
    /// Requested stop is outside `[0, len)`.
    OutOfRange { index: usize, len: usize },
    /// A leg is in the air; navigation is blocked until it lands.
    TransitionInFlight,
    /// Navigation before the welcome overlay was dismissed.
    NotStarted,
    /// `start_tour` called a second time.
    AlreadyStarted,
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourError::OutOfRange { index, len } => {
                write!(f, "Invalid location index: {index}. Valid range: 0-{}", len.saturating_sub(1))
            }
            TourError::TransitionInFlight => write!(f, "A flight is already in progress"),
            TourError::NotStarted => write!(f, "The tour has not started yet"),
            TourError::AlreadyStarted => write!(f, "The tour has already started"),
        }
    }
}

impl std::error::Error for TourError {}

/// Coordinate outside the geographic range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoError {
    Latitude(f32),
    Longitude(f32),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::Latitude(lat) => write!(f, "latitude {lat} outside [-90, 90]"),
            GeoError::Longitude(lon) => write!(f, "longitude {lon} outside [-180, 180]"),
        }
    }
}

impl std::error::Error for GeoError {}

/// Errors raised while loading the itinerary dataset.
#[derive(Debug)]
pub enum DatasetError {
    /// Dataset file could not be read.
    Io(std::io::Error),
    /// Dataset is not valid JSON or does not match the schema.
    Parse(serde_json::Error),
    /// Dataset has no experiences; the tour needs at least one stop.
    Empty,
    /// An experience has an out-of-range coordinate.
    InvalidCoordinate { id: String, source: GeoError },
    /// Two experiences share an id.
    DuplicateId(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "I/O error: {e}"),
            DatasetError::Parse(e) => write!(f, "Parse error: {e}"),
            DatasetError::Empty => write!(f, "Dataset contains no experiences"),
            DatasetError::InvalidCoordinate { id, source } => {
                write!(f, "Experience {id} has an invalid coordinate: {source}")
            }
            DatasetError::DuplicateId(id) => write!(f, "Duplicate experience id: {id}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            DatasetError::Parse(e) => Some(e),
            DatasetError::InvalidCoordinate { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(e: std::io::Error) -> Self {
        DatasetError::Io(e)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        DatasetError::Parse(e)
    }
}
