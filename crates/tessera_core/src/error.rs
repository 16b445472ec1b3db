//! Engine error types

use std::fmt;
use std::io;

use tessera_math::DatasetError;

/// Error loading or saving engine data
#[derive(Debug)]
pub enum EngineError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Invalid RON syntax
    Parse(ron::error::SpannedError),
    /// RON serialization failure
    Serialize(ron::Error),
    /// The file parsed but does not describe a tesseract
    Dataset(DatasetError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Io(e) => write!(f, "IO error: {}", e),
            EngineError::Parse(e) => write!(f, "Parse error: {}", e),
            EngineError::Serialize(e) => write!(f, "Serialize error: {}", e),
            EngineError::Dataset(e) => write!(f, "Invalid dataset: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(e) => Some(e),
            EngineError::Parse(e) => Some(e),
            EngineError::Serialize(e) => Some(e),
            EngineError::Dataset(e) => Some(e),
        }
    }
}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        EngineError::Io(e)
    }
}

impl From<ron::error::SpannedError> for EngineError {
    fn from(e: ron::error::SpannedError) -> Self {
        EngineError::Parse(e)
    }
}

impl From<ron::Error> for EngineError {
    fn from(e: ron::Error) -> Self {
        EngineError::Serialize(e)
    }
}

impl From<DatasetError> for EngineError {
    fn from(e: DatasetError) -> Self {
        EngineError::Dataset(e)
    }
}
