use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::Event;

/// A decode failure, carried as an ordinary value in the result stream.
///
/// One bad record never aborts a file: the error takes the position the
/// record would have occupied and decoding continues with the next record.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DecodeError {
    /// The file's top-level shape is not what its decoder expects
    /// (e.g. expected a list, got a map). Exactly one of these is emitted
    /// for the whole file.
    #[error("{path}: {message}")]
    Structure { path: String, message: String },

    /// A single record inside an otherwise valid file failed to decode.
    /// Sibling records are unaffected.
    #[error("{path}: {message}")]
    Record { path: String, message: String },
}

impl DecodeError {
    pub fn structure(path: &Path, message: impl Into<String>) -> Self {
        DecodeError::Structure { path: path.display().to_string(), message: message.into() }
    }

    pub fn record(path: &Path, message: impl Into<String>) -> Self {
        DecodeError::Record { path: path.display().to_string(), message: message.into() }
    }
}

/// One decoded record: a typed event, or the error that took its place.
pub type ParseResult = Result<Event, DecodeError>;
