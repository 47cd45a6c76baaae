// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the depthview tools

use std::fmt;
use std::path::PathBuf;

/// Result type alias using ViewerError
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Main error type for all depthview operations
#[derive(Debug, Clone)]
pub enum ViewerError {
    /// An input path does not exist
    FileNotFound(PathBuf),
    /// An array file could not be parsed, or has an unusable shape
    InvalidFormat(String),
    /// A parameter combination is unusable (e.g. vmax <= vmin)
    InvalidInput(String),
    /// Read/write failure on an output artifact
    Io(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            ViewerError::InvalidFormat(msg) => write!(f, "Invalid array format: {}", msg),
            ViewerError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ViewerError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {}

// Missing paths are reported as FileNotFound by the callers that know the
// path; by the time an io::Error surfaces here we are reading or writing.
impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::Io(err.to_string())
    }
}

impl From<image::ImageError> for ViewerError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => ViewerError::Io(e.to_string()),
            other => ViewerError::InvalidFormat(other.to_string()),
        }
    }
}

impl From<ndarray_npy::ReadNpyError> for ViewerError {
    fn from(err: ndarray_npy::ReadNpyError) -> Self {
        ViewerError::InvalidFormat(err.to_string())
    }
}

impl From<las::Error> for ViewerError {
    fn from(err: las::Error) -> Self {
        ViewerError::Io(err.to_string())
    }
}
