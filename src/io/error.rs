//! Error types for the I/O boundary of the mosaic pipeline
//!
//! Geometry problems inside the core never surface here: stale tile indices,
//! malformed primitives and degenerate paths are recovered locally. Only file
//! access, library parsing, parameter validation and surface failures do.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to parse a tile library file
    LibraryLoad {
        /// Path to the library file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to serialize a tile library or display list
    Serialization {
        /// What was being serialized
        what: &'static str,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile index exceeds the tile library
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the library
        tile_count: usize,
    },

    /// An operation needed at least one tile design
    EmptyTileLibrary,

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A drawing surface rejected a command
    Render {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibraryLoad { path, source } => {
                write!(
                    f,
                    "Failed to load tile library '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { what, source } => {
                write!(f, "Failed to serialize {what}: {source}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, tile_count } => {
                write!(
                    f,
                    "Tile index {index} is out of bounds (library has {tile_count} tiles)"
                )
            }
            Self::EmptyTileLibrary => write!(f, "Tile library contains no tiles"),
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Render { reason } => write!(f, "Rendering failed: {reason}"),
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LibraryLoad { source, .. } | Self::Serialization { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for MosaicError {
    fn from(err: serde_json::Error) -> Self {
        Self::LibraryLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Validate a stitching tolerance supplied from outside the core
///
/// # Errors
///
/// Returns `InvalidParameter` if the tolerance is negative or not finite
pub fn validate_tolerance(tolerance: f64) -> Result<f64> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(invalid_parameter(
            "tolerance",
            &tolerance,
            &"must be a finite, non-negative distance",
        ))
    }
}
