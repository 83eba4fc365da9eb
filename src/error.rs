//! Error types for Denso operations

use thiserror::Error;

use crate::Backend;

/// Result type for Denso operations
pub type Result<T> = std::result::Result<T, DensoError>;

/// Errors that can occur during Denso operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DensoError {
    /// Backend not supported on this platform
    #[error("Backend not supported on this platform: {0:?}")]
    UnsupportedBackend(Backend),

    /// An operator's dimensional precondition was violated
    #[error("Dimension mismatch in {op}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Operation that rejected its operands
        op: &'static str,
        /// Required extent
        expected: usize,
        /// Extent actually supplied
        actual: usize,
    },

    /// Zero-sized matrix dimension
    #[error("Invalid matrix dimensions: {width}x{height} (both must be non-zero)")]
    InvalidDimension {
        /// Requested number of columns
        width: usize,
        /// Requested number of rows
        height: usize,
    },

    /// Element access outside the matrix extents
    #[error("Index ({x}, {y}) out of bounds for {width}x{height} matrix")]
    OutOfBounds {
        /// Column index
        x: usize,
        /// Row index
        y: usize,
        /// Matrix width
        width: usize,
        /// Matrix height
        height: usize,
    },
}
