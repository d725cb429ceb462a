//! Error types for resample-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use crate::geometry::{Coordinates, Dimensions};
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Every axis extent must be at least 1
    #[error("invalid image dimensions: {0}")]
    InvalidDimensions(Dimensions),

    /// Supplied buffer does not match the element count of the dimensions
    #[error("data length mismatch: expected {expected} elements, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// Coordinates outside the image
    #[error("coordinates {coords} out of bounds for dimensions {dims}")]
    CoordinatesOutOfBounds {
        coords: Coordinates,
        dims: Dimensions,
    },

    /// Color component index beyond the element's component count
    #[error("component index out of bounds: {index} >= {count}")]
    ComponentOutOfBounds { index: usize, count: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed
    #[error("memory allocation failed for {0} elements")]
    AllocationFailed(usize),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
