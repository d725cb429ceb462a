//! Error types for resample-transform

use resample_core::Axis;
use thiserror::Error;

/// Errors that can occur during transformation operations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] resample_core::Error),

    /// Transformation matrix has a zero determinant
    #[error("singular transformation matrix")]
    SingularMatrix,

    /// Scale factor not strictly positive
    #[error("scaling factor in {axis}-dimension must be greater than 0, got {factor}")]
    InvalidScaleFactor { axis: Axis, factor: f64 },

    /// Interpolation scheme index or name not recognised
    #[error("unsupported interpolation scheme: {0}")]
    UnsupportedScheme(String),

    /// Crop or embed region does not fit the image
    #[error("region out of bounds: {0}")]
    RegionOutOfBounds(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transformation operations
pub type TransformResult<T> = Result<T, TransformError>;
