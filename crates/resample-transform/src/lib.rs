//! resample-transform - Geometric transformations of multi-dimensional images
//!
//! This crate provides:
//!
//! - [`AffineMatrix`] - 3×4 affine transform with rotate/scale/shear/translate
//!   modifiers, composition and inversion
//! - [`Scheme`] - Six interpolation kernels, from nearest-neighbor to
//!   quintic B-spline
//! - [`prefilter`] - Recursive spline prefilter
//! - [`BorderPolicy`] - Border sizing and mirror/constant extension
//! - [`AffineResampler`] / [`affine`] - Affine transformation by backward
//!   mapping, optionally resized to fit the result
//! - [`AxisScaler`] / [`scale`] - Separable per-axis scaling
//! - [`crop`], [`embed`], [`mirror`], [`turn`] - Axis-aligned region operations
//! - [`Messenger`] / [`Progressor`] - Diagnostic and progress sinks

pub mod affine;
pub mod border;
mod error;
pub mod kernel;
pub mod matrix;
pub mod prefilter;
pub mod region;
pub mod scale;
pub mod sink;

pub use affine::{AffineOptions, AffineResampler, affine};
pub use border::BorderPolicy;
pub use error::{TransformError, TransformResult};
pub use kernel::{KernelWeights, Scheme, Spline};
pub use matrix::{AffineMatrix, Point3, SpaceAxis};
pub use prefilter::{prefilter_image, prefilter_line};
pub use region::{EmbedFill, crop, embed, mirror, turn};
pub use scale::{AxisScaler, ScaleFactors, scale};
pub use sink::{
    MessageLog, Messenger, NullMessenger, NullProgressor, ProgressTracker, Progressor,
    TracingMessenger, component_range,
};
