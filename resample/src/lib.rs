//! Resample - Geometric resampling of multi-dimensional scientific images
//!
//! # Overview
//!
//! Images have up to five axes: x and y in the plane, a further spatial
//! axis z, time t and channel c. The library provides:
//!
//! - Affine transformation (rotation, scaling, shearing, translation)
//!   about the image center, optionally resized to fit the result
//! - Separable per-axis scaling
//! - Six interpolation schemes: nearest-neighbor, linear, cubic
//!   convolution, cubic B-spline, cubic O-MOMS and quintic B-spline
//! - Crop, embed, mirror and quarter turns
//!
//! Element types are 8/16/32-bit integers, 32/64-bit floats and RGB
//! color, whose components are processed independently.
//!
//! # Example
//!
//! ```
//! use resample::transform::{AffineMatrix, AffineOptions, Scheme, SpaceAxis, affine};
//! use resample::{Dimensions, Image};
//!
//! let image = Image::<u8>::with_value(Dimensions::plane(64, 48), 200).unwrap();
//! let mut transform = AffineMatrix::identity();
//! transform.rotate(90.0, SpaceAxis::Z);
//!
//! let options = AffineOptions::with_scheme(Scheme::BSpline3).fit(true);
//! let rotated = affine(&image, &transform, &options).unwrap();
//! assert_eq!(rotated.dims(), Dimensions::plane(48, 64));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use resample_core::*;

// Re-export the transform crate as a module to avoid name conflicts
pub use resample_transform as transform;
