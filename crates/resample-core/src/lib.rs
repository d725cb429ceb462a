//! resample-core - Basic data structures for the resampling engine
//!
//! This crate provides the five-dimensional image model shared by every
//! transform:
//!
//! - [`Image`] - Dense image of [`Sample`] elements (x, y, z, t, c)
//! - [`FloatImage`] - `f64` working copy of one component, with borders
//! - [`Dimensions`] / [`Aspects`] / [`Coordinates`] / [`Borders`] /
//!   [`Axes`] - Per-axis vocabulary
//! - [`Color`] - Three-component RGB element
//! - [`BorderRule`] - Mapping of out-of-range indices back into an axis

pub mod error;
pub mod geometry;
pub mod image;
pub mod sample;

pub use error::{Error, Result};
pub use geometry::{Aspects, Axes, Axis, Borders, Coordinates, Dimensions, line_starts};
pub use image::Image;
pub use image::border::BorderRule;
pub use image::float::FloatImage;
pub use sample::{Color, Sample, from_real};
