//! resample-test - Regression test framework for the resampling engine
//!
//! This crate provides the regression harness used by the `tests/*_reg.rs`
//! files of every crate in the workspace. Two modes are supported:
//!
//! - **Compare**: Check computed values against expectations (default)
//! - **Display**: Same checks, plus a dump of every compared image
//!
//! # Usage
//!
//! ```ignore
//! use resample_test::{RegParams, test_image};
//!
//! let mut rp = RegParams::new("scale");
//! rp.compare_values(8.0, scaled.dims().x as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use resample_core::{Dimensions, Image};

/// Build a synthetic test image
///
/// # Arguments
///
/// * `name` - Pattern name:
///   - `"ramp"`: `x + 10y + 100z + 1000t + 10000c`
///   - `"checker"`: 0/100 alternating per element
///   - `"blob"`: smooth Gaussian bump centred in the x-y plane (peak 200)
///   - `"index"`: the linear element index
/// * `dims` - Extents of the image
///
/// # Returns
///
/// The generated image, or an error for an unknown pattern or invalid
/// dimensions.
pub fn test_image(name: &str, dims: Dimensions) -> TestResult<Image<f64>> {
    let cx = (dims.x as f64 - 1.0) / 2.0;
    let cy = (dims.y as f64 - 1.0) / 2.0;
    let sigma = (dims.x.min(dims.y) as f64 / 4.0).max(0.5);
    let built = match name {
        "ramp" => Image::from_fn(dims, |c| {
            (c.x + 10 * c.y + 100 * c.z + 1000 * c.t + 10000 * c.c) as f64
        }),
        "checker" => Image::from_fn(dims, |c| {
            if (c.x + c.y + c.z + c.t + c.c) % 2 == 0 {
                0.0
            } else {
                100.0
            }
        }),
        "blob" => Image::from_fn(dims, |c| {
            let dx = c.x as f64 - cx;
            let dy = c.y as f64 - cy;
            200.0 * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
        }),
        "index" => Image::from_fn(dims, |c| dims.offset(&c) as f64),
        other => return Err(TestError::UnknownPattern(other.to_string())),
    };
    built.map_err(|source| TestError::ImageCreate {
        name: name.to_string(),
        source,
    })
}
