//! Per-axis scaling of images
//!
//! Scaling is separable. The axes are processed one after the other in
//! the order x, y, z, t, c; an axis whose factor is exactly 1 is skipped.
//! For every processed axis a table of source positions and kernel
//! weights is computed once, then each line along the axis is copied into
//! a bordered buffer, prefiltered for spline schemes, mirrored at its ends
//! and convolved with the table.
//!
//! The output extent of an axis is `max(1, round(extent * factor))`. Output
//! sample `i` is taken at source position `i / factor + shift` with
//!
//! ```text
//! shift = ((extent - 1) - (new_extent - 1) / factor) / 2
//! ```
//!
//! so the scaled image stays centered on the input.

use crate::kernel::{KernelWeights, Scheme};
use crate::prefilter::prefilter_line;
use crate::sink::{Messenger, NullProgressor, Progressor, TracingMessenger, component_range};
use crate::{TransformError, TransformResult};
use resample_core::{
    Aspects, Axis, BorderRule, Color, Dimensions, Error, FloatImage, Image, Sample, line_starts,
};
use std::fmt;
use std::sync::Arc;

/// Scaling factor per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
    pub c: f64,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl ScaleFactors {
    /// Create from the five per-axis factors
    pub const fn new(x: f64, y: f64, z: f64, t: f64, c: f64) -> Self {
        Self { x, y, z, t, c }
    }

    /// Factors for x and y; the other axes are left alone
    pub const fn plane(x: f64, y: f64) -> Self {
        Self::new(x, y, 1.0, 1.0, 1.0)
    }

    /// Factors for x, y and z
    pub const fn volume(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.0, 1.0)
    }

    /// The same factor on every axis
    pub const fn uniform(f: f64) -> Self {
        Self::new(f, f, f, f, f)
    }

    /// Factor of `axis`
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::T => self.t,
            Axis::C => self.c,
        }
    }

    /// Whether every factor is exactly 1
    pub fn is_unity(&self) -> bool {
        Axis::ALL.into_iter().all(|a| self.get(a) == 1.0)
    }

    /// Check that every factor is finite and strictly positive
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidScaleFactor` for the first axis
    /// whose factor is not a finite value greater than 0.
    pub fn validate(&self) -> TransformResult<()> {
        for axis in Axis::ALL {
            let factor = self.get(axis);
            if !factor.is_finite() || factor <= 0.0 {
                return Err(TransformError::InvalidScaleFactor { axis, factor });
            }
        }
        Ok(())
    }

    /// Extents of `dims` scaled by these factors
    pub fn scaled(&self, dims: Dimensions) -> Dimensions {
        let mut out = dims;
        for axis in Axis::ALL {
            out.set(axis, scaled_extent(dims.get(axis), self.get(axis)));
        }
        out
    }
}

impl fmt::Display for ScaleFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x,y,z,t,c) = ({},{},{},{},{})",
            self.x, self.y, self.z, self.t, self.c
        )
    }
}

fn scaled_extent(extent: usize, factor: f64) -> usize {
    if factor == 1.0 {
        return extent;
    }
    ((extent as f64 * factor + 0.5).floor() as usize).max(1)
}

/// Sampling table of one axis
#[derive(Debug)]
struct AxisTable {
    scheme: Scheme,
    border: usize,
    /// First buffer index read for each output sample
    first: Vec<usize>,
    weights: Vec<KernelWeights>,
}

impl AxisTable {
    fn new(
        scheme: Scheme,
        extent: usize,
        new_extent: usize,
        factor: f64,
    ) -> TransformResult<Self> {
        let border = scheme.support_width();
        let shift = 0.5 * ((extent as f64 - 1.0) - (new_extent as f64 - 1.0) / factor);
        let last = (extent + 2 * border - scheme.taps()) as isize;

        let mut first = Vec::new();
        let mut weights = Vec::new();
        first
            .try_reserve_exact(new_extent)
            .map_err(|_| Error::AllocationFailed(new_extent))?;
        weights
            .try_reserve_exact(new_extent)
            .map_err(|_| Error::AllocationFailed(new_extent))?;
        for i in 0..new_extent {
            let t = i as f64 / factor + shift;
            if scheme == Scheme::Nearest {
                let p = (t + 0.5).floor() as isize;
                first.push(p.clamp(0, extent as isize - 1) as usize);
                weights.push(KernelWeights::unit());
            } else {
                let p = t.floor();
                let index = border as isize + p as isize + scheme.first_tap();
                first.push(index.clamp(0, last) as usize);
                weights.push(scheme.weights(t - p));
            }
        }

        Ok(Self {
            scheme,
            border,
            first,
            weights,
        })
    }

    /// Resample one bordered line into `out`
    fn apply(&self, line: &[f64], out: &mut [f64]) {
        for ((value, &first), w) in out.iter_mut().zip(&self.first).zip(&self.weights) {
            let taps = w.as_slice();
            *value = line[first..first + taps.len()]
                .iter()
                .zip(taps)
                .map(|(v, w)| v * w)
                .sum();
        }
    }
}

/// Per-axis scaler
///
/// # Examples
///
/// ```
/// use resample_core::{Dimensions, Image};
/// use resample_transform::{AxisScaler, ScaleFactors, Scheme};
///
/// let image = Image::<u16>::with_value(Dimensions::volume(10, 8, 4), 100).unwrap();
/// let scaled = AxisScaler::new()
///     .run(&image, ScaleFactors::volume(0.5, 2.0, 1.0), Scheme::BSpline3)
///     .unwrap();
/// assert_eq!(scaled.dims(), Dimensions::volume(5, 16, 4));
/// assert!(scaled.data().iter().all(|&v| v == 100));
/// ```
#[derive(Clone)]
pub struct AxisScaler {
    messenger: Arc<dyn Messenger>,
    progressor: Arc<dyn Progressor>,
}

impl Default for AxisScaler {
    fn default() -> Self {
        Self {
            messenger: Arc::new(TracingMessenger),
            progressor: Arc::new(NullProgressor),
        }
    }
}

impl fmt::Debug for AxisScaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisScaler").finish_non_exhaustive()
    }
}

impl AxisScaler {
    /// Create a scaler that logs through `tracing`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diagnostic sink
    pub fn messenger(mut self, messenger: Arc<dyn Messenger>) -> Self {
        self.messenger = messenger;
        self
    }

    /// Set the progress sink
    pub fn progressor(mut self, progressor: Arc<dyn Progressor>) -> Self {
        self.progressor = progressor;
        self
    }

    /// Scale `image` by `factors` using `scheme`.
    ///
    /// Axes too short for `scheme` use a simpler one: an axis of one
    /// sample is sampled nearest-neighbor and an axis of fewer than four
    /// samples at most linearly. Output aspects are the input aspects
    /// divided by the factors.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidScaleFactor` if any factor is not a
    /// finite value greater than 0, before any output is allocated, and a
    /// core `AllocationFailed` error if the output is too large to allocate.
    pub fn run<T: Sample>(
        &self,
        image: &Image<T>,
        factors: ScaleFactors,
        scheme: Scheme,
    ) -> TransformResult<Image<T>> {
        let log = |message: String| self.messenger.log(&message);

        factors.validate()?;
        let indims = image.dims();
        let newdims = factors.scaled(indims);
        log(format!("Scaling {}", T::TYPE_NAME));
        log(format!("Scaling factors: {factors}"));
        log(format!("Input image dimensions: {indims}"));
        log(format!("Output image dimensions: {newdims}"));
        log(format!("Using {}", scheme.description()));

        let mut out = if factors.is_unity() {
            log("All scaling factors are unity: returning a copy of the input".into());
            image.duplicate()
        } else {
            self.scale(image, factors, scheme, newdims)?
        };

        let a = image.aspects();
        out.set_aspects(Aspects::new(
            a.x / factors.x,
            a.y / factors.y,
            a.z / factors.z,
            a.t / factors.t,
            a.c / factors.c,
        ));
        Ok(out)
    }

    fn scale<T: Sample>(
        &self,
        image: &Image<T>,
        factors: ScaleFactors,
        scheme: Scheme,
        newdims: Dimensions,
    ) -> TransformResult<Image<T>> {
        let indims = image.dims();
        let mut out = Image::<T>::new(newdims)?;

        let mut axes = Vec::new();
        let mut total = 0;
        let mut running = indims;
        for axis in Axis::ALL {
            let factor = factors.get(axis);
            if factor == 1.0 {
                continue;
            }
            let extent = indims.get(axis);
            let effective = scheme.fit_extent(extent);
            if effective != scheme {
                self.messenger.log(&format!(
                    "Using {} in {}-dimension: {} samples are too few for {}",
                    effective.description(),
                    axis,
                    extent,
                    scheme.description()
                ));
            }
            running.set(axis, newdims.get(axis));
            total += running.count().unwrap_or(0);
            axes.push((
                axis,
                factor,
                AxisTable::new(effective, extent, newdims.get(axis), factor)?,
            ));
        }

        if T::COMPONENTS > 1 {
            self.messenger.log("Processing RGB-color components separately");
        }

        for component in 0..T::COMPONENTS {
            let (lo, hi) = component_range(T::COMPONENTS, component);
            self.progressor.range(lo, hi);
            let label = if T::COMPONENTS == 3 {
                let name = Color::component_name(component);
                self.messenger.log(&format!("Scaling {name} component"));
                format!(" {name} component")
            } else {
                String::new()
            };

            self.progressor.steps(total);
            self.progressor.start();
            let mut current = FloatImage::from_component(image, component)?;
            for (axis, factor, table) in &axes {
                self.messenger.log(&format!(
                    "Scaling in {axis}-dimension by {factor} using {}",
                    table.scheme.description()
                ));
                self.progressor
                    .status(&format!("Scaling{label} in {axis}-dimension..."));
                current = self.scale_axis(&current, *axis, table)?;
            }
            self.progressor.stop();
            current.write_component(&mut out, component)?;
        }
        self.progressor.status("");

        Ok(out)
    }

    /// Resample every line of `src` along `axis`
    fn scale_axis(
        &self,
        src: &FloatImage,
        axis: Axis,
        table: &AxisTable,
    ) -> TransformResult<FloatImage> {
        let indims = src.interior();
        let n = indims.get(axis);
        let new_extent = table.first.len();
        let mut dst = FloatImage::new(indims.with(axis, new_extent), Default::default())?;

        let b = table.border;
        let spline = table.scheme.spline();
        let mut line = vec![0.0; n + 2 * b];
        let mut scaled = vec![0.0; new_extent];
        for start in line_starts(indims, axis) {
            src.get_line(axis, &start, &mut line[b..b + n]);
            if let Some(spline) = spline {
                prefilter_line(&mut line, b, spline);
            }
            mirror_line(&mut line, b, n);
            table.apply(&line, &mut scaled);
            dst.set_line(axis, &start, &scaled);
            self.progressor.step(new_extent);
        }
        Ok(dst)
    }
}

/// Fill `border` samples at each end of `line` by reflecting the `n`
/// interior samples
fn mirror_line(line: &mut [f64], border: usize, n: usize) {
    for k in (0..border).chain(border + n..n + 2 * border) {
        let rel = k as isize - border as isize;
        if let Some(src) = BorderRule::Reflect.map(rel, n) {
            line[k] = line[border + src];
        }
    }
}

/// Scale an image with default sinks.
///
/// # Errors
///
/// Same as [`AxisScaler::run`].
pub fn scale<T: Sample>(
    image: &Image<T>,
    factors: ScaleFactors,
    scheme: Scheme,
) -> TransformResult<Image<T>> {
    AxisScaler::new().run(image, factors, scheme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MessageLog;

    #[test]
    fn test_scaled_extent() {
        assert_eq!(scaled_extent(4, 2.0), 8);
        assert_eq!(scaled_extent(5, 0.5), 3);
        assert_eq!(scaled_extent(3, 0.1), 1);
        assert_eq!(scaled_extent(7, 1.0), 7);
    }

    #[test]
    fn test_invalid_factors() {
        let image = Image::<u8>::new(Dimensions::plane(4, 4)).unwrap();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = scale(&image, ScaleFactors::new(1.0, 1.0, bad, 1.0, 1.0), Scheme::Linear)
                .unwrap_err();
            assert!(matches!(
                err,
                TransformError::InvalidScaleFactor { axis: Axis::Z, .. }
            ));
        }
    }

    #[test]
    fn test_oversized_output_is_an_error() {
        let image = Image::<u8>::new(Dimensions::plane(4, 4)).unwrap();
        for factor in [1e17, 1e300] {
            let err = scale(&image, ScaleFactors::plane(factor, 1.0), Scheme::Linear).unwrap_err();
            assert!(matches!(
                err,
                TransformError::Core(Error::AllocationFailed(_))
            ));
        }
    }

    #[test]
    fn test_linear_doubling_row() {
        let image = Image::from_vec(Dimensions::plane(4, 1), vec![0.0f64, 1.0, 2.0, 3.0]).unwrap();
        let out = scale(&image, ScaleFactors::plane(2.0, 1.0), Scheme::Linear).unwrap();
        let expected = [0.25, 0.25, 0.75, 1.25, 1.75, 2.25, 2.75, 2.75];
        for (a, e) in out.data().iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{:?}", out.data());
        }
    }

    #[test]
    fn test_nearest_halving() {
        let image = Image::from_vec(Dimensions::plane(4, 1), vec![1u8, 2, 3, 4]).unwrap();
        let out = scale(&image, ScaleFactors::plane(0.5, 1.0), Scheme::Nearest).unwrap();
        // shift = 0.5 * (3 - 1 / 0.5) = 0.5; positions 0.5 and 2.5 round up
        assert_eq!(out.data(), &[2, 4]);
    }

    #[test]
    fn test_aspects_divided() {
        let mut image = Image::<f32>::new(Dimensions::volume(4, 4, 2)).unwrap();
        image.set_aspects(Aspects::new(1.0, 2.0, 3.0, 1.0, 1.0));
        let out = scale(&image, ScaleFactors::volume(2.0, 0.5, 1.0), Scheme::Cubic).unwrap();
        assert_eq!(out.aspects(), Aspects::new(0.5, 4.0, 3.0, 1.0, 1.0));
    }

    #[test]
    fn test_downgrade_logged() {
        let image = Image::<f64>::with_value(Dimensions::volume(8, 3, 1), 2.0).unwrap();
        let log = Arc::new(MessageLog::new());
        let out = AxisScaler::new()
            .messenger(log.clone())
            .run(&image, ScaleFactors::volume(2.0, 2.0, 3.0), Scheme::BSpline5)
            .unwrap();
        assert_eq!(out.dims(), Dimensions::volume(16, 6, 3));
        assert!(out.data().iter().all(|v| (v - 2.0).abs() < 1e-9));
        assert!(log.contains("linear interpolation in y-dimension"));
        assert!(log.contains("nearest-neighbor interpolation in z-dimension"));
        assert!(!log.contains("in x-dimension: "));
    }

    #[test]
    fn test_unit_factor_axes_untouched() {
        let image = Image::from_fn(Dimensions::plane(3, 4), |c| (c.x * 7 + c.y) as i32).unwrap();
        let out = scale(&image, ScaleFactors::plane(1.0, 2.0), Scheme::Nearest).unwrap();
        assert_eq!(out.dims(), Dimensions::plane(3, 8));
        // Rows are duplicated: shift is -0.25, so row y reads row y / 2
        for y in 0..8 {
            for x in 0..3 {
                let v = out.get(&resample_core::Coordinates::new(x, y, 0, 0, 0)).unwrap();
                assert_eq!(v, (x * 7 + y / 2) as i32);
            }
        }
    }
}
