//! Affine transformation of images
//!
//! Output samples are computed by backward mapping: every output position
//! is taken relative to the output center, mapped through the inverse of
//! the forward matrix and sampled in the input around the input center.
//!
//! ```text
//! source = pc + B * (p - pcoff) + Bt
//! ```
//!
//! `pc` is the input center `(extent - 1) / 2` per spatial axis, `pcoff`
//! the same center shifted by half the change in extent, `B` the linear
//! part of the backward matrix and `Bt` its translation column.
//!
//! When the third row of the forward matrix is that of the identity the
//! transform is confined to the x-y plane and every z slice is resampled
//! on its own. Otherwise x, y and z are interpolated jointly.
//!
//! Source positions falling off the input yield the background value.
//! For nearest-neighbor sampling this means a rounded index outside
//! `[0, extent - 1]`. For the other kernels a position `t` is off the
//! input when `t <= -1` or `floor(t) > extent - 1`.

use crate::border::BorderPolicy;
use crate::kernel::{KernelWeights, Scheme};
use crate::matrix::{AffineMatrix, Point3};
use crate::prefilter::prefilter_image;
use crate::sink::{Messenger, NullProgressor, Progressor, TracingMessenger, component_range};
use crate::{TransformError, TransformResult};
use resample_core::{Axes, Axis, Color, Coordinates, Dimensions, FloatImage, Image, Sample};
use std::fmt;
use std::sync::Arc;

/// Slack allowed when rounding fitted extents up
const FIT_TOLERANCE: f64 = 1e-6;

/// Options for [`affine`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineOptions {
    /// Interpolation scheme
    pub scheme: Scheme,
    /// Resize the output to hold the whole transformed input
    pub fit: bool,
    /// Blend image edges into the background
    pub antialias: bool,
    /// Value of output samples that map outside the input
    pub background: f64,
}

impl Default for AffineOptions {
    fn default() -> Self {
        Self {
            scheme: Scheme::Linear,
            fit: false,
            antialias: false,
            background: 0.0,
        }
    }
}

impl AffineOptions {
    /// Create options with a specific interpolation scheme
    pub fn with_scheme(scheme: Scheme) -> Self {
        Self {
            scheme,
            ..Default::default()
        }
    }

    /// Set whether the output is resized to fit the result
    pub fn fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    /// Set whether image-background transitions are anti-aliased
    pub fn antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    /// Set the background value
    pub fn background(mut self, background: f64) -> Self {
        self.background = background;
        self
    }
}

/// Geometry of one affine run
#[derive(Debug, Clone, Copy)]
struct Plan {
    indims: Dimensions,
    newdims: Dimensions,
    forward: AffineMatrix,
    backward: AffineMatrix,
    /// Input center per spatial axis
    center: [f64; 3],
    /// Output position that maps onto the input center
    offset: [f64; 3],
    planar: bool,
}

impl Plan {
    fn new(indims: Dimensions, transform: &AffineMatrix, fit: bool) -> TransformResult<Self> {
        let forward = if fit {
            transform.without_translation()
        } else {
            *transform
        };
        if forward.determinant() == 0.0 {
            return Err(TransformError::SingularMatrix);
        }
        let backward = forward.invert()?;

        let extents = spatial(indims);
        let center = extents.map(|n| (n - 1.0) / 2.0);
        let newdims = if fit {
            fitted_dims(&forward, indims)
        } else {
            indims
        };
        let newextents = spatial(newdims);
        let offset = [0usize, 1, 2].map(|i| (newextents[i] - extents[i]) / 2.0 + center[i]);

        Ok(Self {
            indims,
            newdims,
            forward,
            backward,
            center,
            offset,
            planar: forward.is_planar(),
        })
    }

    /// Number of jointly resampled axes
    fn resampled(&self) -> usize {
        if self.planar { 2 } else { 3 }
    }

    /// Source position of output sample `(x, y, z)`
    #[inline]
    fn source(&self, x: usize, y: usize, z: usize) -> [f64; 3] {
        let d = [
            x as f64 - self.offset[0],
            y as f64 - self.offset[1],
            z as f64 - self.offset[2],
        ];
        let r = self.backward.rows();
        [0usize, 1, 2].map(|i| {
            self.center[i] + r[i][0] * d[0] + r[i][1] * d[1] + r[i][2] * d[2] + r[i][3]
        })
    }
}

fn spatial(dims: Dimensions) -> [f64; 3] {
    [dims.x as f64, dims.y as f64, dims.z as f64]
}

/// Output extents holding the whole input volume transformed by `forward`
/// (translation already removed).
fn fitted_dims(forward: &AffineMatrix, indims: Dimensions) -> Dimensions {
    let half = spatial(indims).map(|n| n / 2.0);
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for corner in 0..8 {
        let sign = |bit: usize| if corner & bit == 0 { -1.0 } else { 1.0 };
        let p = forward.transform_point(Point3::new(
            sign(1) * half[0],
            sign(2) * half[1],
            sign(4) * half[2],
        ));
        for (i, v) in [p.x, p.y, p.z].into_iter().enumerate() {
            min[i] = min[i].min(v);
            max[i] = max[i].max(v);
        }
    }
    let extent = |i: usize| ((max[i] - min[i] - FIT_TOLERANCE).ceil().max(1.0)) as usize;
    Dimensions::new(extent(0), extent(1), extent(2), indims.t, indims.c)
}

/// Affine transformer
///
/// Carries the background value and the diagnostic and progress sinks;
/// the geometry of each transform is passed to [`AffineResampler::run`].
///
/// # Examples
///
/// ```
/// use resample_core::{Dimensions, Image};
/// use resample_transform::{AffineMatrix, AffineResampler, Scheme, SpaceAxis};
///
/// let image = Image::<f32>::with_value(Dimensions::plane(8, 6), 1.0).unwrap();
/// let mut transform = AffineMatrix::identity();
/// transform.rotate(30.0, SpaceAxis::Z);
/// let rotated = AffineResampler::new()
///     .background(0.0)
///     .run(&image, &transform, Scheme::Cubic, true, false)
///     .unwrap();
/// assert!(rotated.dims().x > 8);
/// ```
#[derive(Clone)]
pub struct AffineResampler {
    background: f64,
    messenger: Arc<dyn Messenger>,
    progressor: Arc<dyn Progressor>,
}

impl Default for AffineResampler {
    fn default() -> Self {
        Self {
            background: 0.0,
            messenger: Arc::new(TracingMessenger),
            progressor: Arc::new(NullProgressor),
        }
    }
}

impl fmt::Debug for AffineResampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AffineResampler")
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl AffineResampler {
    /// Create a resampler with background 0 that logs through `tracing`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background value
    pub fn background(mut self, background: f64) -> Self {
        self.background = background;
        self
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

    /// Affine transform `image`.
    ///
    /// # Arguments
    ///
    /// * `image` - Input image
    /// * `transform` - Forward transformation about the image center
    /// * `scheme` - Interpolation scheme
    /// * `fit` - Resize the output to hold the whole result; the
    ///   translation column of `transform` is then ignored
    /// * `antialias` - Blend image edges into the background instead of
    ///   mirroring the image at its edges
    ///
    /// # Errors
    ///
    /// Returns `TransformError::SingularMatrix` if the (possibly
    /// translation-stripped) transform cannot be inverted, before any
    /// output is allocated.
    pub fn run<T: Sample>(
        &self,
        image: &Image<T>,
        transform: &AffineMatrix,
        scheme: Scheme,
        fit: bool,
        antialias: bool,
    ) -> TransformResult<Image<T>> {
        let log = |message: String| self.messenger.log(&message);

        log(format!("Affine transforming {}", T::TYPE_NAME));
        log(format!("Input image dimensions: {}", image.dims()));
        if fit {
            log("Adjusting output image dimensions to fit result".into());
            log("Therefore ignoring translation component".into());
        }

        let plan = Plan::new(image.dims(), transform, fit)?;
        log(format!("Forward affine transformation matrix:\n{}", plan.forward));
        log(format!("Backward affine transformation matrix:\n{}", plan.backward));
        log(format!("Output image dimensions: {}", plan.newdims));

        if plan.forward.is_identity() {
            log("Identity transformation: returning a copy of the input".into());
            return Ok(image.duplicate());
        }

        log(format!("Using {}", scheme.description()));
        log(format!("Background filling with value {}", self.background));
        if plan.planar {
            log("Affine transforming only in x-y".into());
        }
        if antialias {
            log("Anti-aliasing image-background transitions".into());
        }

        let mut out = Image::<T>::new(plan.newdims)?;
        out.set_aspects(image.aspects());

        for component in 0..T::COMPONENTS {
            let (lo, hi) = component_range(T::COMPONENTS, component);
            self.progressor.range(lo, hi);
            let label = if T::COMPONENTS == 3 {
                let name = Color::component_name(component);
                log(format!("Processing {name} component"));
                format!(" {name} component")
            } else {
                String::new()
            };
            self.progressor.status(&format!("Affine transforming{label}..."));

            let work = self.prepare(image, component, &plan, scheme, antialias)?;
            self.resample(&work, &mut out, component, &plan, scheme)?;
        }
        self.progressor.status("");

        Ok(out)
    }

    /// Bordered, prefiltered working copy of one component
    fn prepare<T: Sample>(
        &self,
        image: &Image<T>,
        component: usize,
        plan: &Plan,
        scheme: Scheme,
        antialias: bool,
    ) -> TransformResult<FloatImage> {
        let borders = BorderPolicy::borders(scheme, plan.planar);
        let mut work = FloatImage::bordered(image, component, borders)?;
        if scheme == Scheme::Nearest {
            return Ok(work);
        }

        let axes = if plan.planar { Axes::XY } else { Axes::XYZ };
        if let Some(spline) = scheme.spline() {
            self.messenger
                .log(&format!("Applying {} prefilter", spline.description()));
            prefilter_image(&mut work, axes, spline);

            if antialias {
                // Unfiltered axes of extent 1 scale values by the kernel center weight
                let degenerate = axes.iter().filter(|&a| plan.indims.get(a) == 1).count();
                if degenerate > 0 {
                    let factor = spline.center_weight().powi(-(degenerate as i32));
                    self.messenger
                        .log(&format!("Correction scaling with factor {factor}"));
                    work.multiply(factor);
                }
            }
        }

        BorderPolicy::new(antialias, self.background).extend(&mut work);
        Ok(work)
    }

    fn resample<T: Sample>(
        &self,
        work: &FloatImage,
        out: &mut Image<T>,
        component: usize,
        plan: &Plan,
        scheme: Scheme,
    ) -> TransformResult<()> {
        let newdims = plan.newdims;
        self.progressor
            .steps(newdims.c * newdims.t * newdims.z * newdims.y);
        self.progressor.start();

        let mut row = vec![0.0; newdims.x];
        for c in 0..newdims.c {
            for t in 0..newdims.t {
                for z in 0..newdims.z {
                    for y in 0..newdims.y {
                        for (x, value) in row.iter_mut().enumerate() {
                            let source = plan.source(x, y, z);
                            *value = self.interpolate(work, plan, scheme, source, z, t, c);
                        }
                        out.set_line(Axis::X, &Coordinates::new(0, y, z, t, c), component, &row)?;
                        self.progressor.step(1);
                    }
                }
            }
        }

        self.progressor.stop();
        Ok(())
    }

    /// Value at `source` in slice `(t, c)`; `z` is the output slice, used
    /// directly when the transform is planar.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn interpolate(
        &self,
        work: &FloatImage,
        plan: &Plan,
        scheme: Scheme,
        source: [f64; 3],
        z: usize,
        t: usize,
        c: usize,
    ) -> f64 {
        let last = spatial(plan.indims).map(|n| n - 1.0);
        let axes = plan.resampled();

        if scheme == Scheme::Nearest {
            let mut index = [0, 0, z];
            for a in 0..axes {
                let i = (source[a] + 0.5).floor();
                if i < 0.0 || i > last[a] {
                    return self.background;
                }
                index[a] = i as usize;
            }
            return work.at(index[0], index[1], index[2], t, c);
        }

        let borders = work.borders();
        let borders = [borders.x, borders.y, borders.z];
        let mut first = [0, 0, borders[2] + z];
        let mut weights = [KernelWeights::unit(); 3];
        for a in 0..axes {
            let s = source[a];
            let i = s.floor();
            if s <= -1.0 || i > last[a] {
                return self.background;
            }
            weights[a] = scheme.weights(s - i);
            first[a] = (borders[a] as isize + i as isize + scheme.first_tap()) as usize;
        }

        let dims = work.dims();
        let sy = dims.stride(Axis::Y);
        let sz = dims.stride(Axis::Z);
        let base = work.offset(&Coordinates::new(first[0], first[1], first[2], t, c));
        let data = work.data();

        let mut sum = 0.0;
        for (kz, wz) in weights[2].as_slice().iter().enumerate() {
            for (ky, wy) in weights[1].as_slice().iter().enumerate() {
                let start = base + kz * sz + ky * sy;
                let taps = &data[start..start + weights[0].as_slice().len()];
                let acc: f64 = taps
                    .iter()
                    .zip(weights[0].as_slice())
                    .map(|(v, w)| v * w)
                    .sum();
                sum += wz * wy * acc;
            }
        }
        sum
    }
}

/// Affine transform an image with the given options.
///
/// Convenience wrapper around [`AffineResampler::run`] with default sinks.
///
/// # Errors
///
/// Same as [`AffineResampler::run`].
pub fn affine<T: Sample>(
    image: &Image<T>,
    transform: &AffineMatrix,
    options: &AffineOptions,
) -> TransformResult<Image<T>> {
    AffineResampler::new().background(options.background).run(
        image,
        transform,
        options.scheme,
        options.fit,
        options.antialias,
    )
}
