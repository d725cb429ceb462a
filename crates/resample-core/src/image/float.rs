//! FloatImage - `f64` working buffer with borders
//!
//! Resampling never works on caller images directly. One component of the
//! input is copied into a `FloatImage`, optionally surrounded by border
//! samples so that interpolation kernels near the edge read defined values.
//! The borders are then filled either by mirror reflection of the interior
//! or with a single constant.
//!
//! Coordinates passed to [`FloatImage::at`] and the line accessors are
//! *buffer* coordinates: the first interior sample sits at `borders`.

use super::border::BorderRule;
use super::try_alloc;
use crate::error::{Error, Result};
use crate::geometry::{Axis, Borders, Coordinates, Dimensions, line_starts};
use crate::image::Image;
use crate::sample::Sample;

/// Single-component floating-point working image
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    /// Interior extents
    interior: Dimensions,
    /// Border size on each side of each axis
    borders: Borders,
    /// Buffer extents (interior plus borders)
    dims: Dimensions,
    /// Samples in memory order over the buffer extents
    data: Vec<f64>,
}

impl FloatImage {
    /// Create a zero-filled buffer with the given interior and borders
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimensions` if any interior extent is 0 and
    /// `Error::AllocationFailed` if the buffer cannot be allocated.
    pub fn new(interior: Dimensions, borders: Borders) -> Result<Self> {
        interior.validate()?;
        let dims = interior.bordered(&borders);
        let count = dims.count().ok_or(Error::AllocationFailed(usize::MAX))?;
        let data = try_alloc(count, 0.0)?;
        Ok(Self {
            interior,
            borders,
            dims,
            data,
        })
    }

    /// Copy component `component` of `image` into the interior of a new
    /// buffer with the given borders. Border samples start at 0.
    ///
    /// # Errors
    ///
    /// Returns `Error::ComponentOutOfBounds` for a bad component index and
    /// `Error::AllocationFailed` if the buffer cannot be allocated.
    pub fn bordered<T: Sample>(image: &Image<T>, component: usize, borders: Borders) -> Result<Self> {
        if component >= T::COMPONENTS {
            return Err(Error::ComponentOutOfBounds {
                index: component,
                count: T::COMPONENTS,
            });
        }
        let mut out = Self::new(image.dims(), borders)?;
        let idims = image.dims();
        let src = image.data();
        let mut i = 0;
        for c in 0..idims.c {
            for t in 0..idims.t {
                for z in 0..idims.z {
                    for y in 0..idims.y {
                        let base = out.offset(&Coordinates::new(
                            borders.x,
                            y + borders.y,
                            z + borders.z,
                            t + borders.t,
                            c + borders.c,
                        ));
                        for x in 0..idims.x {
                            out.data[base + x] = src[i].component(component);
                            i += 1;
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    /// Copy component `component` of `image` without borders
    ///
    /// # Errors
    ///
    /// Same as [`FloatImage::bordered`].
    pub fn from_component<T: Sample>(image: &Image<T>, component: usize) -> Result<Self> {
        Self::bordered(image, component, Borders::default())
    }

    /// Write the interior into component `component` of `image`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DataLengthMismatch` if the interior extents differ
    /// from the image extents.
    pub fn write_component<T: Sample>(&self, image: &mut Image<T>, component: usize) -> Result<()> {
        if image.dims() != self.interior {
            return Err(Error::DataLengthMismatch {
                expected: self.interior.count().unwrap_or(0),
                actual: image.len(),
            });
        }
        let b = self.borders;
        let idims = self.interior;
        let mut i = 0;
        let dst = image.data_mut();
        for c in 0..idims.c {
            for t in 0..idims.t {
                for z in 0..idims.z {
                    for y in 0..idims.y {
                        let base = self.offset(&Coordinates::new(
                            b.x,
                            y + b.y,
                            z + b.z,
                            t + b.t,
                            c + b.c,
                        ));
                        for x in 0..idims.x {
                            dst[i].set_component(component, self.data[base + x]);
                            i += 1;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Interior extents
    #[inline]
    pub fn interior(&self) -> Dimensions {
        self.interior
    }

    /// Border sizes
    #[inline]
    pub fn borders(&self) -> Borders {
        self.borders
    }

    /// Buffer extents including borders
    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Samples in memory order over the buffer extents
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable samples
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Linear offset of buffer coordinates
    #[inline]
    pub fn offset(&self, coords: &Coordinates) -> usize {
        self.dims.offset(coords)
    }

    /// Sample at buffer coordinates `(x, y, z, t, c)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates lie outside the buffer.
    #[inline]
    pub fn at(&self, x: usize, y: usize, z: usize, t: usize, c: usize) -> f64 {
        self.data[self.dims.offset(&Coordinates::new(x, y, z, t, c))]
    }

    /// Multiply every sample, borders included, by `factor`
    pub fn multiply(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// Read `out.len()` samples along `axis` starting at buffer
    /// coordinates `start`.
    ///
    /// # Panics
    ///
    /// Panics if the line leaves the buffer.
    pub fn get_line(&self, axis: Axis, start: &Coordinates, out: &mut [f64]) {
        let base = self.offset(start);
        let stride = self.dims.stride(axis);
        for (k, v) in out.iter_mut().enumerate() {
            *v = self.data[base + k * stride];
        }
    }

    /// Write `values` along `axis` starting at buffer coordinates `start`.
    ///
    /// # Panics
    ///
    /// Panics if the line leaves the buffer.
    pub fn set_line(&mut self, axis: Axis, start: &Coordinates, values: &[f64]) {
        let base = self.offset(start);
        let stride = self.dims.stride(axis);
        for (k, &v) in values.iter().enumerate() {
            self.data[base + k * stride] = v;
        }
    }

    /// Fill every border sample by whole-sample mirror reflection of the
    /// interior.
    ///
    /// Axes are processed in memory order and each pass covers the borders
    /// of the axes already handled, so corner regions receive the
    /// reflection along every axis.
    pub fn mirror_borders(&mut self) {
        for axis in Axis::ALL {
            let b = self.borders.get(axis);
            if b == 0 {
                continue;
            }
            let n = self.interior.get(axis);
            let total = self.dims.get(axis);
            let stride = self.dims.stride(axis);
            for start in line_starts(self.dims, axis) {
                let base = self.offset(&start);
                for k in (0..b).chain(b + n..total) {
                    let rel = k as isize - b as isize;
                    let src = BorderRule::Reflect.map(rel, n).unwrap_or(0) + b;
                    self.data[base + k * stride] = self.data[base + src * stride];
                }
            }
        }
    }

    /// Set every border sample to `value`
    pub fn fill_borders(&mut self, value: f64) {
        let b = self.borders;
        let n = self.interior;
        let dims = self.dims;
        let inside = |v: usize, lo: usize, len: usize| v >= lo && v < lo + len;
        let mut i = 0;
        for c in 0..dims.c {
            let ic = inside(c, b.c, n.c);
            for t in 0..dims.t {
                let it = ic && inside(t, b.t, n.t);
                for z in 0..dims.z {
                    let iz = it && inside(z, b.z, n.z);
                    for y in 0..dims.y {
                        let iy = iz && inside(y, b.y, n.y);
                        for x in 0..dims.x {
                            if !(iy && inside(x, b.x, n.x)) {
                                self.data[i] = value;
                            }
                            i += 1;
                        }
                    }
                }
            }
        }
    }
}
