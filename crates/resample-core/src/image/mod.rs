//! Image - dense five-dimensional sample container
//!
//! `Image<T>` owns a contiguous buffer of elements of type `T` laid out
//! with x varying fastest, then y, z, t and c. It also carries the
//! physical [`Aspects`] of its axes.
//!
//! # Examples
//!
//! ```
//! use resample_core::{Coordinates, Dimensions, Image};
//!
//! let mut image = Image::<u8>::new(Dimensions::plane(4, 3)).unwrap();
//! image.set(&Coordinates::new(1, 2, 0, 0, 0), 7).unwrap();
//! assert_eq!(image.get(&Coordinates::new(1, 2, 0, 0, 0)).unwrap(), 7);
//! assert_eq!(image.maximum(), 7.0);
//! ```

pub mod border;
pub mod float;

use crate::error::{Error, Result};
use crate::geometry::{Aspects, Axis, Coordinates, Dimensions};
use crate::sample::Sample;

/// Allocate a buffer of `count` copies of `value`, reporting allocation
/// failure as an error instead of aborting.
pub(crate) fn try_alloc<V: Clone>(count: usize, value: V) -> Result<Vec<V>> {
    let mut data = Vec::new();
    data.try_reserve_exact(count)
        .map_err(|_| Error::AllocationFailed(count))?;
    data.resize(count, value);
    Ok(data)
}

/// Dense five-dimensional image
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: Sample> {
    /// Axis extents
    dims: Dimensions,
    /// Physical sample spacing
    aspects: Aspects,
    /// Elements (x fastest, no padding)
    data: Vec<T>,
}

impl<T: Sample> Image<T> {
    /// Create a new image with every element set to `T::default()`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimensions` if any extent is 0 and
    /// `Error::AllocationFailed` if the buffer cannot be allocated.
    pub fn new(dims: Dimensions) -> Result<Self> {
        Self::with_value(dims, T::default())
    }

    /// Create a new image with every element set to `value`
    ///
    /// # Errors
    ///
    /// Same as [`Image::new`].
    pub fn with_value(dims: Dimensions, value: T) -> Result<Self> {
        dims.validate()?;
        let count = dims.count().ok_or(Error::AllocationFailed(usize::MAX))?;
        let data = try_alloc(count, value)?;
        Ok(Self {
            dims,
            aspects: Aspects::default(),
            data,
        })
    }

    /// Create an image from existing data in memory order
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimensions` if any extent is 0 and
    /// `Error::DataLengthMismatch` if `data` does not hold exactly one
    /// element per position.
    pub fn from_vec(dims: Dimensions, data: Vec<T>) -> Result<Self> {
        dims.validate()?;
        let expected = dims.count().ok_or(Error::AllocationFailed(usize::MAX))?;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            dims,
            aspects: Aspects::default(),
            data,
        })
    }

    /// Create an image by evaluating `f` at every position
    ///
    /// # Errors
    ///
    /// Same as [`Image::new`].
    pub fn from_fn<F>(dims: Dimensions, mut f: F) -> Result<Self>
    where
        F: FnMut(Coordinates) -> T,
    {
        let mut image = Self::new(dims)?;
        let mut i = 0;
        for c in 0..dims.c {
            for t in 0..dims.t {
                for z in 0..dims.z {
                    for y in 0..dims.y {
                        for x in 0..dims.x {
                            image.data[i] = f(Coordinates::new(x, y, z, t, c));
                            i += 1;
                        }
                    }
                }
            }
        }
        Ok(image)
    }

    /// Axis extents
    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Physical sample spacing
    #[inline]
    pub fn aspects(&self) -> Aspects {
        self.aspects
    }

    /// Replace the physical sample spacing
    pub fn set_aspects(&mut self, aspects: Aspects) {
        self.aspects = aspects;
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a valid image holds at least one element
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Short description of the element type
    pub fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    /// Elements in memory order
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable elements in memory order
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image, returning its elements
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Independent copy of this image
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    fn checked_offset(&self, coords: &Coordinates) -> Result<usize> {
        if !self.dims.contains(coords) {
            return Err(Error::CoordinatesOutOfBounds {
                coords: *coords,
                dims: self.dims,
            });
        }
        Ok(self.dims.offset(coords))
    }

    /// Element at `coords`
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordinatesOutOfBounds` if `coords` lies outside.
    pub fn get(&self, coords: &Coordinates) -> Result<T> {
        let i = self.checked_offset(coords)?;
        Ok(self.data[i])
    }

    /// Replace the element at `coords`
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordinatesOutOfBounds` if `coords` lies outside.
    pub fn set(&mut self, coords: &Coordinates, value: T) -> Result<()> {
        let i = self.checked_offset(coords)?;
        self.data[i] = value;
        Ok(())
    }

    /// Component `component` of the element at `coords` as a real value
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordinatesOutOfBounds` or
    /// `Error::ComponentOutOfBounds`.
    pub fn value(&self, coords: &Coordinates, component: usize) -> Result<f64> {
        check_component::<T>(component)?;
        Ok(self.get(coords)?.component(component))
    }

    /// Write a real value into component `component` at `coords`
    ///
    /// # Errors
    ///
    /// Same as [`Image::value`].
    pub fn set_value(&mut self, coords: &Coordinates, component: usize, value: f64) -> Result<()> {
        check_component::<T>(component)?;
        let i = self.checked_offset(coords)?;
        self.data[i].set_component(component, value);
        Ok(())
    }

    /// Read the line along `axis` passing through `start` into `out`.
    ///
    /// The coordinate of `start` along `axis` is the first element read;
    /// `out.len()` elements are read.
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordinatesOutOfBounds` if the line leaves the image
    /// and `Error::ComponentOutOfBounds` for a bad component index.
    pub fn get_line(
        &self,
        axis: Axis,
        start: &Coordinates,
        component: usize,
        out: &mut [f64],
    ) -> Result<()> {
        check_component::<T>(component)?;
        let base = self.line_base(axis, start, out.len())?;
        let stride = self.dims.stride(axis);
        for (k, v) in out.iter_mut().enumerate() {
            *v = self.data[base + k * stride].component(component);
        }
        Ok(())
    }

    /// Write `values` along `axis` starting at `start`.
    ///
    /// # Errors
    ///
    /// Same as [`Image::get_line`].
    pub fn set_line(
        &mut self,
        axis: Axis,
        start: &Coordinates,
        component: usize,
        values: &[f64],
    ) -> Result<()> {
        check_component::<T>(component)?;
        let base = self.line_base(axis, start, values.len())?;
        let stride = self.dims.stride(axis);
        for (k, &v) in values.iter().enumerate() {
            self.data[base + k * stride].set_component(component, v);
        }
        Ok(())
    }

    fn line_base(&self, axis: Axis, start: &Coordinates, len: usize) -> Result<usize> {
        let last = start.with(axis, start.get(axis) + len.saturating_sub(1));
        if !self.dims.contains(start) || !self.dims.contains(&last) {
            return Err(Error::CoordinatesOutOfBounds {
                coords: last,
                dims: self.dims,
            });
        }
        Ok(self.dims.offset(start))
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Set every component of every element to the real value `value`
    pub fn fill_value(&mut self, value: f64) {
        let mut element = T::default();
        for k in 0..T::COMPONENTS {
            element.set_component(k, value);
        }
        self.data.fill(element);
    }

    /// Smallest component value over the whole image
    pub fn minimum(&self) -> f64 {
        self.fold_components(f64::INFINITY, f64::min)
    }

    /// Largest component value over the whole image
    pub fn maximum(&self) -> f64 {
        self.fold_components(f64::NEG_INFINITY, f64::max)
    }

    fn fold_components(&self, init: f64, f: fn(f64, f64) -> f64) -> f64 {
        self.data.iter().fold(init, |acc, e| {
            (0..T::COMPONENTS).fold(acc, |acc, k| f(acc, e.component(k)))
        })
    }
}

fn check_component<T: Sample>(component: usize) -> Result<()> {
    if component >= T::COMPONENTS {
        return Err(Error::ComponentOutOfBounds {
            index: component,
            count: T::COMPONENTS,
        });
    }
    Ok(())
}
