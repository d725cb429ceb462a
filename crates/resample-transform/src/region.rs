//! Axis-aligned region operations
//!
//! - [`crop`] copies an inclusive sub-box
//! - [`embed`] places an image inside a larger one, filling the rest
//! - [`mirror`] reverses the element order along selected axes in place
//! - [`turn`] rotates by whole quarter turns about a spatial axis

use crate::matrix::SpaceAxis;
use crate::sink::LOG_TARGET;
use crate::{TransformError, TransformResult};
use resample_core::{Axes, Axis, BorderRule, Coordinates, Dimensions, Image, Sample, line_starts};

/// How [`embed`] fills positions outside the embedded image
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EmbedFill {
    /// Fill with 0
    #[default]
    Zero,
    /// Fill with the smallest component value of the input
    Minimum,
    /// Fill with the largest component value of the input
    Maximum,
    /// Fill with a fixed value
    Constant(f64),
    /// Tile the input periodically
    Repeat,
    /// Reflect the input about its first and last elements
    Mirror,
    /// Replicate the nearest edge element
    Clamp,
}

impl EmbedFill {
    fn rule(self) -> Option<BorderRule> {
        match self {
            EmbedFill::Repeat => Some(BorderRule::Repeat),
            EmbedFill::Mirror => Some(BorderRule::Reflect),
            EmbedFill::Clamp => Some(BorderRule::Clamp),
            _ => None,
        }
    }
}

/// Copy the inclusive box from `start` to `stop`.
///
/// The result carries the aspects of the input.
///
/// # Errors
///
/// Returns `TransformError::RegionOutOfBounds` if `stop` lies outside the
/// image or `start` exceeds `stop` on any axis.
pub fn crop<T: Sample>(
    image: &Image<T>,
    start: &Coordinates,
    stop: &Coordinates,
) -> TransformResult<Image<T>> {
    let dims = image.dims();
    for axis in Axis::ALL {
        let (lo, hi, n) = (start.get(axis), stop.get(axis), dims.get(axis));
        if hi >= n {
            return Err(TransformError::RegionOutOfBounds(format!(
                "{axis}-stop {hi} outside extent {n}"
            )));
        }
        if lo > hi {
            return Err(TransformError::RegionOutOfBounds(format!(
                "{axis}-start {lo} larger than {axis}-stop {hi}"
            )));
        }
    }

    let newdims = Dimensions::from_array(
        Axis::ALL.map(|a| stop.get(a) - start.get(a) + 1),
    );
    tracing::debug!(
        target: LOG_TARGET,
        "Cropping {dims} from {start} to {stop}: output dimensions {newdims}"
    );
    let mut out = Image::from_fn(newdims, |c| {
        let src = Coordinates::from_array(Axis::ALL.map(|a| c.get(a) + start.get(a)));
        image.data()[dims.offset(&src)]
    })?;
    out.set_aspects(image.aspects());
    Ok(out)
}

/// Embed `image` at `position` in a new image of extents `dims`.
///
/// # Errors
///
/// Returns `TransformError::RegionOutOfBounds` if the input does not fit
/// at `position`, and a core error for invalid `dims`.
pub fn embed<T: Sample>(
    image: &Image<T>,
    dims: Dimensions,
    position: &Coordinates,
    fill: EmbedFill,
) -> TransformResult<Image<T>> {
    dims.validate()?;
    let idims = image.dims();
    for axis in Axis::ALL {
        let fits = position
            .get(axis)
            .checked_add(idims.get(axis))
            .is_some_and(|end| end <= dims.get(axis));
        if !fits {
            return Err(TransformError::RegionOutOfBounds(format!(
                "input of {axis}-extent {} at {} exceeds {axis}-extent {}",
                idims.get(axis),
                position.get(axis),
                dims.get(axis)
            )));
        }
    }

    let background = match fill {
        EmbedFill::Minimum => image.minimum(),
        EmbedFill::Maximum => image.maximum(),
        EmbedFill::Constant(v) => v,
        _ => 0.0,
    };
    let mut constant = T::default();
    for k in 0..T::COMPONENTS {
        constant.set_component(k, background);
    }
    let rule = fill.rule();
    let data = image.data();
    tracing::debug!(
        target: LOG_TARGET,
        "Embedding {idims} at {position} in {dims} with {fill:?} fill"
    );

    let mut out = Image::from_fn(dims, |c| {
        let mut src = Coordinates::default();
        for axis in Axis::ALL {
            let rel = c.get(axis) as isize - position.get(axis) as isize;
            let n = idims.get(axis);
            let mapped = if rel >= 0 && (rel as usize) < n {
                Some(rel as usize)
            } else {
                rule.and_then(|r| r.map(rel, n))
            };
            match mapped {
                Some(i) => src.set(axis, i),
                None => return constant,
            }
        }
        data[idims.offset(&src)]
    })?;
    out.set_aspects(image.aspects());
    Ok(out)
}

/// Reverse the element order along every axis selected in `axes`
pub fn mirror<T: Sample>(image: &mut Image<T>, axes: Axes) {
    let dims = image.dims();
    for axis in axes.iter() {
        let n = dims.get(axis);
        let stride = dims.stride(axis);
        for start in line_starts(dims, axis) {
            let base = dims.offset(&start);
            let data = image.data_mut();
            for k in 0..n / 2 {
                data.swap(base + k * stride, base + (n - 1 - k) * stride);
            }
        }
    }
}

/// Turn `image` by `times` quarter turns about `axis`.
///
/// A positive quarter turn maps +x onto +y about z, +y onto +z about x
/// and +z onto +x about y. Negative `times` turn the other way. Samples
/// are only moved, never interpolated; the extents and aspects of the two
/// axes in the turning plane are exchanged for odd `times`.
///
/// # Errors
///
/// Returns a core error if the output cannot be allocated.
pub fn turn<T: Sample>(
    image: &Image<T>,
    times: i32,
    axis: SpaceAxis,
) -> TransformResult<Image<T>> {
    let (u, v) = match axis {
        SpaceAxis::X => (Axis::Y, Axis::Z),
        SpaceAxis::Y => (Axis::Z, Axis::X),
        SpaceAxis::Z => (Axis::X, Axis::Y),
    };
    let quarters = times.rem_euclid(4);
    let dims = image.dims();
    tracing::debug!(
        target: LOG_TARGET,
        "Turning {dims} by {} degrees about {axis:?}",
        90 * quarters
    );

    match quarters {
        0 => return Ok(image.duplicate()),
        2 => {
            let mut out = image.duplicate();
            mirror(&mut out, Axes::NONE.with(u, true).with(v, true));
            return Ok(out);
        }
        _ => {}
    }

    let (nu, nv) = (dims.get(u), dims.get(v));
    let data = image.data();
    let mut out = Image::from_fn(dims.with(u, nv).with(v, nu), |c| {
        let (ou, ov) = (c.get(u), c.get(v));
        let (iu, iv) = if quarters == 1 {
            (ov, nv - 1 - ou)
        } else {
            (nu - 1 - ov, ou)
        };
        data[dims.offset(&c.with(u, iu).with(v, iv))]
    })?;
    let a = image.aspects();
    out.set_aspects(a.with(u, a.get(v)).with(v, a.get(u)));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resample_core::Color;

    fn row(values: &[i32]) -> Image<i32> {
        Image::from_vec(Dimensions::plane(values.len(), 1), values.to_vec()).unwrap()
    }

    fn embedded_row(fill: EmbedFill) -> Vec<i32> {
        let out = embed(&row(&[1, 2, 3]), Dimensions::plane(9, 1), &Coordinates::new(3, 0, 0, 0, 0), fill)
            .unwrap();
        out.into_data()
    }

    #[test]
    fn test_crop_bounds() {
        let image = row(&[1, 2, 3, 4]);
        let c = |x| Coordinates::new(x, 0, 0, 0, 0);
        assert_eq!(crop(&image, &c(1), &c(2)).unwrap().data(), &[2, 3]);
        assert!(matches!(
            crop(&image, &c(1), &c(4)),
            Err(TransformError::RegionOutOfBounds(_))
        ));
        assert!(crop(&image, &c(3), &c(2)).is_err());
    }

    #[test]
    fn test_embed_value_fills() {
        assert_eq!(embedded_row(EmbedFill::Zero), vec![0, 0, 0, 1, 2, 3, 0, 0, 0]);
        assert_eq!(embedded_row(EmbedFill::Minimum), vec![1, 1, 1, 1, 2, 3, 1, 1, 1]);
        assert_eq!(embedded_row(EmbedFill::Maximum), vec![3, 3, 3, 1, 2, 3, 3, 3, 3]);
        assert_eq!(
            embedded_row(EmbedFill::Constant(-4.0)),
            vec![-4, -4, -4, 1, 2, 3, -4, -4, -4]
        );
    }

    #[test]
    fn test_embed_index_fills() {
        assert_eq!(embedded_row(EmbedFill::Repeat), vec![1, 2, 3, 1, 2, 3, 1, 2, 3]);
        assert_eq!(embedded_row(EmbedFill::Mirror), vec![2, 3, 2, 1, 2, 3, 2, 1, 2]);
        assert_eq!(embedded_row(EmbedFill::Clamp), vec![1, 1, 1, 1, 2, 3, 3, 3, 3]);
    }

    #[test]
    fn test_embed_must_fit() {
        let err = embed(&row(&[1, 2, 3]), Dimensions::plane(4, 1), &Coordinates::new(2, 0, 0, 0, 0), EmbedFill::Zero)
            .unwrap_err();
        assert!(matches!(err, TransformError::RegionOutOfBounds(_)));

        let far = Coordinates::new(usize::MAX, 0, 0, 0, 0);
        let err = embed(&row(&[1, 2, 3]), Dimensions::plane(4, 1), &far, EmbedFill::Zero).unwrap_err();
        assert!(matches!(err, TransformError::RegionOutOfBounds(_)));
    }

    #[test]
    fn test_mirror_color_plane() {
        let dims = Dimensions::plane(3, 2);
        let mut image = Image::from_fn(dims, |c| Color::new(c.x as u8, c.y as u8, 0)).unwrap();
        mirror(&mut image, Axes::XY);
        assert_eq!(image.get(&Coordinates::default()).unwrap(), Color::new(2, 1, 0));
        assert_eq!(image.get(&Coordinates::new(2, 1, 0, 0, 0)).unwrap(), Color::new(0, 0, 0));
    }

    #[test]
    fn test_turn_plane() {
        // 0 1 2
        // 3 4 5
        let image = Image::from_vec(Dimensions::plane(3, 2), vec![0, 1, 2, 3, 4, 5]).unwrap();
        let quarter = turn(&image, 1, SpaceAxis::Z).unwrap();
        assert_eq!(quarter.dims(), Dimensions::plane(2, 3));
        assert_eq!(quarter.data(), &[3, 0, 4, 1, 5, 2]);
        let back = turn(&image, -1, SpaceAxis::Z).unwrap();
        assert_eq!(back.data(), &[2, 5, 1, 4, 0, 3]);
        assert_eq!(turn(&image, 3, SpaceAxis::Z).unwrap(), back);
        assert_eq!(turn(&image, 2, SpaceAxis::Z).unwrap().data(), &[5, 4, 3, 2, 1, 0]);
        assert_eq!(turn(&image, 4, SpaceAxis::Z).unwrap(), image);
    }

    #[test]
    fn test_turn_swaps_aspects() {
        let mut image = Image::<u8>::new(Dimensions::volume(4, 3, 2)).unwrap();
        image.set_aspects(resample_core::Aspects::new(1.0, 2.0, 3.0, 1.0, 1.0));
        let out = turn(&image, 1, SpaceAxis::Y).unwrap();
        assert_eq!(out.dims(), Dimensions::volume(2, 3, 4));
        assert_eq!(out.aspects(), resample_core::Aspects::new(3.0, 2.0, 1.0, 1.0, 1.0));
        let out = turn(&image, 1, SpaceAxis::X).unwrap();
        assert_eq!(out.dims(), Dimensions::volume(4, 2, 3));
        assert_eq!(out.aspects().y, 3.0);
    }
}
