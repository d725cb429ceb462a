//! Recursive spline prefilter
//!
//! Spline-type kernels interpolate only after the samples have been
//! converted into spline coefficients. The conversion is a separable
//! recursive filter: per axis, every line runs a causal and an
//! anti-causal first-order pass for each pole of the spline, followed by
//! multiplication with the spline's gain. Boundary initialization assumes
//! whole-sample mirror symmetry, matching the mirrored borders used when
//! the coefficients are sampled.

use crate::kernel::Spline;
use resample_core::{Axes, Axis, Coordinates, FloatImage, line_starts};

/// Length below which the causal initialization is computed exactly
const HORIZON: usize = 25;

/// Prefilter the interior of one line in place.
///
/// `line` holds `border` samples on each side of the interior; only the
/// interior is read and written. Interiors of length 0 or 1 are left
/// untouched.
pub fn prefilter_line(line: &mut [f64], border: usize, spline: Spline) {
    if line.len() < 2 * border {
        return;
    }
    let end = line.len() - border;
    let interior = &mut line[border..end];
    if interior.len() <= 1 {
        return;
    }
    for &pole in spline.poles() {
        causal_anticausal(interior, pole);
    }
    let gain = spline.gain();
    interior.iter_mut().for_each(|v| *v *= gain);
}

fn causal_anticausal(a: &mut [f64], pole: f64) {
    let n = a.len();
    let last = n - 1;
    let s1 = a[last];
    let s2 = -pole / (1.0 - pole * pole);

    let s0 = if n < HORIZON {
        let mut zi = pole;
        let mut z2i = pole.powi(last as i32);
        let mut sum = a[0] + z2i * a[last];
        z2i = z2i * z2i / pole;
        for &v in &a[1..last] {
            sum += (zi + z2i) * v;
            zi *= pole;
            z2i /= pole;
        }
        sum / (1.0 - zi * zi)
    } else {
        let mut zi = pole;
        let mut sum = a[0];
        for &v in &a[1..HORIZON] {
            sum += zi * v;
            zi *= pole;
        }
        sum
    };

    // Causal pass
    a[0] = s0;
    for i in 1..n {
        a[i] += pole * a[i - 1];
    }

    // Anti-causal pass
    a[last] = s2 * (2.0 * a[last] - s1);
    for i in (0..last).rev() {
        a[i] = pole * (a[i + 1] - a[i]);
    }
}

/// Prefilter every interior line of `image` along each axis in `axes`.
///
/// Axes whose interior extent is 1 are skipped; border samples are not
/// touched and must be filled afterwards.
pub fn prefilter_image(image: &mut FloatImage, axes: Axes, spline: Spline) {
    let interior = image.interior();
    let borders = image.borders();
    let dims = image.dims();

    for axis in axes.iter() {
        let n = interior.get(axis);
        if n <= 1 {
            continue;
        }
        let b = borders.get(axis);
        let mut line = vec![0.0; n + 2 * b];
        for start in line_starts(dims, axis) {
            if !crosses_interior(&start, axis, image) {
                continue;
            }
            let first = start.with(axis, b);
            image.get_line(axis, &first, &mut line[b..b + n]);
            prefilter_line(&mut line, b, spline);
            image.set_line(axis, &first, &line[b..b + n]);
        }
    }
}

/// Whether a line along `axis` through `start` passes through the interior
fn crosses_interior(start: &Coordinates, axis: Axis, image: &FloatImage) -> bool {
    let interior = image.interior();
    let borders = image.borders();
    Axis::ALL.into_iter().filter(|&a| a != axis).all(|a| {
        let v = start.get(a);
        let lo = borders.get(a);
        v >= lo && v < lo + interior.get(a)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Scheme;
    use resample_core::{BorderRule, Borders, Dimensions, Image};

    /// Evaluate the kernel at integer offsets over a mirrored coefficient line
    fn reconstruct(coeffs: &[f64], scheme: Scheme) -> Vec<f64> {
        let n = coeffs.len();
        let w = scheme.weights(0.0);
        (0..n)
            .map(|i| {
                w.as_slice()
                    .iter()
                    .enumerate()
                    .map(|(k, wk)| {
                        let rel = i as isize + scheme.first_tap() + k as isize;
                        let j = BorderRule::Reflect.map(rel, n).unwrap();
                        wk * coeffs[j]
                    })
                    .sum()
            })
            .collect()
    }

    fn signal(n: usize) -> Vec<f64> {
        (0..n).map(|i| ((i * 7) % 11) as f64 + 0.25 * i as f64).collect()
    }

    #[test]
    fn test_constant_line_is_preserved() {
        for spline in [Spline::BSpline3, Spline::OMoms3, Spline::BSpline5] {
            for n in [2, 10, 40] {
                let mut line = vec![5.0; n];
                prefilter_line(&mut line, 0, spline);
                for v in &line {
                    assert!((v - 5.0).abs() < 1e-6, "{spline:?} n={n}: {v}");
                }
            }
        }
    }

    #[test]
    fn test_interpolation_property() {
        for (scheme, tol) in [
            (Scheme::BSpline3, 1e-9),
            (Scheme::OMoms3, 1e-9),
            (Scheme::BSpline5, 1e-9),
        ] {
            let spline = scheme.spline().unwrap();
            for n in [3, 8, 30] {
                let samples = signal(n);
                let mut coeffs = samples.clone();
                prefilter_line(&mut coeffs, 0, spline);
                let tol = if n >= HORIZON { 1e-6 } else { tol };
                for (s, r) in samples.iter().zip(reconstruct(&coeffs, scheme)) {
                    assert!((s - r).abs() < tol, "{scheme:?} n={n}: {s} vs {r}");
                }
            }
        }
    }

    #[test]
    fn test_borders_untouched_and_short_lines_skipped() {
        let mut line = vec![-1.0, 3.0, -1.0];
        prefilter_line(&mut line, 1, Spline::BSpline3);
        assert_eq!(line, vec![-1.0, 3.0, -1.0]);

        let mut line = vec![9.0, 1.0, 2.0, 9.0];
        prefilter_line(&mut line, 1, Spline::BSpline3);
        assert_eq!(line[0], 9.0);
        assert_eq!(line[3], 9.0);
        assert_ne!(line[1], 1.0);
    }

    #[test]
    fn test_prefilter_image_matches_line_filter() {
        let dims = Dimensions::plane(6, 5);
        let image = Image::from_fn(dims, |c| ((c.x * 3 + c.y * 5) % 7) as f64).unwrap();
        let mut work = FloatImage::bordered(&image, 0, Borders::spatial(2, 2, 0)).unwrap();
        prefilter_image(&mut work, Axes::XY, Spline::BSpline3);

        // Separable: filter x lines then y lines by hand
        let mut expected = FloatImage::from_component(&image, 0).unwrap();
        for axis in [Axis::X, Axis::Y] {
            let n = dims.get(axis);
            let mut line = vec![0.0; n];
            for start in line_starts(dims, axis) {
                expected.get_line(axis, &start, &mut line);
                prefilter_line(&mut line, 0, Spline::BSpline3);
                expected.set_line(axis, &start, &line);
            }
        }
        for y in 0..5 {
            for x in 0..6 {
                let a = work.at(x + 2, y + 2, 0, 0, 0);
                let e = expected.at(x, y, 0, 0, 0);
                assert!((a - e).abs() < 1e-12);
            }
        }
        assert_eq!(work.at(0, 0, 0, 0, 0), 0.0);
    }
}
