//! Interpolation kernel catalog
//!
//! Six interpolation schemes are supported. Each is described by the
//! number of taps it reads, the border a working copy needs for those
//! taps, the polynomial weights as a function of the fractional offset
//! and, for the spline-type schemes, the recursive prefilter that turns
//! samples into spline coefficients.
//!
//! | Scheme | Taps | Border | Prefilter |
//! |---|---|---|---|
//! | `Nearest` | 1 | 0 | - |
//! | `Linear` | 2 | 1 | - |
//! | `Cubic` | 4 | 2 | - |
//! | `BSpline3` | 4 | 2 | cubic B-spline |
//! | `OMoms3` | 4 | 2 | cubic O-MOMS |
//! | `BSpline5` | 6 | 3 | quintic B-spline |
//!
//! The taps for a source coordinate `t` with `i = floor(t)` and
//! `d = t - i` cover the samples `i - (taps/2 - 1) ..= i + taps/2`; the
//! weights are listed in that order.

use crate::{TransformError, TransformResult};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Spline prefilter constants
// ============================================================================

/// Pole of the cubic B-spline prefilter (`sqrt(3) - 2`)
const BSPLINE3_POLE: f64 = -0.267_949_192_431_122_7;
/// Pole of the cubic O-MOMS prefilter (`(sqrt(105) - 13) / 8`)
const OMOMS3_POLE: f64 = -0.344_131_154_255_459_2;
/// First pole of the quintic B-spline prefilter
const BSPLINE5_POLE1: f64 = -0.430_575_347_099_973_8;
/// Second pole of the quintic B-spline prefilter
const BSPLINE5_POLE2: f64 = -0.043_096_288_203_264_65;

// ============================================================================
// Schemes
// ============================================================================

/// Interpolation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// Nearest-neighbor sampling
    Nearest,
    /// Linear interpolation
    #[default]
    Linear,
    /// Cubic convolution (Keys kernel, a = -1/2)
    Cubic,
    /// Cubic B-spline interpolation
    BSpline3,
    /// Cubic O-MOMS interpolation
    OMoms3,
    /// Quintic B-spline interpolation
    BSpline5,
}

impl Scheme {
    /// All schemes in increasing order of support
    pub const ALL: [Scheme; 6] = [
        Scheme::Nearest,
        Scheme::Linear,
        Scheme::Cubic,
        Scheme::BSpline3,
        Scheme::OMoms3,
        Scheme::BSpline5,
    ];

    /// Numeric index (0 for nearest up to 5 for quintic B-spline)
    pub fn index(self) -> i64 {
        match self {
            Scheme::Nearest => 0,
            Scheme::Linear => 1,
            Scheme::Cubic => 2,
            Scheme::BSpline3 => 3,
            Scheme::OMoms3 => 4,
            Scheme::BSpline5 => 5,
        }
    }

    /// Number of samples combined along one axis
    pub fn taps(self) -> usize {
        match self {
            Scheme::Nearest => 1,
            Scheme::Linear => 2,
            Scheme::Cubic | Scheme::BSpline3 | Scheme::OMoms3 => 4,
            Scheme::BSpline5 => 6,
        }
    }

    /// Border width a working copy needs on each side of a resampled axis
    pub fn support_width(self) -> usize {
        match self {
            Scheme::Nearest => 0,
            Scheme::Linear => 1,
            Scheme::Cubic | Scheme::BSpline3 | Scheme::OMoms3 => 2,
            Scheme::BSpline5 => 3,
        }
    }

    /// Offset of the first tap relative to `floor(t)`
    #[inline]
    pub fn first_tap(self) -> isize {
        match self {
            Scheme::Nearest => 0,
            _ => 1 - (self.taps() / 2) as isize,
        }
    }

    /// Prefilter required before sampling, if any
    pub fn spline(self) -> Option<Spline> {
        match self {
            Scheme::BSpline3 => Some(Spline::BSpline3),
            Scheme::OMoms3 => Some(Spline::OMoms3),
            Scheme::BSpline5 => Some(Spline::BSpline5),
            _ => None,
        }
    }

    /// Whether samples must be prefiltered before this kernel is applied
    pub fn requires_prefilter(self) -> bool {
        self.spline().is_some()
    }

    /// Descriptive name used in log messages
    pub fn description(self) -> &'static str {
        match self {
            Scheme::Nearest => "nearest-neighbor interpolation",
            Scheme::Linear => "linear interpolation",
            Scheme::Cubic => "cubic convolution interpolation",
            Scheme::BSpline3 => "cubic B-spline interpolation",
            Scheme::OMoms3 => "cubic O-MOMS interpolation",
            Scheme::BSpline5 => "quintic B-spline interpolation",
        }
    }

    /// Kernel weights for the fractional offset `d` in `[0, 1)`.
    ///
    /// For `Nearest` a single weight of 1 is returned.
    pub fn weights(self, d: f64) -> KernelWeights {
        let m = 1.0 - d;
        match self {
            Scheme::Nearest => KernelWeights::unit(),
            Scheme::Linear => KernelWeights::new(&[m, d]),
            Scheme::Cubic => KernelWeights::new(&[
                -0.5 * d * m * m,
                1.0 + (1.5 * d - 2.5) * d * d,
                1.0 + (1.5 * m - 2.5) * m * m,
                -0.5 * m * d * d,
            ]),
            Scheme::BSpline3 => KernelWeights::new(&[
                m * m * m / 6.0,
                2.0 / 3.0 + (0.5 * d - 1.0) * d * d,
                2.0 / 3.0 + (0.5 * m - 1.0) * m * m,
                d * d * d / 6.0,
            ]),
            Scheme::OMoms3 => KernelWeights::new(&[
                m * (1.0 / 42.0 + m * m / 6.0),
                13.0 / 21.0 + d * (1.0 / 14.0 + d * (0.5 * d - 1.0)),
                13.0 / 21.0 + m * (1.0 / 14.0 + m * (0.5 * m - 1.0)),
                d * (1.0 / 42.0 + d * d / 6.0),
            ]),
            Scheme::BSpline5 => {
                let d2 = d * d;
                let m2 = m * m;
                KernelWeights::new(&[
                    m2 * m2 * m / 120.0,
                    1.0 / 120.0 + m / 24.0 * (1.0 + m * (2.0 + m * (2.0 + m - m2))),
                    11.0 / 20.0 + d2 * ((0.25 - d / 12.0) * d2 - 0.5),
                    11.0 / 20.0 + m2 * ((0.25 - m / 12.0) * m2 - 0.5),
                    1.0 / 120.0 + d / 24.0 * (1.0 + d * (2.0 + d * (2.0 + d - d2))),
                    d2 * d2 * d / 120.0,
                ])
            }
        }
    }

    /// The simplest scheme usable on an axis of `extent` samples.
    ///
    /// An axis of one sample only supports nearest-neighbor sampling and
    /// an axis shorter than four samples at most linear interpolation.
    pub fn fit_extent(self, extent: usize) -> Scheme {
        if extent == 1 && self != Scheme::Nearest {
            Scheme::Nearest
        } else if extent < 4 && self.taps() >= 4 {
            Scheme::Linear
        } else {
            self
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl TryFrom<i64> for Scheme {
    type Error = TransformError;

    fn try_from(value: i64) -> TransformResult<Self> {
        Scheme::ALL
            .into_iter()
            .find(|s| s.index() == value)
            .ok_or_else(|| TransformError::UnsupportedScheme(value.to_string()))
    }
}

impl FromStr for Scheme {
    type Err = TransformError;

    fn from_str(s: &str) -> TransformResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Scheme::Nearest),
            "linear" => Ok(Scheme::Linear),
            "cubic" => Ok(Scheme::Cubic),
            "bspline3" => Ok(Scheme::BSpline3),
            "omoms3" => Ok(Scheme::OMoms3),
            "bspline5" => Ok(Scheme::BSpline5),
            _ => Err(TransformError::UnsupportedScheme(s.to_string())),
        }
    }
}

// ============================================================================
// Weights
// ============================================================================

/// Up to six kernel weights for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelWeights {
    len: usize,
    w: [f64; 6],
}

impl KernelWeights {
    fn new(values: &[f64]) -> Self {
        let mut w = [0.0; 6];
        w[..values.len()].copy_from_slice(values);
        Self {
            len: values.len(),
            w,
        }
    }

    /// A single tap of weight 1
    pub fn unit() -> Self {
        Self::new(&[1.0])
    }

    /// The weights in tap order
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.w[..self.len]
    }

    /// Sum of the weights (1 up to rounding for every scheme)
    pub fn sum(&self) -> f64 {
        self.as_slice().iter().sum()
    }
}

// ============================================================================
// Splines
// ============================================================================

/// Spline family requiring a recursive prefilter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spline {
    /// Cubic B-spline
    BSpline3,
    /// Cubic O-MOMS
    OMoms3,
    /// Quintic B-spline
    BSpline5,
}

impl Spline {
    /// Poles of the recursive filter, applied in order
    pub fn poles(self) -> &'static [f64] {
        match self {
            Spline::BSpline3 => &[BSPLINE3_POLE],
            Spline::OMoms3 => &[OMOMS3_POLE],
            Spline::BSpline5 => &[BSPLINE5_POLE1, BSPLINE5_POLE2],
        }
    }

    /// Overall gain restoring unit DC response
    pub fn gain(self) -> f64 {
        match self {
            Spline::BSpline3 => 6.0,
            Spline::OMoms3 => 21.0 / 4.0,
            Spline::BSpline5 => 120.0,
        }
    }

    /// Center weight of the kernel at offset 0.
    ///
    /// Along an axis of one sample the prefilter is skipped, so sampling
    /// against a constant background scales values by this factor.
    pub fn center_weight(self) -> f64 {
        match self {
            Spline::BSpline3 => 2.0 / 3.0,
            Spline::OMoms3 => 13.0 / 21.0,
            Spline::BSpline5 => 11.0 / 20.0,
        }
    }

    /// Prefilter name used in log messages
    pub fn description(self) -> &'static str {
        match self {
            Spline::BSpline3 => "cubic B-spline",
            Spline::OMoms3 => "cubic O-MOMS",
            Spline::BSpline5 => "quintic B-spline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        for scheme in Scheme::ALL {
            for i in 0..=20 {
                let d = i as f64 / 20.0 * 0.999;
                let w = scheme.weights(d);
                assert_eq!(w.as_slice().len(), scheme.taps());
                assert!((w.sum() - 1.0).abs() < 1e-12, "{scheme:?} at {d}: {}", w.sum());
            }
        }
    }

    #[test]
    fn test_interpolating_kernels_at_zero() {
        assert_eq!(Scheme::Linear.weights(0.0).as_slice(), &[1.0, 0.0]);
        let cubic = Scheme::Cubic.weights(0.0);
        assert_eq!(cubic.as_slice(), &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_spline_center_weights() {
        for (scheme, spline) in [
            (Scheme::BSpline3, Spline::BSpline3),
            (Scheme::OMoms3, Spline::OMoms3),
            (Scheme::BSpline5, Spline::BSpline5),
        ] {
            let w = scheme.weights(0.0);
            let center = w.as_slice()[(-scheme.first_tap()) as usize];
            assert!((center - spline.center_weight()).abs() < 1e-12);
            assert_eq!(scheme.spline(), Some(spline));
        }
    }

    #[test]
    fn test_weights_symmetry() {
        // w_k(d) == w_{taps-1-k}(1-d)
        for scheme in [Scheme::Cubic, Scheme::BSpline3, Scheme::OMoms3, Scheme::BSpline5] {
            let a = scheme.weights(0.3);
            let b = scheme.weights(0.7);
            let n = scheme.taps();
            for k in 0..n {
                assert!((a.as_slice()[k] - b.as_slice()[n - 1 - k]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_support_and_first_tap() {
        let widths: Vec<usize> = Scheme::ALL.iter().map(|s| s.support_width()).collect();
        assert_eq!(widths, vec![0, 1, 2, 2, 2, 3]);
        assert_eq!(Scheme::Linear.first_tap(), 0);
        assert_eq!(Scheme::Cubic.first_tap(), -1);
        assert_eq!(Scheme::BSpline5.first_tap(), -2);
    }

    #[test]
    fn test_scheme_conversions() {
        assert_eq!(Scheme::try_from(4).unwrap(), Scheme::OMoms3);
        assert!(matches!(Scheme::try_from(6), Err(TransformError::UnsupportedScheme(_))));
        assert!(Scheme::try_from(-1).is_err());
        assert_eq!("BSpline5".parse::<Scheme>().unwrap(), Scheme::BSpline5);
        assert!("lanczos".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_fit_extent() {
        assert_eq!(Scheme::BSpline5.fit_extent(1), Scheme::Nearest);
        assert_eq!(Scheme::Linear.fit_extent(1), Scheme::Nearest);
        assert_eq!(Scheme::Cubic.fit_extent(3), Scheme::Linear);
        assert_eq!(Scheme::Linear.fit_extent(2), Scheme::Linear);
        assert_eq!(Scheme::OMoms3.fit_extent(4), Scheme::OMoms3);
    }

    #[test]
    fn test_poles() {
        assert!((Spline::BSpline3.poles()[0] - (3f64.sqrt() - 2.0)).abs() < 1e-15);
        assert!((Spline::OMoms3.poles()[0] - (105f64.sqrt() - 13.0) / 8.0).abs() < 1e-15);
        assert_eq!(Spline::BSpline5.poles().len(), 2);
    }
}
