//! Border sizing and extension for working copies

use crate::kernel::Scheme;
use resample_core::{Borders, FloatImage};

/// How the border samples of a working copy are filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderPolicy {
    /// Fill borders with `background` instead of mirroring the interior
    pub antialias: bool,
    /// Value used for constant borders
    pub background: f64,
}

impl Default for BorderPolicy {
    fn default() -> Self {
        Self {
            antialias: false,
            background: 0.0,
        }
    }
}

impl BorderPolicy {
    /// Create a policy
    pub fn new(antialias: bool, background: f64) -> Self {
        Self {
            antialias,
            background,
        }
    }

    /// Border size on each side of an axis resampled with `scheme`
    pub fn support_width(scheme: Scheme) -> usize {
        scheme.support_width()
    }

    /// Borders for a working copy resampled with `scheme` along x and y,
    /// and along z too unless `planar` is set.
    pub fn borders(scheme: Scheme, planar: bool) -> Borders {
        let b = Self::support_width(scheme);
        Borders::spatial(b, b, if planar { 0 } else { b })
    }

    /// Fill the borders of `image`
    pub fn extend(&self, image: &mut FloatImage) {
        if self.antialias {
            image.fill_borders(self.background);
        } else {
            image.mirror_borders();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resample_core::{Dimensions, Image};

    #[test]
    fn test_borders() {
        assert_eq!(BorderPolicy::borders(Scheme::Nearest, false), Borders::default());
        assert_eq!(BorderPolicy::borders(Scheme::Cubic, true), Borders::spatial(2, 2, 0));
        assert_eq!(BorderPolicy::borders(Scheme::BSpline5, false), Borders::spatial(3, 3, 3));
    }

    #[test]
    fn test_extend() {
        let image = Image::from_vec(Dimensions::plane(3, 1), vec![1.0f64, 2.0, 3.0]).unwrap();
        let borders = Borders::spatial(1, 0, 0);

        let mut mirrored = FloatImage::bordered(&image, 0, borders).unwrap();
        BorderPolicy::new(false, 9.0).extend(&mut mirrored);
        assert_eq!(mirrored.data(), &[2.0, 1.0, 2.0, 3.0, 2.0]);

        let mut constant = FloatImage::bordered(&image, 0, borders).unwrap();
        BorderPolicy::new(true, 9.0).extend(&mut constant);
        assert_eq!(constant.data(), &[9.0, 1.0, 2.0, 3.0, 9.0]);
    }
}
