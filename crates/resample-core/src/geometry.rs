//! Five-dimensional geometry vocabulary
//!
//! Every image in the engine has the same five axes:
//!
//! | Axis | Meaning |
//! |---|---|
//! | `X`, `Y` | in-plane spatial axes |
//! | `Z` | additional spatial axis |
//! | `T` | time |
//! | `C` | channel |
//!
//! [`Dimensions`] holds the extent of each axis, [`Aspects`] the physical
//! sample spacing, [`Coordinates`] a single element position, [`Borders`]
//! the padding around a working copy and [`Axes`] a selection of axes.

use std::fmt;

/// One of the five image axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    T,
    C,
}

impl Axis {
    /// All axes in memory order (x varies fastest)
    pub const ALL: [Axis; 5] = [Axis::X, Axis::Y, Axis::Z, Axis::T, Axis::C];

    /// Position of this axis in memory order
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::T => 3,
            Axis::C => 4,
        }
    }

    /// Lowercase axis letter, as used in log messages
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
            Axis::T => 't',
            Axis::C => 'c',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

macro_rules! five_tuple {
    ($(#[$meta:meta])* $name:ident, $t:ty) => {
        $(#[$meta])*
        pub struct $name {
            pub x: $t,
            pub y: $t,
            pub z: $t,
            pub t: $t,
            pub c: $t,
        }

        impl $name {
            /// Create from the five per-axis values
            pub const fn new(x: $t, y: $t, z: $t, t: $t, c: $t) -> Self {
                Self { x, y, z, t, c }
            }

            /// Value along `axis`
            #[inline]
            pub fn get(&self, axis: Axis) -> $t {
                match axis {
                    Axis::X => self.x,
                    Axis::Y => self.y,
                    Axis::Z => self.z,
                    Axis::T => self.t,
                    Axis::C => self.c,
                }
            }

            /// Replace the value along `axis`
            #[inline]
            pub fn set(&mut self, axis: Axis, value: $t) {
                match axis {
                    Axis::X => self.x = value,
                    Axis::Y => self.y = value,
                    Axis::Z => self.z = value,
                    Axis::T => self.t = value,
                    Axis::C => self.c = value,
                }
            }

            /// Copy with the value along `axis` replaced
            #[inline]
            pub fn with(mut self, axis: Axis, value: $t) -> Self {
                self.set(axis, value);
                self
            }

            /// Values in memory order
            pub fn to_array(&self) -> [$t; 5] {
                [self.x, self.y, self.z, self.t, self.c]
            }

            /// Build from values in memory order
            pub fn from_array(values: [$t; 5]) -> Self {
                let [x, y, z, t, c] = values;
                Self { x, y, z, t, c }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "(x,y,z,t,c) = ({},{},{},{},{})",
                    self.x, self.y, self.z, self.t, self.c
                )
            }
        }
    };
}

five_tuple!(
    /// Extent of each axis
    ///
    /// A valid image has every extent at least 1; [`Dimensions::validate`]
    /// checks this and image constructors call it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    Dimensions,
    usize
);

five_tuple!(
    /// Physical sample spacing per axis
    ///
    /// Not used by the resampling math; scaling divides each spacing by
    /// the factor applied to its axis.
    #[derive(Debug, Clone, Copy, PartialEq)]
    Aspects,
    f64
);

five_tuple!(
    /// Position of a single element
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    Coordinates,
    usize
);

five_tuple!(
    /// Number of extra samples on each side of each axis
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    Borders,
    usize
);

five_tuple!(
    /// Selection of axes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    Axes,
    bool
);

impl Dimensions {
    /// Two-dimensional extents (z, t and c equal 1)
    pub const fn plane(x: usize, y: usize) -> Self {
        Self::new(x, y, 1, 1, 1)
    }

    /// Three-dimensional extents (t and c equal 1)
    pub const fn volume(x: usize, y: usize, z: usize) -> Self {
        Self::new(x, y, z, 1, 1)
    }

    /// Total number of elements, `None` on overflow
    pub fn count(&self) -> Option<usize> {
        self.to_array()
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
    }

    /// Check that every extent is at least 1
    pub fn validate(&self) -> crate::Result<()> {
        if self.to_array().contains(&0) {
            return Err(crate::Error::InvalidDimensions(*self));
        }
        Ok(())
    }

    /// Whether `coords` addresses an element inside these extents
    pub fn contains(&self, coords: &Coordinates) -> bool {
        coords.x < self.x
            && coords.y < self.y
            && coords.z < self.z
            && coords.t < self.t
            && coords.c < self.c
    }

    /// Extents enlarged by `borders` on both sides of every axis
    pub fn bordered(&self, borders: &Borders) -> Self {
        Self::new(
            self.x + 2 * borders.x,
            self.y + 2 * borders.y,
            self.z + 2 * borders.z,
            self.t + 2 * borders.t,
            self.c + 2 * borders.c,
        )
    }

    /// Memory stride of `axis`
    pub fn stride(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => 1,
            Axis::Y => self.x,
            Axis::Z => self.x * self.y,
            Axis::T => self.x * self.y * self.z,
            Axis::C => self.x * self.y * self.z * self.t,
        }
    }

    /// Linear offset of `coords` (no bounds check)
    #[inline]
    pub fn offset(&self, coords: &Coordinates) -> usize {
        coords.x + self.x * (coords.y + self.y * (coords.z + self.z * (coords.t + self.t * coords.c)))
    }
}

impl Default for Aspects {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0, 1.0)
    }
}

impl Borders {
    /// The same border size on x, y and z; none on t and c
    pub const fn spatial(x: usize, y: usize, z: usize) -> Self {
        Self::new(x, y, z, 0, 0)
    }
}

impl Axes {
    /// No axis selected
    pub const NONE: Axes = Axes::new(false, false, false, false, false);
    /// Only x
    pub const X: Axes = Axes::new(true, false, false, false, false);
    /// Only y
    pub const Y: Axes = Axes::new(false, true, false, false, false);
    /// Only z
    pub const Z: Axes = Axes::new(false, false, true, false, false);
    /// Only t
    pub const T: Axes = Axes::new(false, false, false, true, false);
    /// Only c
    pub const C: Axes = Axes::new(false, false, false, false, true);
    /// x and y
    pub const XY: Axes = Axes::new(true, true, false, false, false);
    /// x, y and z
    pub const XYZ: Axes = Axes::new(true, true, true, false, false);
    /// Every axis
    pub const ALL: Axes = Axes::new(true, true, true, true, true);

    /// Axes selected in this mask, in memory order
    pub fn iter(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(|&a| self.get(a))
    }
}

/// Iterate over every position of `dims` with `axis` pinned to 0, in
/// memory order. Used to visit the start of every line along `axis`.
pub fn line_starts(dims: Dimensions, axis: Axis) -> impl Iterator<Item = Coordinates> {
    positions(dims.with(axis, 1))
}

impl Dimensions {
    /// Every position inside these extents, in memory order
    pub fn coordinates(self) -> impl Iterator<Item = Coordinates> {
        positions(self)
    }
}

fn positions(span: Dimensions) -> impl Iterator<Item = Coordinates> {
    let total = span.count().unwrap_or(0);
    (0..total).map(move |mut i| {
        let mut coords = Coordinates::default();
        for a in Axis::ALL {
            let n = span.get(a);
            coords.set(a, i % n);
            i /= n;
        }
        coords
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validate() {
        assert!(Dimensions::plane(4, 3).validate().is_ok());
        assert!(Dimensions::new(4, 3, 0, 1, 1).validate().is_err());
    }

    #[test]
    fn test_dimensions_count_and_offset() {
        let dims = Dimensions::new(2, 3, 4, 5, 6);
        assert_eq!(dims.count(), Some(720));
        assert_eq!(dims.offset(&Coordinates::new(1, 0, 0, 0, 0)), 1);
        assert_eq!(dims.offset(&Coordinates::new(0, 1, 0, 0, 0)), 2);
        assert_eq!(dims.offset(&Coordinates::new(0, 0, 1, 0, 0)), 6);
        assert_eq!(dims.offset(&Coordinates::new(0, 0, 0, 1, 0)), 24);
        assert_eq!(dims.offset(&Coordinates::new(0, 0, 0, 0, 1)), 120);
        assert_eq!(dims.stride(Axis::T), 24);
        assert_eq!(dims.count(), Some(dims.offset(&Coordinates::new(1, 2, 3, 4, 5)) + 1));
    }

    #[test]
    fn test_count_overflow() {
        let dims = Dimensions::new(usize::MAX, 2, 1, 1, 1);
        assert_eq!(dims.count(), None);
    }

    #[test]
    fn test_with_and_get() {
        let dims = Dimensions::plane(4, 3).with(Axis::Z, 7);
        assert_eq!(dims.get(Axis::Z), 7);
        assert_eq!(dims.to_array(), [4, 3, 7, 1, 1]);
    }

    #[test]
    fn test_axes_iter() {
        let axes: Vec<Axis> = Axes::XYZ.iter().collect();
        assert_eq!(axes, vec![Axis::X, Axis::Y, Axis::Z]);
        assert_eq!(Axes::NONE.iter().count(), 0);
    }

    #[test]
    fn test_line_starts() {
        let dims = Dimensions::plane(3, 2).with(Axis::Z, 2);
        let starts: Vec<Coordinates> = line_starts(dims, Axis::Y).collect();
        assert_eq!(starts.len(), 6);
        assert!(starts.iter().all(|c| c.y == 0));
        assert_eq!(starts[1], Coordinates::new(1, 0, 0, 0, 0));
        assert_eq!(starts[3], Coordinates::new(0, 0, 1, 0, 0));
    }

    #[test]
    fn test_display() {
        let dims = Dimensions::new(1, 2, 3, 4, 5);
        assert_eq!(dims.to_string(), "(x,y,z,t,c) = (1,2,3,4,5)");
    }
}
