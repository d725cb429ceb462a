//! Element types
//!
//! The engine reads and writes every element type through the single
//! real-valued [`Sample`] interface. Scalar types have one component;
//! [`Color`] has three (red, green, blue) that are always processed
//! independently of one another.

use num_traits::{Bounded, NumCast, ToPrimitive};
use std::fmt::Debug;

/// A real-valued image element with one or more components
pub trait Sample: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    /// Number of independent components
    const COMPONENTS: usize;
    /// Short description used in log messages
    const TYPE_NAME: &'static str;

    /// Component `index` as a real value
    fn component(self, index: usize) -> f64;

    /// Replace component `index`, rounding and clamping as the type needs
    fn set_component(&mut self, index: usize, value: f64);
}

/// Convert a real value to a scalar type.
///
/// Integer targets round half up and saturate at the type's range; NaN
/// converts to zero.
#[inline]
pub fn from_real<S>(value: f64, integral: bool) -> S
where
    S: NumCast + Bounded + ToPrimitive + Default,
{
    let lo = S::min_value().to_f64().unwrap_or(f64::MIN);
    let hi = S::max_value().to_f64().unwrap_or(f64::MAX);
    let v = if integral { (value + 0.5).floor() } else { value };
    if v.is_nan() {
        return <S as NumCast>::from(v).unwrap_or_default();
    }
    <S as NumCast>::from(v.clamp(lo, hi)).unwrap_or_default()
}

macro_rules! impl_scalar_sample {
    ($t:ty, $name:literal, $integral:literal) => {
        impl Sample for $t {
            const COMPONENTS: usize = 1;
            const TYPE_NAME: &'static str = $name;

            #[inline]
            fn component(self, _index: usize) -> f64 {
                self.to_f64().unwrap_or(0.0)
            }

            #[inline]
            fn set_component(&mut self, _index: usize, value: f64) {
                *self = from_real::<$t>(value, $integral);
            }
        }
    };
}

impl_scalar_sample!(u8, "8-bit image", true);
impl_scalar_sample!(u16, "16-bit image", true);
impl_scalar_sample!(i32, "32-bit integer image", true);
impl_scalar_sample!(f32, "32-bit float image", false);
impl_scalar_sample!(f64, "64-bit float image", false);

/// 24-bit RGB color element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Red component index
    pub const RED: usize = 0;
    /// Green component index
    pub const GREEN: usize = 1;
    /// Blue component index
    pub const BLUE: usize = 2;

    /// Create a color from its components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Name of component `index`, as used in log messages
    pub fn component_name(index: usize) -> &'static str {
        match index {
            Self::RED => "red",
            Self::GREEN => "green",
            _ => "blue",
        }
    }
}

impl Sample for Color {
    const COMPONENTS: usize = 3;
    const TYPE_NAME: &'static str = "RGB-color image";

    #[inline]
    fn component(self, index: usize) -> f64 {
        match index {
            Self::RED => self.r as f64,
            Self::GREEN => self.g as f64,
            _ => self.b as f64,
        }
    }

    #[inline]
    fn set_component(&mut self, index: usize, value: f64) {
        let v = from_real::<u8>(value, true);
        match index {
            Self::RED => self.r = v,
            Self::GREEN => self.g = v,
            _ => self.b = v,
        }
    }
}
