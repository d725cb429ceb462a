//! Index mapping for samples outside an axis
//!
//! Border extension and embedding both need to decide which interior
//! sample stands in for a position beyond the ends of an axis. The rules
//! here work on one axis at a time; multi-axis extension applies them
//! axis by axis.

/// How an out-of-range index maps back into `[0, len)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderRule {
    /// Whole-sample reflection about the first and last sample
    /// (`-k` maps to `k`); an axis of length 1 replicates
    Reflect,
    /// Periodic continuation with period `len`
    Repeat,
    /// Replicate the nearest edge sample
    Clamp,
}

impl BorderRule {
    /// Map `index` (relative to the first interior sample) into `[0, len)`.
    ///
    /// Returns `None` only when `len` is 0.
    pub fn map(self, index: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as isize;
        let mapped = match self {
            BorderRule::Reflect => {
                if len == 1 {
                    0
                } else {
                    let period = 2 * (n - 1);
                    let r = index.rem_euclid(period);
                    if r < n { r } else { period - r }
                }
            }
            BorderRule::Repeat => index.rem_euclid(n),
            BorderRule::Clamp => index.clamp(0, n - 1),
        };
        Some(mapped as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_len1_len2_len4() {
        for i in -6..=6 {
            assert_eq!(BorderRule::Reflect.map(i, 1), Some(0));
        }

        let expected_len2 = [0, 1, 0, 1, 0, 1, 0, 1, 0];
        for (offset, expected) in (-4..=4).zip(expected_len2) {
            assert_eq!(BorderRule::Reflect.map(offset, 2), Some(expected));
        }

        let cases_len4 = [
            (-6, 0),
            (-5, 1),
            (-4, 2),
            (-3, 3),
            (-2, 2),
            (-1, 1),
            (0, 0),
            (3, 3),
            (4, 2),
            (5, 1),
            (6, 0),
            (7, 1),
        ];
        for (i, expected) in cases_len4 {
            assert_eq!(BorderRule::Reflect.map(i, 4), Some(expected), "index {i}");
        }
    }

    #[test]
    fn test_repeat() {
        assert_eq!(BorderRule::Repeat.map(-1, 3), Some(2));
        assert_eq!(BorderRule::Repeat.map(-4, 3), Some(2));
        assert_eq!(BorderRule::Repeat.map(5, 3), Some(2));
        assert_eq!(BorderRule::Repeat.map(7, 1), Some(0));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(BorderRule::Clamp.map(-9, 5), Some(0));
        assert_eq!(BorderRule::Clamp.map(2, 5), Some(2));
        assert_eq!(BorderRule::Clamp.map(99, 5), Some(4));
    }

    #[test]
    fn test_empty_axis() {
        assert_eq!(BorderRule::Clamp.map(0, 0), None);
    }
}
