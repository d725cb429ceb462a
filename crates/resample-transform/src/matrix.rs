//! Three-dimensional affine transformation matrix
//!
//! The matrix has three explicit rows and an implicit identity fourth row:
//!
//! ```text
//! | axx axy axz axt |
//! | ayx ayy ayz ayt |
//! | azx azy azz azt |
//! |  0   0   0   1  |
//! ```
//!
//! A point `p` maps to
//!
//! ```text
//! x' = axx*x + axy*y + axz*z + axt
//! y' = ayx*x + ayy*y + ayz*z + ayt
//! z' = azx*x + azy*y + azz*z + azt
//! ```
//!
//! The modifiers [`AffineMatrix::rotate`], [`AffineMatrix::scale`],
//! [`AffineMatrix::shear`] and [`AffineMatrix::translate`] work in place and
//! apply *after* the transform already held, so a sequence of calls reads
//! in the order the operations happen.

use crate::{TransformError, TransformResult};
use std::fmt;

/// One of the three spatial axes a matrix acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceAxis {
    X,
    Y,
    Z,
}

impl SpaceAxis {
    /// Row of the matrix that produces this axis
    #[inline]
    pub fn row(self) -> usize {
        match self {
            SpaceAxis::X => 0,
            SpaceAxis::Y => 1,
            SpaceAxis::Z => 2,
        }
    }
}

/// A 3D point with floating-point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// 3×4 affine transformation matrix with implicit last row `0 0 0 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    /// Rows `[a*x, a*y, a*z, a*t]` for * in x, y, z
    rows: [[f64; 4]; 3],
}

const IDENTITY: [[f64; 4]; 3] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
];

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// Create the identity transformation
    pub const fn identity() -> Self {
        Self { rows: IDENTITY }
    }

    /// Create from the three explicit rows
    pub const fn from_rows(rows: [[f64; 4]; 3]) -> Self {
        Self { rows }
    }

    /// The three explicit rows
    pub fn rows(&self) -> &[[f64; 4]; 3] {
        &self.rows
    }

    /// Element at `row` (0..3) and `column` (0..4)
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameters` for indices outside the
    /// explicit 3×4 part.
    pub fn get(&self, row: usize, column: usize) -> TransformResult<f64> {
        check_index(row, column)?;
        Ok(self.rows[row][column])
    }

    /// Replace the element at `row` (0..3) and `column` (0..4)
    ///
    /// # Errors
    ///
    /// Same as [`AffineMatrix::get`].
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> TransformResult<()> {
        check_index(row, column)?;
        self.rows[row][column] = value;
        Ok(())
    }

    /// Reset to the identity
    pub fn reset(&mut self) {
        self.rows = IDENTITY;
    }

    /// Whether the matrix equals the identity exactly
    pub fn is_identity(&self) -> bool {
        self.rows == IDENTITY
    }

    /// Whether the third row equals that of the identity, i.e. the
    /// transform leaves z untouched and acts only in the x-y plane
    pub fn is_planar(&self) -> bool {
        self.rows[2] == IDENTITY[2]
    }

    /// Copy with the translation column set to zero
    pub fn without_translation(&self) -> Self {
        let mut m = *self;
        for row in &mut m.rows {
            row[3] = 0.0;
        }
        m
    }

    /// Determinant of the linear 3×3 part
    pub fn determinant(&self) -> f64 {
        let [[axx, axy, axz, _], [ayx, ayy, ayz, _], [azx, azy, azz, _]] = self.rows;
        axx * (ayy * azz - ayz * azy) + axy * (ayz * azx - ayx * azz) + axz * (ayx * azy - ayy * azx)
    }

    /// Compute the inverse transformation
    ///
    /// # Errors
    ///
    /// Returns `TransformError::SingularMatrix` if the determinant is
    /// exactly zero.
    pub fn invert(&self) -> TransformResult<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(TransformError::SingularMatrix);
        }
        let [
            [axx, axy, axz, axt],
            [ayx, ayy, ayz, ayt],
            [azx, azy, azz, azt],
        ] = self.rows;

        let ixx = (ayy * azz - ayz * azy) / det;
        let ixy = (axz * azy - axy * azz) / det;
        let ixz = (axy * ayz - axz * ayy) / det;
        let iyx = (ayz * azx - ayx * azz) / det;
        let iyy = (axx * azz - axz * azx) / det;
        let iyz = (axz * ayx - axx * ayz) / det;
        let izx = (ayx * azy - ayy * azx) / det;
        let izy = (axy * azx - axx * azy) / det;
        let izz = (axx * ayy - axy * ayx) / det;

        Ok(Self::from_rows([
            [ixx, ixy, ixz, -(ixx * axt + ixy * ayt + ixz * azt)],
            [iyx, iyy, iyz, -(iyx * axt + iyy * ayt + iyz * azt)],
            [izx, izy, izz, -(izx * axt + izy * ayt + izz * azt)],
        ]))
    }

    /// Compose two transformations.
    ///
    /// The result applies `self` first and `other` second, i.e. it is the
    /// matrix product `other * self` with the implicit fourth rows.
    pub fn compose(&self, other: &Self) -> Self {
        let a = &other.rows;
        let b = &self.rows;
        let mut rows = [[0.0; 4]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut v = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
                if j == 3 {
                    v += a[i][3];
                }
                *cell = v;
            }
        }
        Self { rows }
    }

    /// Transform a point through this matrix
    pub fn transform_point(&self, p: Point3) -> Point3 {
        let [rx, ry, rz] = &self.rows;
        Point3::new(
            rx[0] * p.x + rx[1] * p.y + rx[2] * p.z + rx[3],
            ry[0] * p.x + ry[1] * p.y + ry[2] * p.z + ry[3],
            rz[0] * p.x + rz[1] * p.y + rz[2] * p.z + rz[3],
        )
    }

    /// Rotate by `angle` degrees about `axis` (right-handed), after the
    /// current transform
    pub fn rotate(&mut self, angle: f64, axis: SpaceAxis) -> &mut Self {
        let a = angle.to_radians();
        let (sa, ca) = a.sin_cos();
        // (u, v) is the rotated plane; the result is u' = u*ca - v*sa,
        // v' = v*ca + u*sa
        let (u, v) = match axis {
            SpaceAxis::X => (1, 2),
            SpaceAxis::Y => (2, 0),
            SpaceAxis::Z => (0, 1),
        };
        for j in 0..4 {
            let ru = self.rows[u][j];
            let rv = self.rows[v][j];
            self.rows[u][j] = ru * ca - rv * sa;
            self.rows[v][j] = rv * ca + ru * sa;
        }
        self
    }

    /// Scale `axis` by `factor`, after the current transform
    pub fn scale(&mut self, factor: f64, axis: SpaceAxis) -> &mut Self {
        for v in &mut self.rows[axis.row()] {
            *v *= factor;
        }
        self
    }

    /// Shear `axis` by `factor` times the driving axis `drive`, after the
    /// current transform. Shearing an axis by itself is a scaling.
    pub fn shear(&mut self, factor: f64, axis: SpaceAxis, drive: SpaceAxis) -> &mut Self {
        if axis == drive {
            return self.scale(factor, axis);
        }
        let src = self.rows[drive.row()];
        for (v, s) in self.rows[axis.row()].iter_mut().zip(src) {
            *v += s * factor;
        }
        self
    }

    /// Translate along `axis` by `distance`, after the current transform
    pub fn translate(&mut self, distance: f64, axis: SpaceAxis) -> &mut Self {
        self.rows[axis.row()][3] += distance;
        self
    }
}

fn check_index(row: usize, column: usize) -> TransformResult<()> {
    if row > 2 || column > 3 {
        return Err(TransformError::InvalidParameters(format!(
            "matrix element ({row},{column}) outside the 3x4 part"
        )));
    }
    Ok(())
}

impl fmt::Display for AffineMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "[  {}   {}   {}   {}  ]", row[0], row[1], row[2], row[3])?;
        }
        write!(f, "[  0   0   0   1  ]")
    }
}
