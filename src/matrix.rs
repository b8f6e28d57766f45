use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::consts::feq;
use crate::error::{ RayCasterError, Result };
use crate::tuple::Tuple;

// Determinants smaller than this are treated as singular. Kept far below
// `FEQ_EPSILON` so that legitimately tiny scalings stay invertible.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A matrix of any shape, stored row-major.
///
/// `Matrix` is the general-purpose, dimension-checked type: construction
/// verifies that `rows * columns` matches the data, and products verify that
/// the operands conform. Transforms use the fixed-size `Matrix4` instead,
/// which borrows the cofactor machinery here for its inverse.
///
/// # Examples
///
/// ```
/// # use ray_caster::matrix::Matrix;
/// let a = Matrix::new(2, 3, vec![1.0, 2.0, 3.0,
///                                4.0, 5.0, 6.0]).unwrap();
/// let b = Matrix::new(3, 1, vec![1.0, 0.0, 1.0]).unwrap();
///
/// assert_eq!(a.try_mul(&b).unwrap(), Matrix::new(2, 1, vec![4.0, 10.0]).unwrap());
/// assert!(b.try_mul(&a).is_err());
/// assert!(Matrix::new(2, 2, vec![1.0, 2.0, 3.0]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

/// Matrices are equal when their shapes match and every element is within
/// `FEQ_EPSILON`.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Matrix {
    /// Creates a `rows` by `columns` matrix from row-major `data`.
    pub fn new(rows: usize, columns: usize, data: Vec<f64>) -> Result<Matrix> {
        if rows.checked_mul(columns) != Some(data.len()) {
            return Err(RayCasterError::MatrixDimension {
                rows,
                columns,
                len: data.len(),
            });
        }

        Ok(Matrix { rows, columns, data })
    }

    /// Instantiates a `size` by `size` identity matrix.
    pub fn identity(size: usize) -> Matrix {
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            data[i * size + i] = 1.0;
        }

        Matrix { rows: size, columns: size, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The row-major coefficients.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The element at `row`, `col`, or `None` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.columns {
            return None;
        }

        Some(self[(row, col)])
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.columns..(row + 1) * self.columns]
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self[(r, col)]).collect()
    }

    fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    fn ensure_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(RayCasterError::NotSquare {
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// Multiplies two matrices, row by column.
    ///
    /// Fails with `NonConformable` unless the left operand has as many columns
    /// as the right operand has rows.
    pub fn try_mul(&self, other: &Matrix) -> Result<Matrix> {
        if self.columns != other.rows {
            return Err(RayCasterError::NonConformable {
                left_columns: self.columns,
                right_rows: other.rows,
            });
        }

        let mut data = Vec::with_capacity(self.rows * other.columns);
        for r in 0..self.rows {
            for c in 0..other.columns {
                data.push((0..self.columns)
                    .map(|k| self[(r, k)] * other[(k, c)])
                    .sum());
            }
        }

        Ok(Matrix { rows: self.rows, columns: other.columns, data })
    }

    /// Multiplies a 4x4 matrix by a tuple taken as a column vector.
    pub fn try_mul_tuple(&self, t: &Tuple) -> Result<Tuple> {
        if self.rows != 4 || self.columns != 4 {
            return Err(RayCasterError::NonConformable {
                left_columns: self.columns,
                right_rows: 4,
            });
        }

        let m4 = Matrix4::try_from(self)?;
        Ok(m4 * *t)
    }

    /// Produces the transpose, swapping rows for columns.
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.columns {
            for r in 0..self.rows {
                data.push(self[(r, c)]);
            }
        }

        Matrix { rows: self.columns, columns: self.rows, data }
    }

    /// Returns the matrix with row `row` and column `col` removed.
    ///
    /// For example, removing row 1 and column 2 from
    ///
    /// ```text
    /// 1 0 2
    /// 3 1 0
    /// 1 1 1
    /// ```
    ///
    /// leaves `[1 0; 1 1]`. Fails with `IndexOutOfRange` when `row` or `col`
    /// lies outside the matrix.
    pub fn submatrix(&self, row: usize, col: usize) -> Result<Matrix> {
        self.ensure_in_range(row, col)?;
        Ok(self.remove(row, col))
    }

    fn ensure_in_range(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.columns {
            return Err(RayCasterError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                columns: self.columns,
            });
        }

        Ok(())
    }

    // Assumes `row` and `col` are in range.
    fn remove(&self, row: usize, col: usize) -> Matrix {
        let data = self.data.iter().enumerate()
            .filter(|(i, _)| i / self.columns != row && i % self.columns != col)
            .map(|(_, x)| *x)
            .collect();

        Matrix {
            rows: self.rows.saturating_sub(1),
            columns: self.columns.saturating_sub(1),
            data,
        }
    }

    /// The determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> Result<f64> {
        self.ensure_square()?;
        Ok(self.submatrix(row, col)?.det())
    }

    /// The minor at `row` and `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> Result<f64> {
        self.ensure_square()?;
        self.ensure_in_range(row, col)?;
        Ok(self.cofactor_unchecked(row, col))
    }

    pub fn determinant(&self) -> Result<f64> {
        self.ensure_square()?;
        Ok(self.det())
    }

    fn cofactor_unchecked(&self, row: usize, col: usize) -> f64 {
        let m = self.remove(row, col).det();
        if (row + col) % 2 == 0 { m } else { -m }
    }

    // Cofactor expansion along the first row; assumes a square matrix.
    fn det(&self) -> f64 {
        match self.rows {
            0 => 1.0,
            1 => self.data[0],
            2 => self.data[0] * self.data[3] - self.data[1] * self.data[2],
            n => (0..n).map(|c| self[(0, c)] * self.cofactor_unchecked(0, c)).sum(),
        }
    }

    /// Inverts a square matrix via its cofactors.
    ///
    /// Fails with `NotInvertible` when the determinant is (numerically) zero.
    pub fn inverse(&self) -> Result<Matrix> {
        let det = self.determinant()?;
        if det.abs() < SINGULAR_EPSILON {
            return Err(RayCasterError::NotInvertible);
        }

        let n = self.rows;
        let mut data = vec![0.0; n * n];
        for r in 0..n {
            for c in 0..n {
                // Writing to (c, r) transposes the cofactor matrix in passing.
                data[c * n + r] = self.cofactor_unchecked(r, c) / det;
            }
        }

        Ok(Matrix { rows: n, columns: n, data })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * self.columns) + index.1]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r != 0 {
                writeln!(f)?;
            }

            write!(f, "|")?;
            for x in self.row(r) {
                write!(f, " {} |", x)?;
            }
        }

        Ok(())
    }
}

/// A 4x4 matrix.
///
/// These encode the affine transforms used everywhere in the ray caster,
/// acting on points (`w == 1.0`) and vectors (`w == 0.0`) alike. Transforms
/// compose by multiplication and apply right to left: in `c * b * a`, `a`
/// acts on the object first.
///
/// # Examples
///
/// ```
/// # use ray_caster::tuple::Tuple;
/// # use ray_caster::matrix::Matrix4;
/// let t = Matrix4::translation(10.0, 5.0, 7.0)
///     * Matrix4::scaling(5.0, 5.0, 5.0)
///     * Matrix4::rotation_x(std::f64::consts::PI / 2.0);
///
/// assert_eq!(t * Tuple::point(1.0, 0.0, 1.0), Tuple::point(15.0, 0.0, 7.0));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Matrix4 {
    data: [f64; 16],
}

impl PartialEq for Matrix4 {
    fn eq(&self, other: &Matrix4) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Default for Matrix4 {
    fn default() -> Matrix4 {
        Matrix4::identity()
    }
}

impl Matrix4 {
    pub fn identity() -> Matrix4 {
        let mut data = [0.0; 16];
        data[0] = 1.0; data[5] = 1.0; data[10] = 1.0; data[15] = 1.0;

        Matrix4 { data }
    }

    /// Offsets points by `x`, `y` and `z`. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4 {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Scales along the X, Y and Z axes. Negative factors reflect.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4 {
        let mut scale = Self::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Rotates `r` radians about the X axis.
    pub fn rotation_x(r: f64) -> Matrix4 {
        let (sin, cos) = r.sin_cos();
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  cos;
        rotate[(1, 2)] = -sin;
        rotate[(2, 1)] =  sin;
        rotate[(2, 2)] =  cos;

        rotate
    }

    /// Rotates `r` radians about the Y axis.
    pub fn rotation_y(r: f64) -> Matrix4 {
        let (sin, cos) = r.sin_cos();
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  cos;
        rotate[(0, 2)] =  sin;
        rotate[(2, 0)] = -sin;
        rotate[(2, 2)] =  cos;

        rotate
    }

    /// Rotates `r` radians about the Z axis.
    pub fn rotation_z(r: f64) -> Matrix4 {
        let (sin, cos) = r.sin_cos();
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  cos;
        rotate[(0, 1)] = -sin;
        rotate[(1, 0)] =  sin;
        rotate[(1, 1)] =  cos;

        rotate
    }

    /// Shears each axis in proportion to the other two.
    ///
    /// `xy` is how much `x` moves per unit of `y`, `xz` how much `x` moves per
    /// unit of `z`, and so on.
    ///
    /// ```
    /// # use ray_caster::tuple::Tuple;
    /// # use ray_caster::matrix::Matrix4;
    /// let m = Matrix4::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * Tuple::point(2.0, 3.0, 4.0), Tuple::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4 {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Generates a view transformation.
    ///
    /// The eye sits at `from`, looks toward `to`, and `up` roughly says which
    /// way is up. The result moves the *world* in front of the eye, which is
    /// what a camera transform needs.
    ///
    /// Fails if `up` is not a vector.
    pub fn view_transform(from: Tuple, to: Tuple, up: Tuple) -> Result<Matrix4> {
        let forward = (to - from).normalize();
        let left = forward.cross(&up.normalize())?;
        let true_up = left.cross(&forward)?;

        let orientation: Matrix4 = [
             left.x,     left.y,     left.z,    0.0,
             true_up.x,  true_up.y,  true_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
             0.0,        0.0,        0.0,       1.0,
        ].into();

        Ok(orientation * Matrix4::translation(-from.x, -from.y, -from.z))
    }

    pub fn transpose(&self) -> Matrix4 {
        let mut buf = *self;

        for r in 0..4 {
            for c in (r + 1)..4 {
                buf[(r, c)] = self[(c, r)];
                buf[(c, r)] = self[(r, c)];
            }
        }

        buf
    }

    pub fn determinant(&self) -> f64 {
        Matrix::from(*self).det()
    }

    /// Calculates the inverse, or `NotInvertible` for a singular matrix.
    pub fn inverse(&self) -> Result<Matrix4> {
        let inv = Matrix::from(*self).inverse()?;
        Matrix4::try_from(&inv)
    }
}

impl From<[f64; 16]> for Matrix4 {
    fn from(data: [f64; 16]) -> Matrix4 {
        Matrix4 { data }
    }
}

impl From<Matrix4> for Matrix {
    fn from(m: Matrix4) -> Matrix {
        Matrix { rows: 4, columns: 4, data: m.data.to_vec() }
    }
}

impl TryFrom<&Matrix> for Matrix4 {
    type Error = RayCasterError;

    fn try_from(m: &Matrix) -> Result<Matrix4> {
        if m.rows != 4 || m.columns != 4 {
            return Err(RayCasterError::MatrixDimension {
                rows: 4,
                columns: 4,
                len: m.data.len(),
            });
        }

        let mut data = [0.0; 16];
        data.copy_from_slice(&m.data);
        Ok(Matrix4 { data })
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 4) + index.1]
    }
}

/// Matrix product. Not commutative: `a * b` and `b * a` usually differ.
impl Mul<Matrix4> for Matrix4 {
    type Output = Matrix4;

    fn mul(self, other: Matrix4) -> Matrix4 {
        let mut res = Matrix4 { data: [0.0; 16] };

        for r in 0..4 {
            for c in 0..4 {
                res[(r, c)] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)]
                    + self[(r, 3)] * other[(3, c)]
            }
        }

        res
    }
}

/// Transforms a tuple, taken as a 4x1 column on the right.
impl Mul<Tuple> for Matrix4 {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        let row = |r: usize| self[(r, 0)] * other.x
            + self[(r, 1)] * other.y
            + self[(r, 2)] * other.z
            + self[(r, 3)] * other.w;

        Tuple::new(row(0), row(1), row(2), row(3))
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Matrix::from(*self), f)
    }
}

#[test]
fn construction_checks_dimensions() {
    let err = Matrix::new(3, 3, vec![1.0; 8]).unwrap_err();

    assert!(matches!(err,
        RayCasterError::MatrixDimension { rows: 3, columns: 3, len: 8 }));
    assert!(Matrix::new(2, 4, vec![0.0; 8]).is_ok());
}

#[test]
fn construction_rejects_overflowing_dimensions() {
    let err = Matrix::new(usize::MAX, 2, vec![]).unwrap_err();

    assert!(matches!(err,
        RayCasterError::MatrixDimension { rows: usize::MAX, columns: 2, len: 0 }));
}

#[test]
fn rows_and_columns() {
    let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0,
                                   4.0, 5.0, 6.0]).unwrap();

    assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    assert_eq!(m.column(2), vec![3.0, 6.0]);
    assert_eq!(m[(0, 1)], 2.0);
    assert_eq!(m.get(1, 2), Some(6.0));
    assert_eq!(m.get(2, 0), None);
}

#[test]
fn generic_product_requires_conformable_shapes() {
    let a = Matrix::new(2, 3, vec![1.0; 6]).unwrap();
    let b = Matrix::new(2, 3, vec![1.0; 6]).unwrap();

    assert!(matches!(a.try_mul(&b),
        Err(RayCasterError::NonConformable { left_columns: 3, right_rows: 2 })));
    assert_eq!(a.try_mul(&b.transpose()).unwrap(),
        Matrix::new(2, 2, vec![3.0, 3.0, 3.0, 3.0]).unwrap());
}

#[test]
fn generic_product_matches_fixed_product() {
    let a: Matrix4 = [ 1.0, 2.0, 3.0, 4.0,
                       5.0, 6.0, 7.0, 8.0,
                       9.0, 8.0, 7.0, 6.0,
                       5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix4 = [ -2.0, 1.0, 2.0,  3.0,
                        3.0, 2.0, 1.0, -1.0,
                        4.0, 3.0, 6.0,  5.0,
                        1.0, 2.0, 7.0,  8.0, ].into();

    let e: Matrix4 = [ 20.0, 22.0,  50.0,  48.0,
                       44.0, 54.0, 114.0, 108.0,
                       40.0, 58.0, 110.0, 102.0,
                       16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, e);
    assert_eq!(Matrix::from(a).try_mul(&Matrix::from(b)).unwrap(),
        Matrix::from(e));
}

#[test]
fn generic_tuple_product() {
    let m = Matrix::from(Matrix4::translation(1.0, 2.0, 3.0));
    let p = Tuple::point(1.0, 1.0, 1.0);

    assert_eq!(m.try_mul_tuple(&p).unwrap(), Tuple::point(2.0, 3.0, 4.0));
    assert!(Matrix::identity(3).try_mul_tuple(&p).is_err());
}

#[test]
fn identity() {
    let i = Matrix4::identity();
    let a: Matrix4 = [ 0.0, 1.0,  2.0,  4.0,
                       1.0, 2.0,  4.0,  8.0,
                       2.0, 4.0,  8.0, 16.0,
                       4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(Matrix::from(i), Matrix::identity(4));
}

#[test]
fn transpose() {
     let a: Matrix4 = [ 0.0, 9.0, 3.0, 0.0,
                        9.0, 8.0, 0.0, 8.0,
                        1.0, 8.0, 5.0, 3.0,
                        0.0, 0.0, 5.0, 8.0, ].into();

     let t: Matrix4 = [ 0.0, 9.0, 1.0, 0.0,
                        9.0, 8.0, 8.0, 0.0,
                        3.0, 0.0, 5.0, 5.0,
                        0.0, 8.0, 3.0, 8.0, ].into();

     assert_eq!(a.transpose(), t);
     assert_eq!(t.transpose(), a);
     assert_eq!(Matrix::from(a).transpose(), Matrix::from(t));
     assert_eq!(Matrix4::identity().transpose(), Matrix4::identity());
}

#[test]
fn submatrices() {
    let a = Matrix::new(3, 3, vec![ 1.0, 5.0,  0.0,
                                   -3.0, 2.0,  7.0,
                                    0.0, 6.0, -3.0, ]).unwrap();

    assert_eq!(a.submatrix(0, 2).unwrap(),
        Matrix::new(2, 2, vec![-3.0, 2.0, 0.0, 6.0]).unwrap());

    let b = Matrix::from(Matrix4::from([ -6.0, 1.0,  1.0, 6.0,
                                         -8.0, 5.0,  8.0, 6.0,
                                         -1.0, 0.0,  8.0, 2.0,
                                         -7.0, 1.0, -1.0, 1.0, ]));

    assert_eq!(b.submatrix(2, 1).unwrap(),
        Matrix::new(3, 3, vec![ -6.0,  1.0, 6.0,
                                -8.0,  8.0, 6.0,
                                -7.0, -1.0, 1.0, ]).unwrap());
}

#[test]
fn minors_and_cofactors() {
    let a = Matrix::new(3, 3, vec![ 3.0,  5.0,  0.0,
                                    2.0, -1.0, -7.0,
                                    6.0, -1.0,  5.0, ]).unwrap();

    assert_eq!(a.minor(0, 0).unwrap(), -12.0);
    assert_eq!(a.cofactor(0, 0).unwrap(), -12.0);
    assert_eq!(a.minor(1, 0).unwrap(), 25.0);
    assert_eq!(a.cofactor(1, 0).unwrap(), -25.0);
}

#[test]
fn submatrix_rejects_indices_outside_the_matrix() {
    let a = Matrix::identity(3);

    assert!(matches!(a.submatrix(5, 0),
        Err(RayCasterError::IndexOutOfRange { row: 5, col: 0, rows: 3, columns: 3 })));
    assert!(a.submatrix(0, 3).is_err());
    assert!(a.minor(5, 0).is_err());
    assert!(a.cofactor(0, 7).is_err());
}

#[test]
fn determinants() {
    let a = Matrix::new(3, 3, vec![  1.0, 2.0,  6.0,
                                    -5.0, 8.0, -4.0,
                                     2.0, 6.0,  4.0, ]).unwrap();

    assert_eq!(a.cofactor(0, 2).unwrap(), -46.0);
    assert_eq!(a.determinant().unwrap(), -196.0);

    let b: Matrix4 = [ -2.0, -8.0,  3.0,  5.0,
                       -3.0,  1.0,  7.0,  3.0,
                        1.0,  2.0, -9.0,  6.0,
                       -6.0,  7.0,  7.0, -9.0, ].into();

    assert_eq!(Matrix::from(b).cofactor(0, 3).unwrap(), 51.0);
    assert_eq!(b.determinant(), -4071.0);
}

#[test]
fn determinant_requires_square() {
    let a = Matrix::new(2, 3, vec![0.0; 6]).unwrap();

    assert!(matches!(a.determinant(),
        Err(RayCasterError::NotSquare { rows: 2, columns: 3 })));
    assert!(a.inverse().is_err());
}

#[test]
fn singular_matrix_has_no_inverse() {
    let a: Matrix4 = [ -4.0,  2.0, -2.0, -3.0,
                        9.0,  6.0,  2.0,  6.0,
                        0.0, -5.0,  1.0, -5.0,
                        0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(a.determinant(), 0.0);
    assert!(matches!(a.inverse(), Err(RayCasterError::NotInvertible)));
    assert!(Matrix4::scaling(0.0, 1.0, 1.0).inverse().is_err());
}

#[test]
fn tiny_scaling_is_still_invertible() {
    let m = Matrix4::scaling(0.01, 0.01, 0.01);

    assert_eq!(m.inverse().unwrap(), Matrix4::scaling(100.0, 100.0, 100.0));
}

#[test]
fn inverse() {
     let a: Matrix4 = [  8.0, -5.0,  9.0,  2.0,
                         7.0,  5.0,  6.0,  1.0,
                        -6.0,  0.0,  9.0,  6.0,
                        -3.0,  0.0, -9.0, -4.0, ].into();

     let i: Matrix4 = [ -0.15385, -0.15385, -0.28205, -0.53846,
                        -0.07692,  0.12308,  0.02564,  0.03077,
                         0.35897,  0.35897,  0.43590,  0.92308,
                        -0.69231, -0.69231, -0.76923, -1.92308, ].into();

     assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn product_times_inverse() {
     let a: Matrix4 = [  3.0, -9.0,  7.0,  3.0,
                         3.0,  8.0,  2.0, -9.0,
                        -4.0,  4.0,  4.0,  1.0,
                        -6.0,  5.0, -1.0,  1.0, ].into();

     let b: Matrix4 = [ 8.0,  2.0, 2.0, 2.0,
                        3.0, -1.0, 7.0, 0.0,
                        7.0,  0.0, 5.0, 4.0,
                        6.0, -2.0, 0.0, 5.0  ].into();

     let c = a * b;
     assert_eq!(c * b.inverse().unwrap(), a);
}

#[test]
fn inverse_round_trips_points() {
    let transforms = [
        Matrix4::translation(5.0, -3.0, 2.0),
        Matrix4::scaling(2.0, 3.0, 4.0),
        Matrix4::rotation_x(0.7) * Matrix4::rotation_y(-1.3),
        Matrix4::shearing(1.0, 0.5, 0.0, 0.2, 0.3, 1.0),
        Matrix4::translation(1.0, 2.0, 3.0) * Matrix4::rotation_z(2.1)
            * Matrix4::scaling(0.5, 1.5, 3.0),
    ];
    let p = Tuple::point(-3.0, 4.0, 5.0);

    for m in transforms.iter() {
        assert_eq!(m.inverse().unwrap() * (*m * p), p);
    }
}

#[test]
fn translation() {
    let transform = Matrix4::translation(5.0, -3.0, 2.0);
    let point = Tuple::point(-3.0, 4.0, 5.0);
    let vector = Tuple::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple::point(2.0, 1.0, 7.0));
    assert_eq!(transform.inverse().unwrap() * point, Tuple::point(-8.0, 7.0, 3.0));
    assert_eq!(transform * vector, vector);
}

#[test]
fn scaling() {
    let transform = Matrix4::scaling(2.0, 3.0, 4.0);
    let vector = Tuple::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple::vector(-8.0, 18.0, 32.0));
    assert_eq!(transform.inverse().unwrap() * vector, Tuple::vector(-2.0, 2.0, 2.0));
    assert_eq!(Matrix4::scaling(-1.0, 1.0, 1.0) * Tuple::point(2.0, 3.0, 4.0),
        Tuple::point(-2.0, 3.0, 4.0));
}

#[test]
fn rotations() {
    use std::f64::consts::PI;
    let half = 2.0f64.sqrt() / 2.0;

    assert_eq!(Matrix4::rotation_x(PI / 2.0) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(Matrix4::rotation_x(PI / 4.0) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(0.0, half, half));

    assert_eq!(Matrix4::rotation_y(PI / 2.0) * Tuple::point(0.0, 0.0, 1.0),
        Tuple::point(1.0, 0.0, 0.0));
    assert_eq!(Matrix4::rotation_y(PI / 4.0) * Tuple::point(0.0, 0.0, 1.0),
        Tuple::point(half, 0.0, half));

    assert_eq!(Matrix4::rotation_z(PI / 2.0) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(-1.0, 0.0, 0.0));
    assert_eq!(Matrix4::rotation_z(PI / 4.0) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(-half, half, 0.0));
}

#[test]
fn shearing() {
    let point = Tuple::point(2.0, 3.0, 4.0);
    let cases = [
        ([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], Tuple::point(5.0, 3.0, 4.0)),
        ([0.0, 1.0, 0.0, 0.0, 0.0, 0.0], Tuple::point(6.0, 3.0, 4.0)),
        ([0.0, 0.0, 1.0, 0.0, 0.0, 0.0], Tuple::point(2.0, 5.0, 4.0)),
        ([0.0, 0.0, 0.0, 1.0, 0.0, 0.0], Tuple::point(2.0, 7.0, 4.0)),
        ([0.0, 0.0, 0.0, 0.0, 1.0, 0.0], Tuple::point(2.0, 3.0, 6.0)),
        ([0.0, 0.0, 0.0, 0.0, 0.0, 1.0], Tuple::point(2.0, 3.0, 7.0)),
    ];

    for (s, expected) in cases.iter() {
        let m = Matrix4::shearing(s[0], s[1], s[2], s[3], s[4], s[5]);
        assert_eq!(m * point, *expected);
    }
}

#[test]
fn chained_transforms() {
    let a = Matrix4::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix4::scaling(5.0, 5.0, 5.0);
    let c = Matrix4::translation(10.0, 5.0, 7.0);
    let p = Tuple::point(1.0, 0.0, 1.0);

    assert_eq!(c * b * a * p, Tuple::point(15.0, 0.0, 7.0));
    assert_eq!(c * (b * a), (c * b) * a);
}

#[test]
fn composition_is_not_commutative() {
    let r = Matrix4::rotation_x(std::f64::consts::PI / 2.0);
    let t = Matrix4::translation(0.0, 0.0, 1.0);

    assert_ne!(r * t, t * r);
}

#[test]
fn default_view() {
    let from = Tuple::point(0.0, 0.0, 0.0);
    let to = Tuple::point(0.0, 0.0, -1.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4::view_transform(from, to, up).unwrap(), Matrix4::identity());
}

#[test]
fn positive_z_view() {
    let from = Tuple::point(0.0, 0.0, 0.0);
    let to = Tuple::point(0.0, 0.0, 1.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4::view_transform(from, to, up).unwrap(),
        Matrix4::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Tuple::point(0.0, 0.0, 8.0);
    let to = Tuple::point(0.0, 0.0, 0.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4::view_transform(from, to, up).unwrap(),
        Matrix4::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple::point(1.0, 3.0, 2.0);
    let to = Tuple::point(4.0, -2.0, 8.0);
    let up = Tuple::vector(1.0, 1.0, 0.0);

    let a: Matrix4 = [ -0.50709, 0.50709,  0.67612, -2.36643,
                        0.76772, 0.60609,  0.12122, -2.82843,
                       -0.35857, 0.59761, -0.71714,  0.00000,
                        0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix4::view_transform(from, to, up).unwrap(), a);
}

#[test]
fn view_rejects_point_as_up() {
    let from = Tuple::point(0.0, 0.0, 8.0);
    let to = Tuple::point(0.0, 0.0, 0.0);

    assert!(Matrix4::view_transform(from, to, Tuple::point(0.0, 1.0, 0.0)).is_err());
}
