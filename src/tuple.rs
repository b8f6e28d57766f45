use std::fmt;
use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::consts::feq;
use crate::error::{ RayCasterError, Result };

/// A homogeneous `(x, y, z, w)` tuple.
///
/// Points carry `w == 1.0` and vectors carry `w == 0.0`. There is no separate
/// tag; the kind of a tuple is read off `w` by approximate comparison, so a
/// point that went through a few transforms is still a point.
///
/// Arithmetic never rejects a result whose `w` falls outside `{0, 1}` (adding
/// two points, say). Callers are expected to respect point/vector algebra.
///
/// # Examples
///
/// ```
/// use ray_caster::tuple::Tuple;
///
/// let p = Tuple::point(3.0, 2.0, 1.0);
/// let v = Tuple::vector(5.0, 6.0, 7.0);
///
/// assert!((p - v).is_point());
/// assert!((p - p).is_vector());
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Tuple) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Tuple {
        Tuple { x, y, z, w }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 1.0 }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 0.0 }
    }

    /// The world origin, `point(0, 0, 0)`.
    pub fn origin() -> Tuple {
        Tuple::point(0.0, 0.0, 0.0)
    }

    pub fn is_point(&self) -> bool {
        feq(self.w, 1.0)
    }

    pub fn is_vector(&self) -> bool {
        feq(self.w, 0.0)
    }

    /// Euclidean norm over all four components.
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scales the tuple to unit length.
    ///
    /// A zero tuple has no direction; normalizing one yields NaN components.
    /// Use `try_normalize` where a zero tuple can actually show up.
    pub fn normalize(&self) -> Tuple {
        *self / self.magnitude()
    }

    /// Like `normalize`, but reports a zero-length tuple as an error.
    pub fn try_normalize(&self) -> Result<Tuple> {
        let mag = self.magnitude();
        if feq(mag, 0.0) {
            return Err(RayCasterError::ZeroLength);
        }

        Ok(*self / mag)
    }

    pub fn dot(&self, other: &Tuple) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
            + self.w * other.w
    }

    /// Cross product of the `xyz` parts of two vectors.
    ///
    /// Both operands must be vectors; crossing a point is a contract error.
    pub fn cross(&self, other: &Tuple) -> Result<Tuple> {
        if !self.is_vector() || !other.is_vector() {
            return Err(RayCasterError::NotAVector { operation: "cross" });
        }

        Ok(Tuple::vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        ))
    }

    /// Reflects a vector across a normal: `v - n * 2 * dot(v, n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_caster::tuple::Tuple;
    /// let v = Tuple::vector(1.0, -1.0, 0.0);
    /// let n = Tuple::vector(0.0, 1.0, 0.0);
    /// assert_eq!(v.reflect(&n).unwrap(), Tuple::vector(1.0, 1.0, 0.0));
    /// ```
    pub fn reflect(&self, normal: &Tuple) -> Result<Tuple> {
        if !self.is_vector() || !normal.is_vector() {
            return Err(RayCasterError::NotAVector { operation: "reflect" });
        }

        Ok(*self - (*normal * 2.0 * self.dot(normal)))
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl Add for Tuple {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w
        }
    }
}

impl Sub for Tuple {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w
        }
    }
}

impl Neg for Tuple {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w
        }
    }
}

impl Mul<f64> for Tuple {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
            w: self.w * other
        }
    }
}

/// Scalar left-multiplication, so `t * ray.direction` reads naturally.
impl Mul<Tuple> for f64 {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        other * self
    }
}

impl Div<f64> for Tuple {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
            w: self.w / other
        }
    }
}

/* Tests */

#[test]
fn point_and_vector_are_read_off_w() {
    let p = Tuple::new(4.3, -4.2, 3.1, 1.0);
    let v = Tuple::new(4.3, -4.2, 3.1, 0.0);

    assert!(p.is_point() && !p.is_vector());
    assert!(v.is_vector() && !v.is_point());
    assert!(Tuple::new(0.0, 0.0, 0.0, 0.999999).is_point());
}

#[test]
fn add_tuples() {
    let a1 = Tuple::new(3.0, -2.0, 5.0, 1.0);
    let a2 = Tuple::new(-2.0, 3.0, 1.0, 0.0);

    assert_eq!(a1 + a2, Tuple::new(1.0, 1.0, 6.0, 1.0));
}

#[test]
fn sub_points() {
    let p1 = Tuple::point(3.0, 2.0, 1.0);
    let p2 = Tuple::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Tuple::point(3.0, 2.0, 1.0);
    let v = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple::point(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple::new(-1.0, 2.0, -3.0, 4.0));
}

#[test]
fn scale_tuple() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 3.5, Tuple::new(3.5, -7.0, 10.5, -14.0));
    assert_eq!(0.5 * a, Tuple::new(0.5, -1.0, 1.5, -2.0));
    assert_eq!(a / 2.0, Tuple::new(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn magnitude() {
    assert_eq!(Tuple::vector(1.0, 2.0, 3.0).magnitude(), f64::sqrt(14.0));
    assert_eq!(Tuple::vector(-1.0, -2.0, -3.0).magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_has_unit_length() {
    let vectors = [
        Tuple::vector(4.0, 0.0, 0.0),
        Tuple::vector(1.0, 2.0, 3.0),
        Tuple::vector(-0.001, 250.0, 7.5),
    ];

    for v in vectors.iter() {
        assert!(feq(v.normalize().magnitude(), 1.0));
    }

    let e = Tuple::vector(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );
    assert_eq!(Tuple::vector(1.0, 2.0, 3.0).normalize(), e);
}

#[test]
fn try_normalize_rejects_zero() {
    let zero = Tuple::vector(0.0, 0.0, 0.0);

    assert!(matches!(zero.try_normalize(), Err(RayCasterError::ZeroLength)));
    assert_eq!(Tuple::vector(0.0, 3.0, 0.0).try_normalize().unwrap(),
        Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn dot_vectors() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b).unwrap(), Tuple::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a).unwrap(), Tuple::vector(1.0, -2.0, 1.0));
}

#[test]
fn cross_rejects_points() {
    let p = Tuple::point(1.0, 2.0, 3.0);
    let v = Tuple::vector(2.0, 3.0, 4.0);

    assert!(matches!(p.cross(&v),
        Err(RayCasterError::NotAVector { operation: "cross" })));
    assert!(v.cross(&p).is_err());
}

#[test]
fn reflect_45() {
    let v = Tuple::vector(1.0, -1.0, 0.0);
    let n = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n).unwrap(), Tuple::vector(1.0, 1.0, 0.0));
}

#[test]
fn reflect_off_slanted_surface() {
    let v = Tuple::vector(0.0, -1.0, 0.0);
    let n = Tuple::vector(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);

    assert_eq!(v.reflect(&n).unwrap(), Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn reflect_rejects_points() {
    let p = Tuple::point(1.0, -1.0, 0.0);
    let n = Tuple::vector(0.0, 1.0, 0.0);

    assert!(p.reflect(&n).is_err());
    assert!(n.reflect(&p).is_err());
}
