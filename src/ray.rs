use crate::tuple::Tuple;
use crate::matrix::Matrix4;

/// A ray: an origin point and a direction vector.
///
/// Rays are plain values. Transforming one yields a new ray; nothing mutates
/// a ray after construction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    pub fn new(origin: Tuple, direction: Tuple) -> Ray {
        Ray { origin, direction }
    }

    /// The point `t` units of `direction` away from `origin`.
    pub fn position(&self, t: f64) -> Tuple {
        self.origin + (t * self.direction)
    }

    /// Applies `m` to both the origin and the direction.
    ///
    /// The direction is left unnormalized, so `t` values measured along the
    /// transformed ray line up with those along the original one.
    pub fn transform(&self, m: &Matrix4) -> Ray {
        Ray {
            origin: *m * self.origin,
            direction: *m * self.direction,
        }
    }
}

#[test]
fn ray_position() {
    let r = Ray::new(Tuple::point(2.0, 3.0, 4.0), Tuple::vector(1.0, 0.0, 0.0));

    assert_eq!(r.position(0.0), Tuple::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple::point(4.5, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray::new(Tuple::point(1.0, 2.0, 3.0), Tuple::vector(0.0, 1.0, 0.0));
    let t = r.transform(&Matrix4::translation(3.0, 4.0, 5.0));

    assert_eq!(t.origin, Tuple::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_scaling() {
    let r = Ray::new(Tuple::point(1.0, 2.0, 3.0), Tuple::vector(0.0, 1.0, 0.0));
    let t = r.transform(&Matrix4::scaling(2.0, 3.0, 4.0));

    assert_eq!(t.origin, Tuple::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 3.0, 0.0));
    assert_eq!(r.origin, Tuple::point(1.0, 2.0, 3.0));
}
