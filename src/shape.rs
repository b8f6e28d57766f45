use std::fmt::Debug;

use crate::consts::FEQ_EPSILON;
use crate::error::Result;
use crate::tuple::Tuple;
use crate::ray::Ray;
use crate::light::Material;
use crate::matrix::Matrix4;
use crate::intersect::{ Intersection, Intersections };

/// The local-space geometry of a surface.
///
/// Implementors only ever see rays and points in their own untransformed
/// frame. `Shape` owns the transform and does the world/local conversion for
/// every geometry alike, so a new surface only has to answer two questions:
/// where does a local ray cross it, and which way does it face at a local
/// point.
///
/// Geometries must be `Send + Sync` so that a `World` can be shared across
/// render threads.
pub trait Geometry: Debug + Send + Sync {
    /// Every `t` at which `ray` crosses the surface, in no particular order.
    /// Negative values are kept; hit selection filters them later.
    fn local_intersect(&self, ray: &Ray) -> Vec<f64>;

    /// The outward surface normal at `point`, as a vector.
    fn local_normal_at(&self, point: &Tuple) -> Tuple;
}

/// A unit sphere centered on the local origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sphere;

impl Geometry for Sphere {
    /// Substitutes the ray into `x^2 + y^2 + z^2 = 1` and solves the
    /// quadratic. A negative discriminant means a miss; a tangent ray yields
    /// the same `t` twice.
    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        let sphere_to_ray = ray.origin - Tuple::origin();

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);
        if discriminant < 0.0 {
            return Vec::new();
        }

        let root = discriminant.sqrt();
        vec![(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
    }

    fn local_normal_at(&self, point: &Tuple) -> Tuple {
        *point - Tuple::origin()
    }
}

/// The infinite XZ plane, facing up the Y axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Plane;

impl Geometry for Plane {
    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        // A ray parallel to the plane (or lying in it) never crosses it.
        // The local direction is unnormalized, so compare against its length.
        if ray.direction.y.abs() < FEQ_EPSILON * ray.direction.magnitude() {
            return Vec::new();
        }

        vec![-ray.origin.y / ray.direction.y]
    }

    fn local_normal_at(&self, _point: &Tuple) -> Tuple {
        Tuple::vector(0.0, 1.0, 0.0)
    }
}

/// An axis-aligned cube spanning -1 to 1 on every axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cube;

impl Cube {
    /// Where a ray enters and leaves the slab `-1 <= x <= 1` along one axis,
    /// smaller `t` first. `length` is the magnitude of the whole direction.
    fn check_axis(origin: f64, direction: f64, length: f64) -> (f64, f64) {
        let tmin_numerator = -1.0 - origin;
        let tmax_numerator =  1.0 - origin;

        let (tmin, tmax) = if direction.abs() >= FEQ_EPSILON * length {
            (tmin_numerator / direction, tmax_numerator / direction)
        } else {
            (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
        };

        if tmin > tmax { (tmax, tmin) } else { (tmin, tmax) }
    }
}

impl Geometry for Cube {
    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        let length = ray.direction.magnitude();
        let (xtmin, xtmax) = Self::check_axis(ray.origin.x, ray.direction.x, length);
        let (ytmin, ytmax) = Self::check_axis(ray.origin.y, ray.direction.y, length);
        let (ztmin, ztmax) = Self::check_axis(ray.origin.z, ray.direction.z, length);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        if tmin > tmax {
            return Vec::new();
        }

        vec![tmin, tmax]
    }

    /// The normal of whichever face the point lies on, picked by its largest
    /// absolute component.
    fn local_normal_at(&self, p: &Tuple) -> Tuple {
        let xa = p.x.abs();
        let ya = p.y.abs();
        let za = p.z.abs();

        if xa >= ya && xa >= za {
            Tuple::vector(p.x, 0.0, 0.0)
        } else if ya >= za {
            Tuple::vector(0.0, p.y, 0.0)
        } else {
            Tuple::vector(0.0, 0.0, p.z)
        }
    }
}

/// A cylinder of radius 1 around the Y axis.
///
/// The cylinder is truncated to `minimum < y < maximum` (both exclusive);
/// `closed` adds flat caps at either end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Default for Cylinder {
    /// An infinitely long, open cylinder.
    fn default() -> Cylinder {
        Cylinder {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            closed: false,
        }
    }
}

impl Cylinder {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Cylinder {
        Cylinder { minimum, maximum, closed }
    }

    // Whether the point at `t` lies within the unit radius of the Y axis.
    fn within_cap(ray: &Ray, t: f64) -> bool {
        let x = ray.origin.x + t * ray.direction.x;
        let z = ray.origin.z + t * ray.direction.z;

        x.powi(2) + z.powi(2) <= 1.0
    }

    fn intersect_caps(&self, ray: &Ray, xs: &mut Vec<f64>) {
        if !self.closed || ray.direction.y.abs() < FEQ_EPSILON * ray.direction.magnitude() {
            return;
        }

        for bound in [self.minimum, self.maximum].iter() {
            let t = (bound - ray.origin.y) / ray.direction.y;
            if Self::within_cap(ray, t) {
                xs.push(t);
            }
        }
    }
}

impl Geometry for Cylinder {
    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        let mut xs = Vec::new();
        let a = ray.direction.x.powi(2) + ray.direction.z.powi(2);

        // Parallel to the Y axis: only the caps can be hit.
        if a < FEQ_EPSILON * ray.direction.dot(&ray.direction) {
            self.intersect_caps(ray, &mut xs);
            return xs;
        }

        let b = 2.0 * ray.origin.x * ray.direction.x
              + 2.0 * ray.origin.z * ray.direction.z;
        let c = ray.origin.x.powi(2) + ray.origin.z.powi(2) - 1.0;

        let disc = b.powi(2) - 4.0 * a * c;
        if disc < 0.0 {
            return xs;
        }

        let t0 = (-b - disc.sqrt()) / (2.0 * a);
        let t1 = (-b + disc.sqrt()) / (2.0 * a);

        for t in [t0, t1].iter() {
            let y = ray.origin.y + t * ray.direction.y;
            if self.minimum < y && y < self.maximum {
                xs.push(*t);
            }
        }

        self.intersect_caps(ray, &mut xs);
        xs
    }

    fn local_normal_at(&self, at: &Tuple) -> Tuple {
        let dist = at.x.powi(2) + at.z.powi(2);

        if dist < 1.0 && at.y >= self.maximum - FEQ_EPSILON {
            Tuple::vector(0.0, 1.0, 0.0)
        } else if dist < 1.0 && at.y <= self.minimum + FEQ_EPSILON {
            Tuple::vector(0.0, -1.0, 0.0)
        } else {
            Tuple::vector(at.x, 0.0, at.z)
        }
    }
}

/// A surface placed in the world.
///
/// Pairs a `Geometry` with the transform that maps its local frame into world
/// space, plus a `Material`. The inverse and inverse-transpose of the
/// transform are computed once, when the transform is assigned, so a
/// non-invertible transform is rejected up front and the per-ray path never
/// inverts anything.
///
/// # Examples
///
/// ```
/// # use ray_caster::tuple::Tuple;
/// # use ray_caster::ray::Ray;
/// # use ray_caster::matrix::Matrix4;
/// # use ray_caster::shape::Shape;
/// let s = Shape::sphere()
///     .with_transform(Matrix4::scaling(2.0, 2.0, 2.0))
///     .unwrap();
/// let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
///
/// let xs = s.intersect(&r);
/// assert_eq!(xs.len(), 2);
/// assert_eq!(xs[0].t, 3.0);
/// assert_eq!(xs[1].t, 7.0);
/// ```
#[derive(Debug)]
pub struct Shape {
    geometry: Box<dyn Geometry>,
    pub material: Material,

    transform: Matrix4,
    inverse: Matrix4,
    inverse_transpose: Matrix4,
}

impl Shape {
    /// Wraps a geometry with the identity transform and default material.
    pub fn new<G: Geometry + 'static>(geometry: G) -> Shape {
        Shape {
            geometry: Box::new(geometry),
            material: Material::default(),
            transform: Matrix4::identity(),
            inverse: Matrix4::identity(),
            inverse_transpose: Matrix4::identity(),
        }
    }

    pub fn sphere() -> Shape {
        Shape::new(Sphere)
    }

    pub fn plane() -> Shape {
        Shape::new(Plane)
    }

    pub fn cube() -> Shape {
        Shape::new(Cube)
    }

    pub fn cylinder(minimum: f64, maximum: f64, closed: bool) -> Shape {
        Shape::new(Cylinder::new(minimum, maximum, closed))
    }

    pub fn with_transform(mut self, transform: Matrix4) -> Result<Shape> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Assigns a transform whose inverse the caller already knows, skipping
    /// the inversion and its singularity check.
    pub(crate) fn with_known_inverse(mut self, transform: Matrix4, inverse: Matrix4) -> Shape {
        self.transform = transform;
        self.inverse = inverse;
        self.inverse_transpose = inverse.transpose();
        self
    }

    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// Assigns the local-to-world transform.
    ///
    /// Fails with `NotInvertible` (leaving the shape untouched) if the
    /// transform collapses space, e.g. a zero scale factor.
    pub fn set_transform(&mut self, transform: Matrix4) -> Result<()> {
        let inverse = transform.inverse()?;

        self.transform = transform;
        self.inverse = inverse;
        self.inverse_transpose = inverse.transpose();
        Ok(())
    }

    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    pub fn geometry(&self) -> &dyn Geometry {
        &*self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Converts a world-space point into this shape's local space.
    pub fn world_to_object(&self, point: Tuple) -> Tuple {
        self.inverse * point
    }

    /// Converts a local-space normal into world space.
    ///
    /// Normals go through the inverse-transpose of the transform rather than
    /// the transform itself; otherwise non-uniform scaling would tip them
    /// off the perpendicular. The translation row leaks into `w`, so `w` is
    /// reset before renormalizing.
    pub fn normal_to_world(&self, normal: Tuple) -> Tuple {
        let mut world_normal = self.inverse_transpose * normal;
        world_normal.w = 0.0;
        world_normal.normalize()
    }

    /// Intersects a world-space ray with this shape.
    ///
    /// The ray is carried into local space by the inverse transform and
    /// handed to the geometry. The resulting `t` values are valid along the
    /// original world ray too, since the local direction is left unnormalized.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let local_ray = ray.transform(&self.inverse);

        self.geometry.local_intersect(&local_ray)
            .into_iter()
            .map(|t| Intersection::new(t, self))
            .collect()
    }

    /// The world-space surface normal at a world-space point.
    pub fn normal_at(&self, world_point: Tuple) -> Tuple {
        let local_point = self.world_to_object(world_point);
        let local_normal = self.geometry.local_normal_at(&local_point);
        self.normal_to_world(local_normal)
    }
}

#[cfg(test)]
use std::sync::{ Arc, Mutex };

/// Records the local ray it was asked about, to check the world/local
/// conversion independently of any real surface.
#[cfg(test)]
#[derive(Debug, Default)]
struct RecordingGeometry {
    saved_ray: Arc<Mutex<Option<Ray>>>,
}

#[cfg(test)]
impl Geometry for RecordingGeometry {
    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        *self.saved_ray.lock().unwrap() = Some(*ray);
        Vec::new()
    }

    fn local_normal_at(&self, point: &Tuple) -> Tuple {
        Tuple::vector(point.x, point.y, point.z)
    }
}

#[test]
fn default_transform_is_identity() {
    let s = Shape::sphere();

    assert_eq!(*s.transform(), Matrix4::identity());
    assert_eq!(*s.material(), Material::default());
}

#[test]
fn singular_transform_is_rejected() {
    let mut s = Shape::sphere();
    s.set_transform(Matrix4::translation(2.0, 3.0, 4.0)).unwrap();

    assert!(s.set_transform(Matrix4::scaling(1.0, 0.0, 1.0)).is_err());
    assert_eq!(*s.transform(), Matrix4::translation(2.0, 3.0, 4.0));
}

#[test]
fn known_inverse_matches_computed_inverse() {
    let known = Shape::sphere()
        .with_known_inverse(Matrix4::scaling(0.5, 0.5, 0.5), Matrix4::scaling(2.0, 2.0, 2.0));
    let computed = Shape::sphere()
        .with_transform(Matrix4::scaling(0.5, 0.5, 0.5))
        .unwrap();

    assert_eq!(known.transform, computed.transform);
    assert_eq!(known.inverse, computed.inverse);
    assert_eq!(known.inverse_transpose, computed.inverse_transpose);
}

#[test]
fn scaled_shape_sees_local_ray() {
    let geometry = RecordingGeometry::default();
    let saved = Arc::clone(&geometry.saved_ray);
    let recorder = Shape::new(geometry)
        .with_transform(Matrix4::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert!(recorder.intersect(&r).is_empty());

    let local = saved.lock().unwrap().unwrap();
    assert_eq!(local.origin, Tuple::point(0.0, 0.0, -2.5));
    assert_eq!(local.direction, Tuple::vector(0.0, 0.0, 0.5));
}

#[test]
fn translated_shape_sees_local_ray() {
    let geometry = RecordingGeometry::default();
    let saved = Arc::clone(&geometry.saved_ray);
    let recorder = Shape::new(geometry)
        .with_transform(Matrix4::translation(5.0, 0.0, 0.0))
        .unwrap();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let _ = recorder.intersect(&r);

    let local = saved.lock().unwrap().unwrap();
    assert_eq!(local.origin, Tuple::point(-5.0, 0.0, -5.0));
    assert_eq!(local.direction, Tuple::vector(0.0, 0.0, 1.0));
}

#[test]
fn normal_on_translated_recording_shape() {
    let recorder = Shape::new(RecordingGeometry::default())
        .with_transform(Matrix4::translation(0.0, 1.0, 0.0))
        .unwrap();
    let n = recorder.normal_at(Tuple::point(0.0, 1.70711, -0.70711));

    assert_eq!(n, Tuple::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn ray_pierces_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = Shape::sphere().intersect(&r).into_ts();

    assert_eq!(xs, vec![4.0, 6.0]);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray::new(Tuple::point(0.0, 1.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = Shape::sphere().intersect(&r).into_ts();

    assert_eq!(xs, vec![5.0, 5.0]);
}

#[test]
fn ray_misses_sphere() {
    let r = Ray::new(Tuple::point(0.0, 2.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert!(Shape::sphere().intersect(&r).is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));
    let xs = Shape::sphere().intersect(&r).into_ts();

    assert_eq!(xs, vec![-1.0, 1.0]);
}

#[test]
fn sphere_is_behind_ray() {
    let r = Ray::new(Tuple::point(0.0, 0.0, 5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = Shape::sphere().intersect(&r).into_ts();

    assert_eq!(xs, vec![-6.0, -4.0]);
}

#[test]
fn intersections_reference_the_shape() {
    let s = Shape::sphere();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = s.intersect(&r);

    assert!(xs.iter().all(|i| std::ptr::eq(i.shape, &s)));
}

#[test]
fn ray_hits_scaled_sphere() {
    let s = Shape::sphere().with_transform(Matrix4::scaling(2.0, 2.0, 2.0)).unwrap();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r).into_ts(), vec![3.0, 7.0]);
}

#[test]
fn ray_misses_translated_sphere() {
    let s = Shape::sphere().with_transform(Matrix4::translation(5.0, 0.0, 0.0)).unwrap();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert!(s.intersect(&r).is_empty());
}

#[test]
fn normals_on_sphere() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;

    assert_eq!(s.normal_at(Tuple::point(1.0, 0.0, 0.0)), Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Tuple::point(0.0, 1.0, 0.0)), Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple::point(0.0, 0.0, 1.0)), Tuple::vector(0.0, 0.0, 1.0));
    assert_eq!(s.normal_at(Tuple::point(k, k, k)), Tuple::vector(k, k, k));
}

#[test]
fn sphere_normal_is_normalized() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Tuple::point(k, k, k));

    assert_eq!(n, n.normalize());
}

#[test]
fn normal_on_translated_sphere() {
    let s = Shape::sphere().with_transform(Matrix4::translation(0.0, 1.0, 0.0)).unwrap();
    let n = s.normal_at(Tuple::point(0.0, 1.70711, -0.70711));

    assert_eq!(n, Tuple::vector(0.0, 0.70711, -0.70711));
    assert!(n.is_vector());
}

#[test]
fn normal_on_transformed_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4::scaling(1.0, 0.5, 1.0)
            * Matrix4::rotation_z(std::f64::consts::PI / 5.0))
        .unwrap();
    let half = 2.0f64.sqrt() / 2.0;
    let n = s.normal_at(Tuple::point(0.0, half, -half));

    assert_eq!(n, Tuple::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_on_sheared_sphere_stays_a_unit_vector() {
    let s = Shape::sphere()
        .with_transform(Matrix4::translation(1.0, -2.0, 3.0)
            * Matrix4::shearing(1.0, 0.0, 0.5, 0.0, 0.0, 0.3))
        .unwrap();
    let world_point = *s.transform() * Tuple::point(0.0, 0.6, 0.8);
    let n = s.normal_at(world_point);

    assert!(n.is_vector());
    assert!(crate::consts::feq(n.magnitude(), 1.0));
}

#[test]
fn plane_normal_is_constant() {
    let p = Shape::plane();

    assert_eq!(p.normal_at(Tuple::point(0.0, 0.0, 0.0)), Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(p.normal_at(Tuple::point(10.0, 0.0, -10.0)), Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(p.normal_at(Tuple::point(-5.0, 0.0, 150.0)), Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane();
    let above = Ray::new(Tuple::point(0.0, 10.0, 0.0), Tuple::vector(0.0, 0.0, 1.0));
    let coplanar = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));

    assert!(p.intersect(&above).is_empty());
    assert!(p.intersect(&coplanar).is_empty());
}

#[test]
fn ray_intersecting_plane() {
    let p = Shape::plane();
    let from_above = Ray::new(Tuple::point(0.0, 1.0, 0.0), Tuple::vector(0.0, -1.0, 0.0));
    let from_below = Ray::new(Tuple::point(0.0, -1.0, 0.0), Tuple::vector(0.0, 1.0, 0.0));

    assert_eq!(p.intersect(&from_above).into_ts(), vec![1.0]);
    assert_eq!(p.intersect(&from_below).into_ts(), vec![1.0]);
}

#[test]
fn ray_intersects_cube() {
    let c = Shape::cube();
    let cases = [
        (Tuple::point( 5.0,  0.5,  0.0), Tuple::vector(-1.0,  0.0,  0.0),  4.0, 6.0),
        (Tuple::point(-5.0,  0.5,  0.0), Tuple::vector( 1.0,  0.0,  0.0),  4.0, 6.0),
        (Tuple::point( 0.5,  5.0,  0.0), Tuple::vector( 0.0, -1.0,  0.0),  4.0, 6.0),
        (Tuple::point( 0.5,  0.0, -5.0), Tuple::vector( 0.0,  0.0,  1.0),  4.0, 6.0),
        (Tuple::point( 0.0,  0.5,  0.0), Tuple::vector( 0.0,  0.0,  1.0), -1.0, 1.0),
    ];

    for (origin, direction, t1, t2) in cases.iter() {
        let xs = c.intersect(&Ray::new(*origin, *direction)).into_ts();
        assert_eq!(xs, vec![*t1, *t2]);
    }
}

#[test]
fn ray_misses_cube() {
    let c = Shape::cube();
    let r = Ray::new(Tuple::point(-2.0, 0.0, 0.0), Tuple::vector(0.2673, 0.5345, 0.8018));
    let parallel = Ray::new(Tuple::point(2.0, 0.0, 2.0), Tuple::vector(0.0, 0.0, -1.0));

    assert!(c.intersect(&r).is_empty());
    assert!(c.intersect(&parallel).is_empty());
}

#[test]
fn normals_on_cube() {
    let c = Shape::cube();

    assert_eq!(c.normal_at(Tuple::point(1.0, 0.5, -0.8)), Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(c.normal_at(Tuple::point(-0.4, 1.0, -0.1)), Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(c.normal_at(Tuple::point(0.3, 0.4, -1.0)), Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(c.normal_at(Tuple::point(1.0, 1.0, 1.0)), Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn ray_misses_cylinder() {
    let c = Shape::new(Cylinder::default());
    let rays = [
        Ray::new(Tuple::point(1.0, 0.0, 0.0), Tuple::vector(0.0, 1.0, 0.0)),
        Ray::new(Tuple::origin(), Tuple::vector(0.0, 1.0, 0.0)),
        Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(1.0, 1.0, 1.0).normalize()),
    ];

    for r in rays.iter() {
        assert!(c.intersect(r).is_empty());
    }
}

#[test]
fn ray_strikes_cylinder() {
    let c = Shape::new(Cylinder::default());
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(c.intersect(&r).into_ts(), vec![4.0, 6.0]);
}

#[test]
fn truncated_cylinder() {
    let c = Shape::cylinder(1.0, 2.0, false);
    let hits = |origin: Tuple, direction: Tuple|
        c.intersect(&Ray::new(origin, direction.normalize())).len();

    assert_eq!(hits(Tuple::point(0.0, 1.5, 0.0), Tuple::vector(0.1, 1.0, 0.0)), 0);
    assert_eq!(hits(Tuple::point(0.0, 3.0, -5.0), Tuple::vector(0.0, 0.0, 1.0)), 0);
    assert_eq!(hits(Tuple::point(0.0, 2.0, -5.0), Tuple::vector(0.0, 0.0, 1.0)), 0);
    assert_eq!(hits(Tuple::point(0.0, 1.0, -5.0), Tuple::vector(0.0, 0.0, 1.0)), 0);
    assert_eq!(hits(Tuple::point(0.0, 1.5, -2.0), Tuple::vector(0.0, 0.0, 1.0)), 2);
}

#[test]
fn capped_cylinder() {
    let c = Shape::cylinder(1.0, 2.0, true);
    let hits = |origin: Tuple, direction: Tuple|
        c.intersect(&Ray::new(origin, direction.normalize())).len();

    assert_eq!(hits(Tuple::point(0.0, 3.0, 0.0), Tuple::vector(0.0, -1.0, 0.0)), 2);
    assert_eq!(hits(Tuple::point(0.0, 3.0, -2.0), Tuple::vector(0.0, -1.0, 2.0)), 2);
    assert_eq!(hits(Tuple::point(0.0, 0.0, -2.0), Tuple::vector(0.0, 1.0, 2.0)), 2);
}

#[test]
fn normals_on_capped_cylinder() {
    let c = Shape::cylinder(1.0, 2.0, true);

    assert_eq!(c.normal_at(Tuple::point(0.0, 1.0, 0.0)), Tuple::vector(0.0, -1.0, 0.0));
    assert_eq!(c.normal_at(Tuple::point(0.5, 2.0, 0.0)), Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(c.normal_at(Tuple::point(1.0, 1.5, 0.0)), Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(c.normal_at(Tuple::point(0.0, 1.2, -1.0)), Tuple::vector(0.0, 0.0, -1.0));
}

#[cfg(test)]
fn assert_ts(actual: Vec<f64>, expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(crate::consts::feq(*a, *e), "{:?} vs {:?}", actual, expected);
    }
}

#[test]
fn heavily_scaled_cylinder_is_still_hit() {
    for (scale, hits) in [(400.0, [1600.0, 2400.0]), (1000.0, [1000.0, 3000.0])].iter() {
        let c = Shape::new(Cylinder::default())
            .with_transform(Matrix4::scaling(*scale, *scale, *scale))
            .unwrap();
        let r = Ray::new(Tuple::point(0.0, 0.0, -2000.0), Tuple::vector(0.0, 0.0, 1.0));

        assert_ts(c.intersect(&r).into_ts(), hits);
    }
}

#[test]
fn heavily_scaled_cylinder_caps_are_still_hit() {
    let c = Shape::cylinder(-1.0, 1.0, true)
        .with_transform(Matrix4::scaling(1e6, 1e6, 1e6))
        .unwrap();
    let r = Ray::new(Tuple::point(0.0, 5e6, 0.0), Tuple::vector(0.0, -1.0, 0.0));

    let mut xs = c.intersect(&r).into_ts();
    xs.sort_by(|a, b| a.total_cmp(b));
    assert_ts(xs, &[4e6, 6e6]);
}

#[test]
fn plane_stretched_along_its_normal_is_still_hit() {
    let p = Shape::plane()
        .with_transform(Matrix4::scaling(1.0, 1e6, 1.0))
        .unwrap();
    let r = Ray::new(Tuple::point(0.0, 1.0, 0.0), Tuple::vector(0.0, -1.0, 0.0));

    assert_ts(p.intersect(&r).into_ts(), &[1.0]);
}

#[test]
fn heavily_scaled_cube_is_still_hit() {
    let c = Shape::cube()
        .with_transform(Matrix4::scaling(1e6, 1e6, 1e6))
        .unwrap();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5e6), Tuple::vector(0.0, 0.0, 1.0));

    assert_ts(c.intersect(&r).into_ts(), &[4e6, 6e6]);
}
