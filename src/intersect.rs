use std::iter::FromIterator;
use std::ops::Index;

use crate::consts::SHADOW_BIAS;
use crate::tuple::Tuple;
use crate::ray::Ray;
use crate::shape::Shape;

/// An intersection.
///
/// Some ray crossed `shape` at offset `t` along its direction. The shape is
/// borrowed, so intersections never outlive the world they were found in.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub shape: &'a Shape,
}

/// Two intersections are equal when their offsets agree within epsilon and
/// they refer to the very same shape (pointer identity, not structural).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        crate::consts::feq(self.t, other.t) && std::ptr::eq(self.shape, other.shape)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, shape: &'a Shape) -> Intersection<'a> {
        Intersection { t, shape }
    }
}

/// A collection of intersections for one ray.
///
/// Order is whatever the producer left it in; `World::intersect` sorts it,
/// `Shape::intersect` does not. `hit` works either way.
///
/// # Examples
///
/// ```
/// # use ray_caster::shape::Shape;
/// # use ray_caster::intersect::{ Intersection, Intersections };
/// let s = Shape::sphere();
/// let xs: Intersections = vec![
///     Intersection::new(5.0, &s),
///     Intersection::new(-3.0, &s),
///     Intersection::new(2.0, &s),
/// ].into_iter().collect();
///
/// assert_eq!(xs.hit().unwrap().t, 2.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn push(&mut self, i: Intersection<'a>) {
        self.intersections.push(i);
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection<'a>> {
        self.intersections.iter()
    }

    /// Just the offsets, in collection order.
    pub fn into_ts(self) -> Vec<f64> {
        self.intersections.into_iter().map(|i| i.t).collect()
    }

    /// Sorts by ascending `t`. The sort is stable, so equal offsets keep their
    /// relative order.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }

    /// The visible intersection: the one with the smallest non-negative `t`.
    ///
    /// Intersections behind the ray origin (negative `t`) are never chosen,
    /// nor are non-finite ones. When several share the smallest `t`, the one
    /// that comes first in the collection wins. The collection need not be
    /// sorted and is left untouched.
    pub fn hit(&self) -> Option<Intersection<'a>> {
        self.intersections.iter()
            .filter(|i| i.t.is_finite() && i.t >= 0.0)
            .fold(None, |best: Option<&Intersection<'a>>, i| match best {
                Some(b) if b.t <= i.t => Some(b),
                _ => Some(i),
            })
            .copied()
    }
}

impl<'a> Index<usize> for Intersections<'a> {
    type Output = Intersection<'a>;

    fn index(&self, index: usize) -> &Intersection<'a> {
        &self.intersections[index]
    }
}

impl<'a> FromIterator<Intersection<'a>> for Intersections<'a> {
    fn from_iter<I: IntoIterator<Item = Intersection<'a>>>(iter: I) -> Self {
        Intersections { intersections: iter.into_iter().collect() }
    }
}

impl<'a> Extend<Intersection<'a>> for Intersections<'a> {
    fn extend<I: IntoIterator<Item = Intersection<'a>>>(&mut self, iter: I) {
        self.intersections.extend(iter);
    }
}

impl<'a> IntoIterator for Intersections<'a> {
    type Item = Intersection<'a>;
    type IntoIter = std::vec::IntoIter<Intersection<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intersections.into_iter()
    }
}

/// Everything shading needs to know about a hit, computed once.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// Offset of the hit along the ray.
    pub t: f64,

    /// The shape that was hit.
    pub shape: &'a Shape,

    /// The world-space point where the hit occurs.
    pub point: Tuple,

    /// `point` nudged a hair along the normal. Shadow rays start here, so a
    /// surface never shadows itself through rounding error ("acne").
    pub over_point: Tuple,

    /// Direction back toward the eye.
    pub eyev: Tuple,

    /// Surface normal at `point`, facing the eye.
    pub normalv: Tuple,

    /// Whether the ray started inside the shape. The normal has been flipped
    /// if so.
    pub inside: bool,
}

impl<'a> IntersectionComputation<'a> {
    pub fn new(ray: &Ray, hit: &Intersection<'a>) -> IntersectionComputation<'a> {
        let t = hit.t;
        let shape = hit.shape;
        let point = ray.position(t);
        let eyev = -ray.direction;
        let mut normalv = shape.normal_at(point);

        let inside = normalv.dot(&eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }

        let over_point = point + normalv * SHADOW_BIAS;

        IntersectionComputation {
            t, shape,
            point, over_point,
            eyev, normalv,
            inside,
        }
    }
}

#[test]
fn intersection_fields() {
    let s = Shape::sphere();
    let i = Intersection::new(3.5, &s);

    assert_eq!(i.t, 3.5);
    assert!(std::ptr::eq(i.shape, &s));
}

#[test]
fn intersections_compare_by_identity() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();

    assert_eq!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s1));
    assert_ne!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s2));
}

#[test]
fn hit_all_positive() {
    let s = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i2, i1].into_iter().collect();

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_some_negative() {
    let s = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let xs: Intersections = vec![i2, i1].into_iter().collect();

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_all_negative() {
    let s = Shape::sphere();
    let xs: Intersections = vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ].into_iter().collect();

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative_in_any_order() {
    let s = Shape::sphere();
    let i1 = Intersection::new(5.0, &s);
    let i2 = Intersection::new(7.0, &s);
    let i3 = Intersection::new(-3.0, &s);
    let i4 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i1, i2, i3, i4].into_iter().collect();

    assert_eq!(xs.hit(), Some(i4));
    assert_eq!(xs.len(), 4);
    assert_eq!(xs[0], i1);
}

#[test]
fn hit_at_zero_is_visible() {
    let s = Shape::sphere();
    let xs: Intersections = vec![
        Intersection::new(0.5, &s),
        Intersection::new(0.0, &s),
    ].into_iter().collect();

    assert_eq!(xs.hit().unwrap().t, 0.0);
}

#[test]
fn hit_tie_goes_to_first() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();
    let xs: Intersections = vec![
        Intersection::new(3.0, &s1),
        Intersection::new(1.0, &s2),
        Intersection::new(1.0, &s1),
    ].into_iter().collect();

    assert!(std::ptr::eq(xs.hit().unwrap().shape, &s2));
}

#[test]
fn hit_skips_non_finite() {
    let s = Shape::sphere();
    let xs: Intersections = vec![
        Intersection::new(f64::NAN, &s),
        Intersection::new(f64::INFINITY, &s),
        Intersection::new(4.0, &s),
    ].into_iter().collect();

    assert_eq!(xs.hit().unwrap().t, 4.0);
}

#[test]
fn sort_is_ascending_and_stable() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();
    let mut xs: Intersections = vec![
        Intersection::new(6.0, &s1),
        Intersection::new(-1.0, &s1),
        Intersection::new(2.0, &s2),
        Intersection::new(2.0, &s1),
    ].into_iter().collect();
    xs.sort();

    assert_eq!(xs.iter().map(|i| i.t).collect::<Vec<_>>(), vec![-1.0, 2.0, 2.0, 6.0]);
    assert!(std::ptr::eq(xs[1].shape, &s2));
}

#[test]
fn precompute_outside_hit() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);
    let comps = IntersectionComputation::new(&r, &i);

    assert_eq!(comps.t, 4.0);
    assert_eq!(comps.point, Tuple::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_hit() {
    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere();
    let i = Intersection::new(1.0, &s);
    let comps = IntersectionComputation::new(&r, &i);

    assert_eq!(comps.point, Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
}

#[test]
fn over_point_sits_above_surface() {
    use crate::matrix::Matrix4;

    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere().with_transform(Matrix4::translation(0.0, 0.0, 1.0)).unwrap();
    let i = Intersection::new(5.0, &s);
    let comps = IntersectionComputation::new(&r, &i);

    assert!(comps.over_point.z < -SHADOW_BIAS / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}
