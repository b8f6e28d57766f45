use crate::ray::Ray;
use crate::tuple::Tuple;
use crate::color::Color;
use crate::matrix::Matrix4;
use crate::error::Result;
use crate::light::{ PointLight, Material };
use crate::shape::Shape;
use crate::intersect::{ Intersections, IntersectionComputation };

/// A world with objects and light.
///
/// The world owns its shapes outright. During a render it is only ever read,
/// so one `&World` can be shared by every render thread.
#[derive(Debug)]
pub struct World {
    pub objects: Vec<Shape>,
    pub light: PointLight,
}

impl Default for World {
    /// The standard two-sphere test world: a greenish unit sphere with a
    /// smaller white sphere nested inside it, lit from the upper left.
    fn default() -> World {
        let outer = Shape::sphere().with_material(Material {
            color: Color::rgb(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });

        let inner = Shape::sphere().with_known_inverse(
            Matrix4::scaling(0.5, 0.5, 0.5),
            Matrix4::scaling(2.0, 2.0, 2.0),
        );

        World {
            objects: vec![outer, inner],
            light: Self::default_light(),
        }
    }
}

impl World {
    pub fn new(light: PointLight) -> World {
        World { objects: Vec::new(), light }
    }

    /// A world with no objects and the default light.
    pub fn empty() -> World {
        World::new(Self::default_light())
    }

    fn default_light() -> PointLight {
        PointLight::new(Color::white(), Tuple::point(-10.0, 10.0, -10.0))
    }

    pub fn add(&mut self, shape: Shape) {
        self.objects.push(shape);
    }

    /// Intersects a ray against every object, sorted by ascending `t`.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let mut intersections = Intersections::new();
        for obj in self.objects.iter() {
            intersections.extend(obj.intersect(ray));
        }

        intersections.sort();
        intersections
    }

    /// Whether some surface lies strictly between `point` and the light.
    pub fn is_shadowed(&self, point: Tuple) -> bool {
        let v = self.light.position - point;
        let distance = v.magnitude();
        let r = Ray::new(point, v.normalize());

        match self.intersect(&r).hit() {
            Some(i) => i.t > 0.0 && i.t < distance,
            None => false,
        }
    }

    /// Shades a precomputed hit, including the shadow test.
    pub fn shade_hit(&self, comps: &IntersectionComputation) -> Result<Color> {
        let shadowed = self.is_shadowed(comps.over_point);

        comps.shape.material.lighting(&self.light,
            comps.point, comps.eyev, comps.normalv, shadowed)
    }

    /// The color seen along `ray`; black if it hits nothing.
    pub fn color_at(&self, ray: &Ray) -> Result<Color> {
        match self.intersect(ray).hit() {
            None => Ok(Color::black()),
            Some(i) => {
                let comps = IntersectionComputation::new(ray, &i);
                self.shade_hit(&comps)
            },
        }
    }
}

#[test]
fn empty_world() {
    let w = World::empty();

    assert!(w.objects.is_empty());
    assert_eq!(w.light, World::default().light);
}

#[test]
fn default_world() {
    let w = World::default();

    assert_eq!(w.light.position, Tuple::point(-10.0, 10.0, -10.0));
    assert_eq!(w.light.intensity, Color::white());
    assert_eq!(w.objects.len(), 2);
    assert_eq!(w.objects[0].material.color, Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(*w.objects[1].transform(), Matrix4::scaling(0.5, 0.5, 0.5));

    let from_center = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));
    assert_eq!(w.objects[1].intersect(&from_center).into_ts(), vec![-0.5, 0.5]);
}

#[test]
fn intersect_default_world() {
    let w = World::default();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(w.intersect(&r).into_ts(), vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shade_intersection() {
    use crate::intersect::Intersection;

    let w = World::default();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, &w.objects[0]);
    let comps = IntersectionComputation::new(&r, &i);

    assert_eq!(w.shade_hit(&comps).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    use crate::intersect::Intersection;

    let mut w = World::default();
    w.light = PointLight::new(Color::white(), Tuple::point(0.0, 0.25, 0.0));
    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(0.5, &w.objects[1]);
    let comps = IntersectionComputation::new(&r, &i);

    assert_eq!(w.shade_hit(&comps).unwrap(), Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    use crate::intersect::Intersection;

    let mut w = World::new(PointLight::new(Color::white(), Tuple::point(0.0, 0.0, -10.0)));
    w.add(Shape::sphere());
    w.add(Shape::sphere().with_transform(Matrix4::translation(0.0, 0.0, 10.0)).unwrap());

    let r = Ray::new(Tuple::point(0.0, 0.0, 5.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, &w.objects[1]);
    let comps = IntersectionComputation::new(&r, &i);

    assert_eq!(w.shade_hit(&comps).unwrap(), Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn color_when_ray_misses() {
    let w = World::default();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&r).unwrap(), Color::black());
}

#[test]
fn color_when_ray_hits() {
    let w = World::default();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(w.color_at(&r).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_with_intersection_behind_ray() {
    let mut w = World::default();
    w.objects[0].material.ambient = 1.0;
    w.objects[1].material.ambient = 1.0;
    let inner_color = w.objects[1].material.color;

    let r = Ray::new(Tuple::point(0.0, 0.0, 0.75), Tuple::vector(0.0, 0.0, -1.0));

    assert_eq!(w.color_at(&r).unwrap(), inner_color);
}

#[test]
fn empty_world_is_black() {
    let w = World::empty();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(w.color_at(&r).unwrap(), Color::black());
}

#[test]
fn no_shadow_when_nothing_is_collinear() {
    let w = World::default();

    assert!(!w.is_shadowed(Tuple::point(0.0, 10.0, 0.0)));
}

#[test]
fn shadow_when_object_between_point_and_light() {
    let w = World::default();

    assert!(w.is_shadowed(Tuple::point(10.0, -10.0, 10.0)));
}

#[test]
fn no_shadow_when_object_behind_light() {
    let w = World::default();

    assert!(!w.is_shadowed(Tuple::point(-20.0, 20.0, -20.0)));
}

#[test]
fn no_shadow_when_object_behind_point() {
    let w = World::default();

    assert!(!w.is_shadowed(Tuple::point(-2.0, 2.0, -2.0)));
}

#[test]
fn plane_casts_shadow_on_sphere_below() {
    let mut w = World::new(PointLight::new(Color::white(), Tuple::point(0.0, 10.0, 0.0)));
    w.add(Shape::plane().with_transform(Matrix4::translation(0.0, 5.0, 0.0)).unwrap());
    w.add(Shape::sphere());

    assert!(w.is_shadowed(Tuple::point(0.0, 1.0, 0.0)));
    assert!(!w.is_shadowed(Tuple::point(0.0, 6.0, 0.0)));
}
