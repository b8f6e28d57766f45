use std::time::Instant;

use log::info;
use rayon::prelude::*;

use crate::ray::Ray;
use crate::tuple::Tuple;
use crate::matrix::Matrix4;
use crate::world::World;
use crate::canvas::Canvas;
use crate::error::{ RayCasterError, Result };

/// A pinhole camera.
///
/// The camera sits at the origin looking down -z, with a view plane one unit
/// in front of it. `transform` (usually a view transformation) orients the
/// world relative to that setup; its inverse is taken once, at construction,
/// and used for every ray.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    hsize: usize,

    /// The vertical size of the resultant canvas.
    vsize: usize,

    /// The angle describing "how much" the camera can see, in radians.
    field_of_view: f64,

    transform: Matrix4,
    inverse: Matrix4,

    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    /// Creates a camera rendering `hsize` by `vsize` pixels.
    ///
    /// Fails if either dimension is zero, or if `transform` cannot be
    /// inverted.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64,
        transform: Matrix4) -> Result<Camera> {
        if hsize == 0 || vsize == 0 {
            return Err(RayCasterError::EmptyImage { width: hsize, height: vsize });
        }

        let inverse = transform.inverse()?;

        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let pixel_size = half_width * 2.0 / (hsize as f64);

        Ok(Camera {
            hsize,
            vsize,
            field_of_view,
            transform,
            inverse,
            half_width,
            half_height,
            pixel_size,
        })
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    /// World-space size of one pixel on the view plane.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// The ray from the camera through the center of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The camera looks toward -z, so +x is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Tuple::point(world_x, world_y, -1.0);
        let origin = self.inverse * Tuple::origin();
        let direction = (pixel - origin).normalize();

        Ray::new(origin, direction)
    }

    /// Renders `world` one pixel at a time, row by row.
    pub fn render(&self, world: &World) -> Result<Canvas> {
        let start = Instant::now();
        info!("Rendering {}x{} sequentially", self.hsize, self.vsize);

        let mut image = Canvas::new(self.hsize, self.vsize);
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let color = world.color_at(&self.ray_for_pixel(x, y))?;
                image.write_pixel(x, y, color)?;
            }
        }

        self.log_timing(start);
        Ok(image)
    }

    /// Renders `world` with rows spread over the rayon thread pool.
    ///
    /// Each worker owns a disjoint row of the canvas, so nothing is locked.
    /// The result is identical to `render`.
    pub fn render_parallel(&self, world: &World) -> Result<Canvas> {
        let start = Instant::now();
        info!("Rendering {}x{} on {} threads", self.hsize, self.vsize,
            rayon::current_num_threads());

        let mut image = Canvas::new(self.hsize, self.vsize);
        image.pixels_mut()
            .par_chunks_mut(self.hsize)
            .enumerate()
            .try_for_each(|(y, row)| -> Result<()> {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = world.color_at(&self.ray_for_pixel(x, y))?;
                }
                Ok(())
            })?;

        self.log_timing(start);
        Ok(image)
    }

    fn log_timing(&self, start: Instant) {
        let elapsed = start.elapsed();
        let pixels = (self.hsize * self.vsize) as f64;

        info!("Render finished in {:.2?} ({:.3} us per pixel)",
            elapsed, elapsed.as_secs_f64() * 1e6 / pixels);
    }
}

#[cfg(test)]
use std::f64::consts::PI;

#[test]
fn pixel_size_horizontal_canvas() {
    let c = Camera::new(200, 125, PI / 2.0, Matrix4::identity()).unwrap();

    assert!(crate::consts::feq(c.pixel_size(), 0.01));
}

#[test]
fn pixel_size_vertical_canvas() {
    let c = Camera::new(125, 200, PI / 2.0, Matrix4::identity()).unwrap();

    assert!(crate::consts::feq(c.pixel_size(), 0.01));
}

#[test]
fn degenerate_cameras_are_rejected() {
    assert!(matches!(
        Camera::new(0, 10, PI / 2.0, Matrix4::identity()),
        Err(RayCasterError::EmptyImage { width: 0, height: 10 })
    ));
    assert!(matches!(
        Camera::new(10, 10, PI / 2.0, Matrix4::scaling(0.0, 1.0, 1.0)),
        Err(RayCasterError::NotInvertible)
    ));
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, PI / 2.0, Matrix4::identity()).unwrap();
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple::origin());
    assert_eq!(r.direction, Tuple::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, PI / 2.0, Matrix4::identity()).unwrap();
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Tuple::origin());
    assert_eq!(r.direction, Tuple::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, PI / 2.0,
        Matrix4::rotation_y(PI / 4.0) * Matrix4::translation(0.0, -2.0, 5.0))
        .unwrap();
    let r = c.ray_for_pixel(100, 50);
    let half = 2.0f64.sqrt() / 2.0;

    assert_eq!(r.origin, Tuple::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction, Tuple::vector(half, 0.0, -half));
}

#[cfg(test)]
fn looking_at_default_world(size: usize) -> Camera {
    let view = Matrix4::view_transform(
        Tuple::point(0.0, 0.0, -5.0),
        Tuple::origin(),
        Tuple::vector(0.0, 1.0, 0.0),
    ).unwrap();

    Camera::new(size, size, PI / 2.0, view).unwrap()
}

#[test]
fn render_default_world() {
    use crate::color::Color;

    let w = World::default();
    let image = looking_at_default_world(11).render(&w).unwrap();

    assert_eq!(image.read_pixel(5, 5).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn render_tiny_default_world() {
    use crate::color::Color;

    let w = World::default();
    let image = looking_at_default_world(5).render(&w).unwrap();

    assert_eq!(image.width(), 5);
    assert_eq!(image.height(), 5);
    assert_eq!(image.read_pixel(2, 2).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
    assert_eq!(image.read_pixel(0, 0).unwrap(), Color::black());
}

#[test]
fn parallel_render_matches_sequential() {
    let w = World::default();
    let c = Camera::new(16, 9, PI / 3.0, Matrix4::view_transform(
        Tuple::point(1.0, 1.5, -4.0),
        Tuple::origin(),
        Tuple::vector(0.0, 1.0, 0.0),
    ).unwrap()).unwrap();

    assert_eq!(c.render_parallel(&w).unwrap(), c.render(&w).unwrap());
}
