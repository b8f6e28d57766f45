use crate::color::Color;
use crate::tuple::Tuple;
use crate::error::Result;

/// A point light.
///
/// Light radiates equally in every direction from `position`. There is no
/// falloff with distance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: Color, mut position: Tuple) -> PointLight {
        if !position.is_point() {
            position.w = 1.0;
        }

        PointLight { intensity, position }
    }
}

/// Surface attributes for the Phong reflection model.
///
/// All coefficients are plain scalars; nothing stops a caller from going
/// outside `[0, 1]`, and the lighting math does not care.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
        }
    }
}

impl Material {
    /// Shades `position` as seen along `eyev`, lit by `light`.
    ///
    /// Ambient light always applies. A point `in_shadow` gets nothing else;
    /// neither does a point whose surface faces away from the light. The
    /// specular highlight only shows when the light's reflection points
    /// somewhere toward the eye. The result is left unclamped.
    ///
    /// `eyev` and `normalv` must be vectors; a point there is reported as a
    /// `NotAVector` error from the reflection step.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_caster::color::Color;
    /// # use ray_caster::tuple::Tuple;
    /// # use ray_caster::light::{ Material, PointLight };
    /// let light = PointLight::new(Color::white(), Tuple::point(0.0, 0.0, -10.0));
    /// let eyev = Tuple::vector(0.0, 0.0, -1.0);
    /// let normalv = Tuple::vector(0.0, 0.0, -1.0);
    ///
    /// let c = Material::default()
    ///     .lighting(&light, Tuple::origin(), eyev, normalv, false)
    ///     .unwrap();
    /// assert_eq!(c, Color::rgb(1.9, 1.9, 1.9));
    /// ```
    pub fn lighting(&self, light: &PointLight, position: Tuple, eyev: Tuple,
        normalv: Tuple, in_shadow: bool) -> Result<Color> {
        let effective_color = self.color * light.intensity;
        let ambient = effective_color * self.ambient;

        if in_shadow {
            return Ok(ambient);
        }

        let lightv = (light.position - position).normalize();
        let light_dot_normal = lightv.dot(&normalv);

        // Light is behind the surface.
        if light_dot_normal < 0.0 {
            return Ok(ambient);
        }

        let diffuse = effective_color * self.diffuse * light_dot_normal;

        let reflectv = (-lightv).reflect(&normalv)?;
        let reflect_dot_eye = reflectv.dot(&eyev);

        let specular = if reflect_dot_eye <= 0.0 {
            Color::black()
        } else {
            let factor = reflect_dot_eye.powf(self.shininess);
            light.intensity * self.specular * factor
        };

        Ok(ambient + diffuse + specular)
    }
}

#[cfg(test)]
fn shade(eyev: Tuple, light_position: Tuple, in_shadow: bool) -> Color {
    let light = PointLight::new(Color::white(), light_position);
    let normalv = Tuple::vector(0.0, 0.0, -1.0);

    Material::default()
        .lighting(&light, Tuple::origin(), eyev, normalv, in_shadow)
        .unwrap()
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
}

#[test]
fn light_position_is_forced_to_a_point() {
    let light = PointLight::new(Color::white(), Tuple::vector(1.0, 2.0, 3.0));

    assert_eq!(light.position, Tuple::point(1.0, 2.0, 3.0));
    assert_eq!(light.intensity, Color::white());
}

#[test]
fn eye_between_light_and_surface() {
    let c = shade(Tuple::vector(0.0, 0.0, -1.0), Tuple::point(0.0, 0.0, -10.0), false);

    assert_eq!(c, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_offset_45() {
    let half = 2.0f64.sqrt() / 2.0;
    let c = shade(Tuple::vector(0.0, half, half), Tuple::point(0.0, 0.0, -10.0), false);

    assert_eq!(c, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn light_offset_45() {
    let c = shade(Tuple::vector(0.0, 0.0, -1.0), Tuple::point(0.0, 10.0, -10.0), false);

    assert_eq!(c, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let half = 2.0f64.sqrt() / 2.0;
    let c = shade(Tuple::vector(0.0, -half, -half), Tuple::point(0.0, 10.0, -10.0), false);

    assert_eq!(c, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let c = shade(Tuple::vector(0.0, 0.0, -1.0), Tuple::point(0.0, 0.0, 10.0), false);

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let c = shade(Tuple::vector(0.0, 0.0, -1.0), Tuple::point(0.0, 0.0, -10.0), true);

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn colored_light_and_surface() {
    let m = Material {
        color: Color::rgb(1.0, 0.5, 0.0),
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        ..Default::default()
    };
    let light = PointLight::new(Color::rgb(0.5, 1.0, 1.0), Tuple::point(0.0, 0.0, -10.0));
    let c = m.lighting(&light, Tuple::origin(),
        Tuple::vector(0.0, 0.0, -1.0), Tuple::vector(0.0, 0.0, -1.0), false).unwrap();

    assert_eq!(c, Color::rgb(0.5, 0.5, 0.0));
}

#[test]
fn point_as_normal_is_rejected() {
    let light = PointLight::new(Color::white(), Tuple::point(0.0, 0.0, -10.0));
    let res = Material::default().lighting(&light, Tuple::origin(),
        Tuple::vector(0.0, 0.0, -1.0), Tuple::point(0.0, 0.0, -1.0), false);

    assert!(res.is_err());
}
