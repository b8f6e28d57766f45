use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{ debug, info };
use serde::{ Serialize, Deserialize };

use crate::tuple::Tuple;
use crate::color::Color;
use crate::matrix::Matrix4;
use crate::light::{ PointLight, Material };
use crate::shape::{ Shape, Sphere, Plane, Cube, Cylinder };
use crate::world::World;
use crate::camera::Camera;
use crate::error::{ RayCasterError, Result };

/// Everything needed to render: a populated world and a camera to view it.
#[derive(Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Reads and builds a scene from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        Scene::try_from(SceneDescription::from_file(path)?)
    }
}

/// A scene as written in a JSON file.
///
/// ```json
/// {
///   "camera": { "width": 100, "height": 50, "field_of_view": 1.047,
///               "from": [0, 1.5, -5], "to": [0, 1, 0], "up": [0, 1, 0] },
///   "light":  { "position": [-10, 10, -10], "intensity": [1, 1, 1] },
///   "shapes": [
///     { "type": "sphere",
///       "transform": [ { "scale": [2, 2, 2] }, { "translate": [0, 1, 0] } ],
///       "material": { "color": [1, 0.2, 1], "diffuse": 0.7 } }
///   ]
/// }
/// ```
///
/// Transforms are listed in the order they apply to the shape: above, the
/// sphere is scaled first and then moved up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    pub light: LightDescription,

    #[serde(default)]
    pub shapes: Vec<ShapeDescription>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub width: usize,
    pub height: usize,

    /// In radians.
    pub field_of_view: f64,

    pub from: [f64; 3],
    pub to: [f64; 3],
    pub up: [f64; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub position: [f64; 3],

    #[serde(default = "white")]
    pub intensity: [f64; 3],
}

fn white() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescription {
    #[serde(flatten)]
    pub geometry: GeometryDescription,

    #[serde(default)]
    pub transform: Vec<TransformDescription>,

    #[serde(default)]
    pub material: MaterialDescription,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryDescription {
    Sphere,
    Plane,
    Cube,
    Cylinder {
        minimum: Option<f64>,
        maximum: Option<f64>,

        #[serde(default)]
        closed: bool,
    },
}

/// One step of a shape's transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformDescription {
    Translate([f64; 3]),
    Scale([f64; 3]),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),

    /// `[xy, xz, yx, yz, zx, zy]`
    Shear([f64; 6]),
}

/// Material overrides. Missing fields keep `Material::default()` values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    pub color: Option<[f64; 3]>,
    pub ambient: Option<f64>,
    pub diffuse: Option<f64>,
    pub specular: Option<f64>,
    pub shininess: Option<f64>,
}

impl SceneDescription {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SceneDescription> {
        let path = path.as_ref();
        info!("Loading scene from {}", path.display());

        fs::read_to_string(path)?.parse()
    }

    /// Pretty-printed JSON that `from_str` reads back to an equal description.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromStr for SceneDescription {
    type Err = RayCasterError;

    fn from_str(s: &str) -> Result<SceneDescription> {
        Ok(serde_json::from_str(s)?)
    }
}

fn point(p: [f64; 3]) -> Tuple {
    Tuple::point(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Tuple {
    Tuple::vector(v[0], v[1], v[2])
}

impl TransformDescription {
    pub fn matrix(&self) -> Matrix4 {
        match *self {
            TransformDescription::Translate([x, y, z]) => Matrix4::translation(x, y, z),
            TransformDescription::Scale([x, y, z]) => Matrix4::scaling(x, y, z),
            TransformDescription::RotateX(r) => Matrix4::rotation_x(r),
            TransformDescription::RotateY(r) => Matrix4::rotation_y(r),
            TransformDescription::RotateZ(r) => Matrix4::rotation_z(r),
            TransformDescription::Shear([xy, xz, yx, yz, zx, zy]) =>
                Matrix4::shearing(xy, xz, yx, yz, zx, zy),
        }
    }
}

/// Composes a list of transforms given in application order. Each later step
/// multiplies on the left, so the first entry ends up rightmost.
pub fn compose(steps: &[TransformDescription]) -> Matrix4 {
    steps.iter().fold(Matrix4::identity(), |acc, step| step.matrix() * acc)
}

impl From<&MaterialDescription> for Material {
    fn from(desc: &MaterialDescription) -> Material {
        let default = Material::default();

        Material {
            color: desc.color.map(Color::from).unwrap_or(default.color),
            ambient: desc.ambient.unwrap_or(default.ambient),
            diffuse: desc.diffuse.unwrap_or(default.diffuse),
            specular: desc.specular.unwrap_or(default.specular),
            shininess: desc.shininess.unwrap_or(default.shininess),
        }
    }
}

impl From<&LightDescription> for PointLight {
    fn from(desc: &LightDescription) -> PointLight {
        PointLight::new(Color::from(desc.intensity), point(desc.position))
    }
}

impl TryFrom<&CameraDescription> for Camera {
    type Error = RayCasterError;

    fn try_from(desc: &CameraDescription) -> Result<Camera> {
        if !(desc.field_of_view > 0.0 && desc.field_of_view < PI) {
            return Err(RayCasterError::Scene(format!(
                "field of view must be between 0 and pi radians, got {}",
                desc.field_of_view
            )));
        }

        if point(desc.from) == point(desc.to) {
            return Err(RayCasterError::Scene("camera looks at its own position".to_string()));
        }

        let view = Matrix4::view_transform(point(desc.from), point(desc.to), vector(desc.up))?;
        Camera::new(desc.width, desc.height, desc.field_of_view, view)
    }
}

impl TryFrom<&ShapeDescription> for Shape {
    type Error = RayCasterError;

    fn try_from(desc: &ShapeDescription) -> Result<Shape> {
        let shape = match desc.geometry {
            GeometryDescription::Sphere => Shape::new(Sphere),
            GeometryDescription::Plane => Shape::new(Plane),
            GeometryDescription::Cube => Shape::new(Cube),
            GeometryDescription::Cylinder { minimum, maximum, closed } => {
                let infinite = Cylinder::default();
                let minimum = minimum.unwrap_or(infinite.minimum);
                let maximum = maximum.unwrap_or(infinite.maximum);

                if minimum > maximum {
                    return Err(RayCasterError::Scene(format!(
                        "cylinder minimum {} is above its maximum {}", minimum, maximum
                    )));
                }

                Shape::new(Cylinder::new(minimum, maximum, closed))
            },
        };

        shape.with_material((&desc.material).into())
            .with_transform(compose(&desc.transform))
            .map_err(|e| RayCasterError::Scene(format!("{:?}: {}", desc.geometry, e)))
    }
}

impl TryFrom<SceneDescription> for Scene {
    type Error = RayCasterError;

    fn try_from(desc: SceneDescription) -> Result<Scene> {
        let camera = Camera::try_from(&desc.camera)?;

        let mut world = World::new((&desc.light).into());
        for shape in desc.shapes.iter() {
            debug!("Adding {:?} with {} transform steps", shape.geometry, shape.transform.len());
            world.add(Shape::try_from(shape)?);
        }

        info!("Scene has {} shapes, light at {}", world.objects.len(), world.light.position);
        Ok(Scene { world, camera })
    }
}

#[cfg(test)]
const SAMPLE: &str = r#"{
    "camera": { "width": 100, "height": 50, "field_of_view": 1.0471975512,
                "from": [0, 1.5, -5], "to": [0, 1, 0], "up": [0, 1, 0] },
    "light":  { "position": [-10, 10, -10], "intensity": [1, 1, 1] },
    "shapes": [
        { "type": "plane", "material": { "color": [1, 0.9, 0.9], "specular": 0 } },
        { "type": "sphere",
          "transform": [ { "scale": [2, 2, 2] }, { "translate": [0, 1, 0] } ],
          "material": { "color": [1, 0.2, 1], "diffuse": 0.7 } },
        { "type": "cylinder", "minimum": 0, "maximum": 1, "closed": true },
        { "type": "cube", "transform": [ { "rotate_y": 0.5 } ] }
    ]
}"#;

#[test]
fn parse_sample_scene() {
    let desc: SceneDescription = SAMPLE.parse().unwrap();

    assert_eq!(desc.camera.width, 100);
    assert_eq!(desc.shapes.len(), 4);
    assert_eq!(desc.shapes[0].geometry, GeometryDescription::Plane);
    assert_eq!(desc.shapes[2].geometry, GeometryDescription::Cylinder {
        minimum: Some(0.0), maximum: Some(1.0), closed: true,
    });
    assert_eq!(desc.shapes[3].transform, vec![TransformDescription::RotateY(0.5)]);
}

#[test]
fn sample_scene_survives_json_round_trip() {
    let desc: SceneDescription = SAMPLE.parse().unwrap();
    let json = desc.to_json().unwrap();
    let back: SceneDescription = json.parse().unwrap();

    assert_eq!(back, desc);
    assert_eq!(back.shapes[1].material.diffuse, Some(0.7));
    assert!(json.contains("\"type\": \"cylinder\""));
}

#[test]
fn build_sample_scene() {
    let scene = Scene::try_from(SAMPLE.parse::<SceneDescription>().unwrap()).unwrap();

    assert_eq!(scene.camera.hsize(), 100);
    assert_eq!(scene.camera.vsize(), 50);
    assert_eq!(scene.world.objects.len(), 4);
    assert_eq!(scene.world.light.position, Tuple::point(-10.0, 10.0, -10.0));
}

#[test]
fn transforms_apply_in_listed_order() {
    let scene = Scene::try_from(SAMPLE.parse::<SceneDescription>().unwrap()).unwrap();
    let sphere = &scene.world.objects[1];

    assert_eq!(*sphere.transform(),
        Matrix4::translation(0.0, 1.0, 0.0) * Matrix4::scaling(2.0, 2.0, 2.0));
    assert_eq!(*sphere.transform() * Tuple::point(0.0, 1.0, 0.0), Tuple::point(0.0, 3.0, 0.0));
}

#[test]
fn material_fields_default() {
    let scene = Scene::try_from(SAMPLE.parse::<SceneDescription>().unwrap()).unwrap();
    let sphere = &scene.world.objects[1].material;
    let cube = &scene.world.objects[3].material;

    assert_eq!(sphere.color, Color::rgb(1.0, 0.2, 1.0));
    assert_eq!(sphere.diffuse, 0.7);
    assert_eq!(sphere.ambient, 0.1);
    assert_eq!(*cube, Material::default());
}

#[test]
fn unknown_shape_type_is_rejected() {
    let json = r#"{
        "camera": { "width": 10, "height": 10, "field_of_view": 1.0,
                    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light": { "position": [0, 10, 0] },
        "shapes": [ { "type": "torus" } ]
    }"#;

    assert!(matches!(json.parse::<SceneDescription>(), Err(RayCasterError::Json(_))));
}

#[test]
fn bad_field_of_view_is_rejected() {
    let mut desc: SceneDescription = SAMPLE.parse().unwrap();
    desc.camera.field_of_view = 4.0;

    assert!(matches!(Scene::try_from(desc), Err(RayCasterError::Scene(_))));
}

#[test]
fn degenerate_transform_is_rejected() {
    let mut desc: SceneDescription = SAMPLE.parse().unwrap();
    desc.shapes[0].transform.push(TransformDescription::Scale([1.0, 0.0, 1.0]));

    assert!(matches!(Scene::try_from(desc), Err(RayCasterError::Scene(_))));
}

#[test]
fn light_intensity_defaults_to_white() {
    let json = r#"{
        "camera": { "width": 10, "height": 10, "field_of_view": 1.0,
                    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light": { "position": [0, 10, 0] }
    }"#;
    let scene = Scene::try_from(json.parse::<SceneDescription>().unwrap()).unwrap();

    assert!(scene.world.objects.is_empty());
    assert_eq!(scene.world.light.intensity, Color::white());
}

#[test]
fn shipped_scenes_build() {
    for json in [include_str!("../scenes/hand.json"), include_str!("../scenes/shapes.json")].iter() {
        let scene = Scene::try_from(json.parse::<SceneDescription>().unwrap()).unwrap();
        assert!(!scene.world.objects.is_empty());
    }
}
