use std::f64::consts::PI;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ ArgEnum, Parser };
use log::{ info, LevelFilter };

use ray_caster::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, OUT_FILE };
use ray_caster::tuple::Tuple;
use ray_caster::color::Color;
use ray_caster::matrix::Matrix4;
use ray_caster::light::{ PointLight, Material };
use ray_caster::shape::Shape;
use ray_caster::world::World;
use ray_caster::camera::Camera;
use ray_caster::scene::{ Scene, SceneDescription };

#[derive(ArgEnum, Clone, Copy, Debug)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> LevelFilter {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Renders a scene of spheres, planes, cubes and cylinders to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// JSON scene description; renders a built-in demo scene when absent
    #[clap(short, long)]
    scene: Option<PathBuf>,

    /// Where to write the PPM image
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Image width in pixels, overriding the scene
    #[clap(long)]
    width: Option<usize>,

    /// Image height in pixels, overriding the scene
    #[clap(long)]
    height: Option<usize>,

    /// Size of the render thread pool (defaults to one per core)
    #[clap(short, long)]
    threads: Option<usize>,

    /// Render on the calling thread only
    #[clap(long)]
    sequential: bool,

    /// Log level; RUST_LOG takes precedence when set
    #[clap(long, arg_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the render thread pool")?;
    }

    let scene = match &args.scene {
        Some(path) => {
            let mut desc = SceneDescription::from_file(path)
                .with_context(|| format!("failed to read scene {}", path.display()))?;
            if let Some(width) = args.width {
                desc.camera.width = width;
            }
            if let Some(height) = args.height {
                desc.camera.height = height;
            }

            Scene::try_from(desc)
                .with_context(|| format!("invalid scene {}", path.display()))?
        },
        None => {
            info!("No scene given, rendering the demo scene");
            demo_scene(
                args.width.unwrap_or(CANVAS_WIDTH),
                args.height.unwrap_or(CANVAS_HEIGHT),
            )?
        },
    };

    let canvas = if args.sequential {
        scene.camera.render(&scene.world)?
    } else {
        scene.camera.render_parallel(&scene.world)?
    };

    canvas.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Image saved as {}", args.output.display());

    Ok(())
}

/// A hand casting a shadow puppet on a wall, with two marker spheres on the
/// x and y axes.
fn demo_scene(width: usize, height: usize) -> anyhow::Result<Scene> {
    let skin = Material {
        color: Color::rgb(0.1, 1.0, 0.5),
        diffuse: 0.7,
        specular: 0.3,
        ..Default::default()
    };
    let marker = |color: Color| Material { color, ..skin };

    let wall = Shape::sphere()
        .with_transform(Matrix4::scaling(100.0, 100.0, 0.1))?
        .with_material(Material {
            color: Color::rgb(1.0, 0.9, 0.9),
            diffuse: 0.5,
            specular: 0.0,
            shininess: 0.0,
            ..Default::default()
        });

    let palm = Shape::sphere()
        .with_transform(Matrix4::translation(0.0, 0.0, 3.5)
            * Matrix4::scaling(1.0, 1.0, 0.5))?
        .with_material(skin);

    let arm = Shape::sphere()
        .with_transform(Matrix4::translation(-5.0, -1.0, 4.0)
            * Matrix4::rotation_z(PI / 7.0)
            * Matrix4::scaling(2.0, 1.0, 0.5))?
        .with_material(skin);

    let finger = Shape::sphere()
        .with_transform(Matrix4::translation(0.7, 0.0, 3.0)
            * Matrix4::scaling(1.0, 0.25, 0.25))?
        .with_material(skin);

    let x_marker = Shape::sphere()
        .with_transform(Matrix4::translation(2.0, 0.0, 0.0)
            * Matrix4::scaling(0.5, 0.5, 0.5))?
        .with_material(marker(Color::rgb(0.0, 0.0, 1.0)));

    let y_marker = Shape::sphere()
        .with_transform(Matrix4::translation(0.0, 2.0, 0.0)
            * Matrix4::scaling(0.5, 0.5, 0.5))?
        .with_material(marker(Color::rgb(1.0, 0.0, 0.0)));

    let mut world = World::new(PointLight::new(Color::white(), Tuple::point(0.0, 0.0, 100.0)));
    world.objects = vec![wall, palm, arm, x_marker, y_marker, finger];

    let view = Matrix4::view_transform(
        Tuple::point(2.0, 2.0, 6.0),
        Tuple::point(-1.0, 0.0, 0.0),
        Tuple::vector(0.0, 1.0, 0.0),
    )?;
    let camera = Camera::new(width, height, PI / 2.0, view)?;

    Ok(Scene { world, camera })
}
