//! Scene graph builder: camera, lights and the primitive objects.

use std::path::{Path, PathBuf};

use anyhow::Result;
use asset::primitives::{box_mesh, cylinder_mesh, sphere_mesh};
use asset::sequence::ModelRequest;
use asset::texture::TextureData;
use corelib::camera::PerspectiveCamera;
use corelib::color::Color;
use corelib::light::DirectionalLight;
use corelib::material::Material;
use corelib::scene::{GeometryId, ObjectId, Scene, SceneObject};
use corelib::state::SceneState;
use corelib::transform::Transform;
use corelib::{Vec3, vec3};
use renderer::ResourceSink;

pub const FOV_Y_DEG: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 200.0;
pub const CAMERA_START: Vec3 = vec3(0.0, 0.0, 2.0);

pub const LIGHT_COLOR: u32 = 0xffffff;
pub const LIGHT_INTENSITY: f32 = 3.0;
pub const LIGHT_POSITIONS: [Vec3; 2] = [vec3(-1.0, 2.0, 4.0), vec3(0.0, 10.0, -10.0)];

/// (color, x offset) per cube, in animation order.
pub const CUBES: [(u32, f32); 3] = [(0x44aa88, 0.0), (0x8844aa, -2.0), (0xaa8844, 2.0)];

pub const SPHERE_POSITION: Vec3 = vec3(-15.0, 3.0, -20.0);
/// Used when the sky image cannot be decoded.
pub const SPHERE_FALLBACK_COLOR: u32 = 0xff00ff;

pub const CYLINDER_COLOR: u32 = 0xffc0cb;
pub const CYLINDER_POSITION: Vec3 = vec3(0.0, 1.0, -5.0);

/// Fixed asset locations, resolved against a root directory.
#[derive(Clone, Debug)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    const MATERIALS: &'static str = "resources/models/cat.mtl";
    const GEOMETRY: &'static str = "resources/models/cat.obj";
    const SKY: &'static str = "resources/images/sky.jpg";

    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn materials(&self) -> PathBuf {
        self.root.join(Self::MATERIALS)
    }

    pub fn geometry(&self) -> PathBuf {
        self.root.join(Self::GEOMETRY)
    }

    pub fn sky(&self) -> PathBuf {
        self.root.join(Self::SKY)
    }

    pub fn model_request(&self) -> ModelRequest {
        ModelRequest {
            material_path: self.materials(),
            geometry_path: self.geometry(),
        }
    }
}

/// Builds the static part of the world. `aspect` is the surface's aspect
/// ratio at startup.
pub fn build_scene<R: ResourceSink>(
    resources: &mut R,
    paths: &AssetPaths,
    aspect: f32,
) -> Result<SceneState> {
    let camera = PerspectiveCamera::new(FOV_Y_DEG, aspect, NEAR, FAR)
        .with_position(CAMERA_START)
        .with_target(Vec3::ZERO);

    let mut scene = Scene::new();
    for position in LIGHT_POSITIONS {
        scene.add_light(DirectionalLight::new(
            Color::from_hex(LIGHT_COLOR),
            LIGHT_INTENSITY,
            position,
        ));
    }

    let cube_geometry = resources.add_geometry(&box_mesh(1.0, 1.0, 1.0));
    let cubes = CUBES.map(|(color, x)| make_instance(&mut scene, resources, cube_geometry, color, x));

    let sky_material = match TextureData::load(paths.sky()) {
        Ok(texture) => Material::textured(resources.add_texture(&texture)),
        Err(e) => {
            log::warn!("Sky texture unavailable ({e:#}); sphere falls back to a flat color");
            Material::phong(Color::from_hex(SPHERE_FALLBACK_COLOR))
        }
    };
    scene.add(SceneObject::mesh(
        resources.add_geometry(&sphere_mesh(5.0, 10, 10)),
        resources.add_material(&sky_material),
        Transform::from_translation(SPHERE_POSITION),
    ));

    scene.add(SceneObject::mesh(
        resources.add_geometry(&cylinder_mesh(2.0, 2.0, 2.0, 32)),
        resources.add_material(&Material::phong(Color::from_hex(CYLINDER_COLOR))),
        Transform::from_translation(CYLINDER_POSITION),
    ));

    log::info!(
        "Scene built: {} objects, {} lights",
        scene.len(),
        scene.lights().len()
    );
    Ok(SceneState::new(scene, camera, cubes)?)
}

fn make_instance<R: ResourceSink>(
    scene: &mut Scene,
    resources: &mut R,
    geometry: GeometryId,
    color: u32,
    x: f32,
) -> ObjectId {
    let material = resources.add_material(&Material::phong(Color::from_hex(color)));
    scene.add(SceneObject::mesh(
        geometry,
        material,
        Transform::from_translation(vec3(x, 0.0, 0.0)),
    ))
}
