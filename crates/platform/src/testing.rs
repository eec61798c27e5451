//! Test doubles for the GPU-facing traits.

use std::cell::Cell;

use asset::mesh::MeshData;
use asset::texture::TextureData;
use corelib::camera::PerspectiveCamera;
use corelib::frame::{FrameScheduler, OutputSurface, SceneRenderer};
use corelib::material::{Material, TextureId};
use corelib::scene::{GeometryId, MaterialId, Scene};
use renderer::ResourceSink;

#[derive(Default)]
pub struct RecordingSink {
    pub geometries: Vec<usize>,
    pub textures: Vec<(u32, u32)>,
    pub materials: Vec<Material>,
}

impl ResourceSink for RecordingSink {
    fn add_geometry(&mut self, mesh: &MeshData) -> GeometryId {
        self.geometries.push(mesh.triangle_count());
        GeometryId(self.geometries.len() as u32 - 1)
    }

    fn add_texture(&mut self, texture: &TextureData) -> TextureId {
        self.textures.push((texture.width, texture.height));
        TextureId(self.textures.len() as u32 - 1)
    }

    fn add_material(&mut self, material: &Material) -> MaterialId {
        self.materials.push(*material);
        MaterialId(self.materials.len() as u32 - 1)
    }
}

#[derive(Default)]
pub struct CountingScheduler {
    pub requests: Cell<u32>,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

pub struct FakeTarget {
    pub backing: (u32, u32),
    pub display: (u32, u32),
    pub rendered: u32,
    pub fail: bool,
}

impl FakeTarget {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            backing: (width, height),
            display: (width, height),
            rendered: 0,
            fail: false,
        }
    }
}

impl OutputSurface for FakeTarget {
    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn display_size(&self) -> (u32, u32) {
        self.display
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }
}

impl SceneRenderer for FakeTarget {
    type Error = String;

    fn render(&mut self, _scene: &Scene, _camera: &PerspectiveCamera) -> Result<(), String> {
        if self.fail {
            return Err("device lost".into());
        }
        self.rendered += 1;
        Ok(())
    }
}
