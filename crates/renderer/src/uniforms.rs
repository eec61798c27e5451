//! CPU mirrors of the shader's uniform blocks and vertex layout.

use asset::mesh::MeshVertex;
use bytemuck::{Pod, Zeroable};
use corelib::camera::PerspectiveCamera;
use corelib::light::DirectionalLight;
use corelib::material::Material;
use corelib::transform::Transform;
use glam::Mat4;
use wgpu::{VertexBufferLayout, VertexStepMode};

/// Must match `MAX_LIGHTS` in `phong.wgsl`.
pub const MAX_LIGHTS: usize = 4;

/// Vertex: position + normal + uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
    };
}

impl From<&MeshVertex> for Vertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_dir: [[f32; 4]; MAX_LIGHTS],
    light_color: [[f32; 4]; MAX_LIGHTS],
    light_count: [u32; 4],
}

impl GlobalsUniform {
    /// Lights past `MAX_LIGHTS` are dropped.
    pub fn new(camera: &PerspectiveCamera, lights: &[DirectionalLight]) -> Self {
        let mut uniform = Self {
            view_proj: camera.proj_view().to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            light_dir: [[0.0; 4]; MAX_LIGHTS],
            light_color: [[0.0; 4]; MAX_LIGHTS],
            light_count: [0; 4],
        };
        let used = lights.len().min(MAX_LIGHTS);
        for (i, light) in lights.iter().take(used).enumerate() {
            uniform.light_dir[i] = light.to_light().extend(0.0).to_array();
            let [r, g, b] = light.radiance().to_array();
            uniform.light_color[i] = [r, g, b, 0.0];
        }
        uniform.light_count[0] = used as u32;
        uniform
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniform {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
}

impl ObjectUniform {
    pub fn new(transform: &Transform) -> Self {
        Self {
            model: transform.matrix().to_cols_array_2d(),
            normal: Mat4::from_mat3(transform.normal_matrix()).to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct MaterialUniform {
    color: [f32; 4],
    specular: [f32; 4],
    emissive: [f32; 4],
}

impl MaterialUniform {
    pub fn new(material: &Material) -> Self {
        let [r, g, b] = material.color.to_array();
        let [sr, sg, sb] = material.specular.to_array();
        let [er, eg, eb] = material.emissive.to_array();
        Self {
            color: [r, g, b, 1.0],
            // pow(0, 0) is undefined in WGSL.
            specular: [sr, sg, sb, material.shininess.max(1e-4)],
            emissive: [er, eg, eb, 0.0],
        }
    }
}
