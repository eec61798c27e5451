//! Renderer: wgpu init, Phong pipeline and the GPU-side resource tables.
//! wgpu = 26.x, winit = 0.30.x

use std::num::NonZeroU64;
use std::sync::Arc;

use anyhow::{Context, Result};
use asset::mesh::MeshData;
use asset::texture::TextureData;
use corelib::camera::PerspectiveCamera;
use corelib::frame::{OutputSurface, SceneRenderer};
use corelib::material::{Material, TextureId};
use corelib::scene::{GeometryId, MaterialId, Scene};
use wgpu::{
    BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    BlendState, Buffer, BufferBindingType, BufferUsages, ColorTargetState, ColorWrites,
    CommandEncoderDescriptor, DepthBiasState, DepthStencilState, Device, DeviceDescriptor,
    Extent3d, Features, FragmentState, Instance, InstanceDescriptor, Limits, LoadOp, Operations,
    PipelineLayoutDescriptor, PowerPreference, PresentMode, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor, Sampler, ShaderModuleDescriptor,
    ShaderSource, ShaderStages, StoreOp, Surface, SurfaceConfiguration, SurfaceError,
    TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView,
    TextureViewDescriptor, VertexState, util::DeviceExt,
};
use winit::{dpi::PhysicalSize, window::Window};

pub mod uniforms;

use uniforms::{GlobalsUniform, MaterialUniform, ObjectUniform, Vertex};

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;
const MSAA_SAMPLES: u32 = 4;

/// Registry the scene builder hands CPU assets to. Returned ids stay valid
/// for the renderer's lifetime.
pub trait ResourceSink {
    fn add_geometry(&mut self, mesh: &MeshData) -> GeometryId;
    fn add_texture(&mut self, texture: &TextureData) -> TextureId;
    fn add_material(&mut self, material: &Material) -> MaterialId;
}

struct GpuMesh {
    vertex_buf: Buffer,
    index_buf: Buffer,
    index_count: u32,
}

struct GpuObject {
    buf: Buffer,
    bind_group: BindGroup,
}

pub struct GpuState {
    window: Arc<Window>,

    // Surface
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,

    // Device/queue
    device: Device,
    queue: Queue,

    // Pipeline
    pipeline: RenderPipeline,
    sample_count: u32,
    globals_buf: Buffer,
    globals_bg: BindGroup,
    object_bgl: BindGroupLayout,
    material_bgl: BindGroupLayout,
    sampler: Sampler,

    // Attachments
    depth_view: TextureView,
    msaa_view: Option<TextureView>,

    // Resource tables, indexed by the corelib ids.
    meshes: Vec<GpuMesh>,
    textures: Vec<TextureView>,
    materials: Vec<BindGroup>,
    objects: Vec<GpuObject>,
    white: TextureId,
}

impl GpuState {
    /// Create GPU state bound to an Arc<Window>.
    pub async fn new(window: Arc<Window>, backends: wgpu::Backends) -> Result<Self> {
        let PhysicalSize { width, height } = window.inner_size();
        let width = width.max(1);
        let height = height.max(1);

        // Instance & surface
        let instance = Instance::new(&InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface: Surface<'static> = instance
            .create_surface(window.clone())
            .context("create_surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("catscene device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("request_device failed")?;

        // Surface format (prefer sRGB)
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("Surface reports no formats")?;

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let sample_count = if adapter
            .get_texture_format_features(surface_format)
            .flags
            .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            log::warn!("{MSAA_SAMPLES}x MSAA unsupported for {surface_format:?}; rendering aliased");
            1
        };

        let depth_view = create_depth_view(&device, &surface_config, sample_count);
        let msaa_view = create_msaa_view(&device, &surface_config, sample_count);

        // ==== Shaders ====
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Phong WGSL"),
            source: ShaderSource::Wgsl(include_str!("shaders/phong.wgsl").into()),
        });

        // ==== Bind group layouts ====
        let globals_bgl = uniform_layout::<GlobalsUniform>(
            &device,
            "Globals BGL",
            ShaderStages::VERTEX | ShaderStages::FRAGMENT,
        );
        let object_bgl = uniform_layout::<ObjectUniform>(&device, "Object BGL", ShaderStages::VERTEX);
        let material_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Material BGL"),
            entries: &[
                uniform_entry::<MaterialUniform>(0, ShaderStages::FRAGMENT),
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 2,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals UBO"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals BG"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Material sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // ==== Pipeline ====
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Phong PipelineLayout"),
            bind_group_layouts: &[&globals_bgl, &object_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Phong Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: Some(BlendState::REPLACE),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        let mut state = Self {
            window,
            surface,
            surface_config,
            device,
            queue,
            pipeline,
            sample_count,
            globals_buf,
            globals_bg,
            object_bgl,
            material_bgl,
            sampler,
            depth_view,
            msaa_view,
            meshes: Vec::new(),
            textures: Vec::new(),
            materials: Vec::new(),
            objects: Vec::new(),
            white: TextureId(0),
        };
        state.white = state.add_texture(&TextureData::solid([255, 255, 255, 255]));
        Ok(state)
    }

    /// Reconfigure surface & recreate the size-dependent attachments.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_view(&self.device, &self.surface_config, self.sample_count);
        self.msaa_view = create_msaa_view(&self.device, &self.surface_config, self.sample_count);
    }

    pub fn is_surface_lost(err: &SurfaceError) -> bool {
        matches!(err, SurfaceError::Lost | SurfaceError::Outdated)
    }

    pub fn recreate_surface(&mut self) {
        self.resize(self.surface_config.width, self.surface_config.height);
    }

    /// Grow the per-object uniform table to cover every object in the scene.
    fn ensure_object_slots(&mut self, count: usize) {
        while self.objects.len() < count {
            let buf = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Object UBO"),
                size: std::mem::size_of::<ObjectUniform>() as u64,
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Object BG"),
                layout: &self.object_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buf.as_entire_binding(),
                }],
            });
            self.objects.push(GpuObject { buf, bind_group });
        }
    }

    fn texture_view(&self, id: TextureId) -> &TextureView {
        match self.textures.get(id.0 as usize) {
            Some(view) => view,
            None => {
                log::warn!("Unknown texture {id:?}; using white");
                &self.textures[self.white.0 as usize]
            }
        }
    }
}

impl ResourceSink for GpuState {
    fn add_geometry(&mut self, mesh: &MeshData) -> GeometryId {
        let vertices: Vec<Vertex> = mesh.vertices.iter().map(Vertex::from).collect();
        let vertex_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh VB"),
                contents: bytemuck::cast_slice(&vertices),
                usage: BufferUsages::VERTEX,
            });
        let index_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh IB"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: BufferUsages::INDEX,
            });
        let id = GeometryId(self.meshes.len() as u32);
        self.meshes.push(GpuMesh {
            vertex_buf,
            index_buf,
            index_count: mesh.indices.len() as u32,
        });
        id
    }

    fn add_texture(&mut self, texture: &TextureData) -> TextureId {
        let size = Extent3d {
            width: texture.width,
            height: texture.height,
            depth_or_array_layers: 1,
        };
        let gpu_texture = self.device.create_texture(&TextureDescriptor {
            label: Some("Material texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texture.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(texture.width * texture.bytes_per_pixel()),
                rows_per_image: Some(texture.height),
            },
            size,
        );
        let id = TextureId(self.textures.len() as u32);
        self.textures
            .push(gpu_texture.create_view(&TextureViewDescriptor::default()));
        id
    }

    fn add_material(&mut self, material: &Material) -> MaterialId {
        let uniform = MaterialUniform::new(material);
        let buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Material UBO"),
                contents: bytemuck::bytes_of(&uniform),
                usage: BufferUsages::UNIFORM,
            });
        let view = self.texture_view(material.map.unwrap_or(self.white));
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Material BG"),
            layout: &self.material_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buf.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(bind_group);
        id
    }
}

impl OutputSurface for GpuState {
    fn backing_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    fn display_size(&self) -> (u32, u32) {
        let PhysicalSize { width, height } = self.window.inner_size();
        (width, height)
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        log::debug!("Resizing surface to {width}x{height}");
        self.resize(width, height);
    }
}

impl SceneRenderer for GpuState {
    type Error = SurfaceError;

    /// Draw every object of `scene`. A lost or outdated swapchain is
    /// reconfigured and the frame skipped; other surface errors are returned.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), SurfaceError> {
        let globals = GlobalsUniform::new(camera, scene.lights());
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&globals));

        self.ensure_object_slots(scene.len());
        for (id, object) in scene.objects() {
            let uniform = ObjectUniform::new(&object.transform);
            self.queue.write_buffer(
                &self.objects[id.0 as usize].buf,
                0,
                bytemuck::bytes_of(&uniform),
            );
        }

        // --- frame & pass
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e) if Self::is_surface_lost(&e) => {
                log::debug!("Surface {e:?}; reconfiguring");
                self.recreate_surface();
                return Ok(());
            }
            Err(SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring the next frame; skipping it");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let swap_view = frame.texture.create_view(&TextureViewDescriptor::default());
        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&swap_view)),
            None => (&swap_view, None),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("MainEncoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("MainPass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu::Color::BLACK),
                        store: if resolve_target.is_some() {
                            StoreOp::Discard
                        } else {
                            StoreOp::Store
                        },
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for (id, object) in scene.objects() {
                rpass.set_bind_group(1, &self.objects[id.0 as usize].bind_group, &[]);
                for part in &object.parts {
                    let (Some(mesh), Some(material)) = (
                        self.meshes.get(part.geometry.0 as usize),
                        self.materials.get(part.material.0 as usize),
                    ) else {
                        continue;
                    };
                    rpass.set_bind_group(2, material, &[]);
                    rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
                    rpass.set_index_buffer(mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
        Ok(())
    }
}

fn uniform_entry<T>(binding: u32, visibility: ShaderStages) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

fn uniform_layout<T>(device: &Device, label: &str, visibility: ShaderStages) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[uniform_entry::<T>(0, visibility)],
    })
}

/// Create a depth texture view matching the surface config.
fn create_depth_view(device: &Device, sc: &SurfaceConfiguration, sample_count: u32) -> TextureView {
    let tex = device.create_texture(&TextureDescriptor {
        label: Some("DepthTex"),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&TextureViewDescriptor::default())
}

/// Multisampled color target resolved into the swapchain image; `None`
/// when rendering without MSAA.
fn create_msaa_view(
    device: &Device,
    sc: &SurfaceConfiguration,
    sample_count: u32,
) -> Option<TextureView> {
    if sample_count <= 1 {
        return None;
    }
    let tex = device.create_texture(&TextureDescriptor {
        label: Some("MsaaColorTex"),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: TextureDimension::D2,
        format: sc.format,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    Some(tex.create_view(&TextureViewDescriptor::default()))
}
