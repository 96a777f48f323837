//! GPU renderer for the layered scene: sky box, mirrored shell and face overlay

use crate::context::GpuContext;
use crate::error::{RenderError, Result};
use crate::texture::Texture;
use bytemuck::{Pod, Zeroable};
use image::RgbaImage;
use log::{info, warn};
use nalgebra::Matrix4;
use spincube_core::{Camera, Cuboid, UnitQuaternion};
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Half extent of the mirrored shell cube.
pub const SHELL_HALF_EXTENT: f32 = 15.0;
/// Half extent of the face overlay cube, slightly larger so it sits on top of the shell.
pub const OVERLAY_HALF_EXTENT: f32 = 15.5;
/// Half extent of the sky box, large enough to enclose the camera glide range.
pub const SKY_HALF_EXTENT: f32 = 512.0;

/// Vertex data shared by all three scene layers
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl SceneVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // UV
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Convert cuboid geometry into scene vertices
pub fn cuboid_vertices(cuboid: &Cuboid) -> Vec<SceneVertex> {
    cuboid
        .positions
        .iter()
        .zip(cuboid.normals.iter())
        .zip(cuboid.uvs.iter())
        .map(|((position, normal), uv)| SceneVertex {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
            uv: *uv,
        })
        .collect()
}

/// Camera uniform data
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub _padding: f32,
}

/// Model uniform holding the cube orientation
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

/// UV transform applied to every overlay face
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct FaceParams {
    pub uv_scale: [f32; 2],
    pub uv_offset: [f32; 2],
}

/// Per-face texture content delivered by the asset loader
#[derive(Debug, Clone)]
pub enum FaceImage {
    Image(RgbaImage),
    Color([u8; 3]),
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub background_color: [f64; 4],
    /// Scale applied to face UVs before sampling, centering the image.
    pub face_uv_scale: [f32; 2],
    /// Offset applied after scaling.
    pub face_uv_offset: [f32; 2],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            face_uv_scale: [2.0, 2.0],
            face_uv_offset: [-0.5, -0.5],
        }
    }
}

/// Geometry uploaded to the GPU
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, cuboid: &Cuboid, label: &str) -> Self {
        let vertices = cuboid_vertices(cuboid);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&cuboid.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: cuboid.indices.len() as u32,
        }
    }
}

/// GPU-accelerated renderer for the full scene
pub struct SceneRenderer<'window> {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'window>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: SceneConfig,

    sky_pipeline: wgpu::RenderPipeline,
    shell_pipeline: wgpu::RenderPipeline,
    face_pipeline: wgpu::RenderPipeline,

    sky_mesh: GpuMesh,
    shell_mesh: GpuMesh,
    overlay_mesh: GpuMesh,

    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    model_uniform: ModelUniform,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,

    face_params_buffer: wgpu::Buffer,

    cube_texture_layout: wgpu::BindGroupLayout,
    face_texture_layout: wgpu::BindGroupLayout,

    sky_bind_group: wgpu::BindGroup,
    env_bind_group: wgpu::BindGroup,
    face_bind_groups: Option<Vec<wgpu::BindGroup>>,

    depth_texture: Texture,
}

impl<'window> SceneRenderer<'window> {
    /// Create a new scene renderer drawing to the given window
    pub async fn new(window: &'window Window, config: SceneConfig) -> Result<Self> {
        let gpu_context = GpuContext::new().await?;

        let surface = gpu_context.instance.create_surface(window)?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let device = &gpu_context.device;

        // Upload the three cube meshes
        let sky_mesh = GpuMesh::upload(device, &Cuboid::cube(SKY_HALF_EXTENT), "Sky Mesh");
        let shell_mesh = GpuMesh::upload(device, &Cuboid::cube(SHELL_HALF_EXTENT), "Shell Mesh");
        let overlay_mesh =
            GpuMesh::upload(device, &Cuboid::cube(OVERLAY_HALF_EXTENT), "Overlay Mesh");

        // Create camera uniform
        let camera_uniform = CameraUniform {
            view_proj: Matrix4::identity().into(),
            view_pos: [0.0, 0.0, 0.0],
            _padding: 0.0,
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(&camera_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = uniform_bind_group_layout(device, "camera_bind_group_layout");
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        // Create model uniform
        let model_uniform = ModelUniform {
            model: Matrix4::identity().into(),
        };

        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Buffer"),
            contents: bytemuck::bytes_of(&model_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let model_bind_group_layout = uniform_bind_group_layout(device, "model_bind_group_layout");
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
            label: Some("model_bind_group"),
        });

        // One UV transform shared by all six overlay faces
        let face_params = FaceParams {
            uv_scale: config.face_uv_scale,
            uv_offset: config.face_uv_offset,
        };
        let face_params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Face Params Buffer"),
            contents: bytemuck::bytes_of(&face_params),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let cube_texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("cube_texture_layout"),
        });

        let face_texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
            label: Some("face_texture_layout"),
        });

        // Both sky and shell sample a placeholder until the panorama arrives
        let placeholder = Texture::placeholder_cubemap(device, &gpu_context.queue);
        let sky_bind_group = cubemap_bind_group(device, &cube_texture_layout, &placeholder, "sky_bind_group");
        let env_bind_group = cubemap_bind_group(device, &cube_texture_layout, &placeholder, "env_bind_group");

        // Create render pipelines
        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sky Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sky.wgsl").into()),
        });
        let env_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Env Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/env.wgsl").into()),
        });
        let face_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Face Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/face.wgsl").into()),
        });

        let sky_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sky Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &cube_texture_layout],
            push_constant_ranges: &[],
        });
        let shell_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shell Pipeline Layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &model_bind_group_layout,
                &cube_texture_layout,
            ],
            push_constant_ranges: &[],
        });
        let face_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Face Pipeline Layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &model_bind_group_layout,
                &face_texture_layout,
            ],
            push_constant_ranges: &[],
        });

        // The sky is drawn from inside, so its outward faces are culled and
        // depth is compared at the far plane without writing.
        let sky_pipeline = build_pipeline(
            device,
            "Sky Pipeline",
            &sky_pipeline_layout,
            &sky_shader,
            surface_format,
            Some(wgpu::Face::Front),
            false,
            wgpu::CompareFunction::LessEqual,
            wgpu::BlendState::REPLACE,
        );
        let shell_pipeline = build_pipeline(
            device,
            "Shell Pipeline",
            &shell_pipeline_layout,
            &env_shader,
            surface_format,
            Some(wgpu::Face::Back),
            true,
            wgpu::CompareFunction::Less,
            wgpu::BlendState::REPLACE,
        );
        let face_pipeline = build_pipeline(
            device,
            "Face Pipeline",
            &face_pipeline_layout,
            &face_shader,
            surface_format,
            Some(wgpu::Face::Back),
            true,
            wgpu::CompareFunction::Less,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        let depth_texture =
            Texture::create_depth_texture(device, &surface_config, "Depth Texture");

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            config,
            sky_pipeline,
            shell_pipeline,
            face_pipeline,
            sky_mesh,
            shell_mesh,
            overlay_mesh,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            model_uniform,
            model_buffer,
            model_bind_group,
            face_params_buffer,
            cube_texture_layout,
            face_texture_layout,
            sky_bind_group,
            env_bind_group,
            face_bind_groups: None,
            depth_texture,
        })
    }

    /// Update the camera uniform from the scene camera
    pub fn update_camera(&mut self, camera: &Camera) {
        self.camera_uniform.view_proj = camera.view_projection_matrix().into();
        self.camera_uniform.view_pos = [camera.position.x, camera.position.y, camera.position.z];

        self.gpu_context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
    }

    /// Update the model uniform from the cube orientation
    pub fn update_orientation(&mut self, orientation: &UnitQuaternion<f32>) {
        let model: Matrix4<f32> = orientation.to_homogeneous();
        self.model_uniform.model = model.into();

        self.gpu_context.queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::bytes_of(&self.model_uniform),
        );
    }

    /// Resize the surface and depth buffer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface
                .configure(&self.gpu_context.device, &self.surface_config);
            self.depth_texture = Texture::create_depth_texture(
                &self.gpu_context.device,
                &self.surface_config,
                "Depth Texture",
            );
        }
    }

    /// Install the sky panorama, rebinding both the sky box and the shell's
    /// environment map.
    pub fn install_sky(&mut self, image: &RgbaImage) {
        let device = &self.gpu_context.device;
        let cubemap =
            Texture::cubemap_from_image(device, &self.gpu_context.queue, image, "Sky Cubemap");
        self.sky_bind_group =
            cubemap_bind_group(device, &self.cube_texture_layout, &cubemap, "sky_bind_group");
        self.env_bind_group =
            cubemap_bind_group(device, &self.cube_texture_layout, &cubemap, "env_bind_group");
        info!("Sky panorama installed");
    }

    /// Install all six face textures at once.
    ///
    /// Faces are slot-indexed in cuboid face order, and the overlay only
    /// starts drawing once every slot is present.
    pub fn install_faces(&mut self, faces: &[FaceImage; 6]) {
        let device = &self.gpu_context.device;
        let queue = &self.gpu_context.queue;

        let mut groups = Vec::with_capacity(6);
        for (slot, face) in faces.iter().enumerate() {
            let label = format!("Face Texture {}", slot);
            let texture = match face {
                FaceImage::Image(image) => Texture::from_image(device, queue, image, &label),
                FaceImage::Color(rgb) => Texture::solid_color(device, queue, *rgb, &label),
            };
            groups.push(device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &self.face_texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: self.face_params_buffer.as_entire_binding(),
                    },
                ],
                label: Some(&label),
            }));
        }

        self.face_bind_groups = Some(groups);
        info!("Face textures installed");
    }

    /// Whether the face overlay has its textures and is being drawn
    pub fn faces_ready(&self) -> bool {
        self.face_bind_groups.is_some()
    }

    /// Render one frame
    pub fn render(&mut self) -> Result<()> {
        self.render_with_overlay(|_, _, _, _| {})
    }

    /// Render one frame, then hand the encoder and surface view to `overlay`
    /// so a UI layer can draw on top before the frame is presented.
    pub fn render_with_overlay<F>(&mut self, overlay: F) -> Result<()>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                // Reconfigure and let the next frame draw.
                self.surface
                    .configure(&self.gpu_context.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e)),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.gpu_context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Scene Render Encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.config.background_color[0],
                            g: self.config.background_color[1],
                            b: self.config.background_color[2],
                            a: self.config.background_color[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Sky first, then the shell, then the textured overlay.
            render_pass.set_pipeline(&self.sky_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(1, &self.sky_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.sky_mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.sky_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.sky_mesh.index_count, 0, 0..1);

            render_pass.set_pipeline(&self.shell_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(1, &self.model_bind_group, &[]);
            render_pass.set_bind_group(2, &self.env_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.shell_mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                self.shell_mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..self.shell_mesh.index_count, 0, 0..1);

            if let Some(face_bind_groups) = &self.face_bind_groups {
                render_pass.set_pipeline(&self.face_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.model_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.overlay_mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(
                    self.overlay_mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                for (slot, bind_group) in face_bind_groups.iter().enumerate() {
                    let start = (slot * 6) as u32;
                    render_pass.set_bind_group(2, bind_group, &[]);
                    render_pass.draw_indexed(start..start + 6, 0, 0..1);
                }
            }
        }

        overlay(
            &self.gpu_context.device,
            &self.gpu_context.queue,
            &mut encoder,
            &view,
        );

        self.gpu_context
            .queue
            .submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn uniform_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

fn cubemap_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
        label: Some(label),
    })
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    cull_mode: Option<wgpu::Face>,
    depth_write_enabled: bool,
    depth_compare: wgpu::CompareFunction,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[SceneVertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scene_vertex_layout() {
        assert_eq!(std::mem::size_of::<SceneVertex>(), 32);
        let desc = SceneVertex::desc();
        assert_eq!(desc.array_stride, 32);
        assert_eq!(desc.attributes.len(), 3);
        assert_eq!(desc.attributes[1].offset, 12);
        assert_eq!(desc.attributes[2].offset, 24);
    }

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
        assert_eq!(std::mem::size_of::<FaceParams>(), 16);
    }

    #[test]
    fn test_cuboid_vertices_match_geometry() {
        let cuboid = Cuboid::cube(SHELL_HALF_EXTENT);
        let vertices = cuboid_vertices(&cuboid);
        assert_eq!(vertices.len(), 24);
        for vertex in &vertices {
            for coordinate in vertex.position {
                assert_eq!(coordinate.abs(), SHELL_HALF_EXTENT);
            }
        }
    }

    #[test]
    fn test_face_index_ranges_cover_all_indices() {
        let cuboid = Cuboid::cube(1.0);
        for slot in 0..6usize {
            let start = slot * 6;
            for offset in 0..6 {
                let vertex_index = cuboid.indices[start + offset] as usize;
                // Each face range references only its own four vertices.
                assert!(vertex_index >= slot * 4 && vertex_index < slot * 4 + 4);
            }
        }
    }

    #[test]
    fn test_default_uv_transform_centers_image() {
        let config = SceneConfig::default();
        // The corners of the unit square land outside [0, 1] and clamp,
        // leaving the image centered at half size.
        let low = 0.0f32 * config.face_uv_scale[0] + config.face_uv_offset[0];
        let high = 1.0f32 * config.face_uv_scale[0] + config.face_uv_offset[0];
        let mid = 0.5f32 * config.face_uv_scale[0] + config.face_uv_offset[0];
        assert_relative_eq!(low, -0.5);
        assert_relative_eq!(high, 1.5);
        assert_relative_eq!(mid, 0.5);
    }
}
