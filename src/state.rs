use wgpu;
use winit::{
    event::*,
    window::*,
};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::time::Instant;
use crate::camera::{Camera, Projection};
use crate::controller::Controller;
use crate::input::{CursorTracker, MovementKeys};
use crate::material::{ObjectBinding, ObjectUniforms};
use crate::mesh::Meshes;
use crate::scene::{Material, Pattern, Scene, TEXTURE_SIZE};
use crate::settings::Settings;
use crate::texture::{DepthTexture, Texture};
use crate::vertex::Vertex;

pub struct State {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    sc_desc: wgpu::SwapChainDescriptor,
    swap_chain: wgpu::SwapChain,
    pub size: winit::dpi::PhysicalSize<u32>,
    pipelines: Pipelines,
    meshes: Meshes,
    textures: TextureSet,
    bindings: Vec<ObjectBinding>,
    depth_texture: DepthTexture,
    scene: Scene,
    camera: Camera,
    projection: Projection,
    controller: Controller,
    cursor: CursorTracker,
    keys: MovementKeys,
    started: Instant,
    last_frame: Instant,
}

/// One pipeline per material. Selection is a `match`, so adding a material
/// without a pipeline does not compile.
struct Pipelines {
    flat: wgpu::RenderPipeline,
    diffuse: wgpu::RenderPipeline,
    specular: wgpu::RenderPipeline,
    blinn_phong: wgpu::RenderPipeline,
    textured: wgpu::RenderPipeline,
    flag: wgpu::RenderPipeline,
    light_marker: wgpu::RenderPipeline,
}

impl Pipelines {
    fn for_material(&self, material: &Material) -> &wgpu::RenderPipeline {
        match material {
            Material::Flat => &self.flat,
            Material::Diffuse => &self.diffuse,
            Material::Specular => &self.specular,
            Material::BlinnPhong => &self.blinn_phong,
            Material::Textured { .. } => &self.textured,
            Material::Flag { .. } => &self.flag,
            Material::LightMarker { .. } => &self.light_marker,
        }
    }
}

/// Generated textures keyed by pattern. Untextured materials still bind the
/// fallback so every pipeline can share one layout.
struct TextureSet {
    fallback: Texture,
    patterns: HashMap<Pattern, Texture>,
}

impl TextureSet {
    fn get(&self, pattern: Option<Pattern>) -> &Texture {
        pattern
            .and_then(|pattern| self.patterns.get(&pattern))
            .unwrap_or(&self.fallback)
    }
}

impl State {
    pub async fn new(window: &Window, settings: &Settings, scene: Scene) -> Result<Self> {
        let size = window.inner_size();

        // initializing GPU
        let instance = wgpu::Instance::new(wgpu::BackendBit::PRIMARY);
        let surface = unsafe { instance.create_surface(window) };
        let adapter = instance.request_adapter(
            &wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::Default,
                compatible_surface: Some(&surface),
            }
        ).await.context("Failed to create adapter")?;
        log::info!("using adapter {:?}", adapter.get_info());
        let (device, queue) = adapter.request_device(
            &wgpu::DeviceDescriptor {
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
                shader_validation: true,
            },
            None,
        ).await.context("Failed to create device")?;
        let sc_desc = wgpu::SwapChainDescriptor {
            usage: wgpu::TextureUsage::OUTPUT_ATTACHMENT,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
        };
        let swap_chain = device.create_swap_chain(&surface, &sc_desc);
        let depth_texture = DepthTexture::new(&device, &sc_desc, Some("depth_texture"));

        // camera and input
        let camera = Camera::new(
            settings.camera_position,
            settings.camera_yaw,
            settings.camera_pitch,
        );
        let projection = Projection::new(
            sc_desc.width,
            sc_desc.height,
            settings.fov,
            settings.z_near,
            settings.z_far,
        );
        let controller = Controller::new(settings.move_speed, settings.mouse_sensitivity)
            .with_fov_step(settings.fov_step);

        // textures
        let texture_layout = Texture::bind_group_layout(&device);
        let fallback = Texture::from_image(
            &device,
            &queue,
            &texture_layout,
            &Pattern::BlackWhite.generate(TEXTURE_SIZE, TEXTURE_SIZE),
            Some("fallback_texture"),
        );
        let mut patterns = HashMap::new();
        for object in scene.drawables() {
            if let Some(pattern) = object.material.pattern() {
                patterns.entry(pattern).or_insert_with(|| {
                    Texture::from_image(
                        &device,
                        &queue,
                        &texture_layout,
                        &pattern.generate(TEXTURE_SIZE, TEXTURE_SIZE),
                        Some(format!("{:?} texture", pattern).as_str()),
                    )
                });
            }
        }
        let textures = TextureSet { fallback, patterns };

        // per-object uniforms
        let object_layout = ObjectBinding::bind_group_layout(&device);
        let light = scene.light.unwrap_or_default();
        let view = camera.view_matrix();
        let proj = projection.matrix();
        let bindings = scene
            .drawables()
            .enumerate()
            .map(|(i, object)| {
                let uniforms =
                    ObjectUniforms::new(&object, view, proj, camera.position, &light, 0.0);
                ObjectBinding::new(&device, &object_layout, &uniforms, &format!("object {}", i))
            })
            .collect();

        let meshes = Meshes::new(&device);

        // render pipelines
        let render_pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("render_pipeline_layout"),
                bind_group_layouts: &[&object_layout, &texture_layout],
                push_constant_ranges: &[],
            }
        );
        let pipelines = create_pipelines(&device, &render_pipeline_layout, sc_desc.format);

        log::info!(
            "scene ready: {} objects, light {}",
            scene.objects.len(),
            if scene.light.is_some() { "on" } else { "off" },
        );

        let now = Instant::now();
        Ok(Self {
            surface,
            device,
            queue,
            sc_desc,
            swap_chain,
            size,
            pipelines,
            meshes,
            textures,
            bindings,
            depth_texture,
            scene,
            camera,
            projection,
            controller,
            cursor: CursorTracker::new(),
            keys: MovementKeys::default(),
            started: now,
            last_frame: now,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.sc_desc.width = new_size.width;
        self.sc_desc.height = new_size.height;
        self.swap_chain = self.device.create_swap_chain(&self.surface, &self.sc_desc);
        self.depth_texture = DepthTexture::new(&self.device, &self.sc_desc, Some("depth_texture"));
        self.projection.resize(new_size.width, new_size.height);
    }

    pub fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                input: KeyboardInput {
                    state,
                    virtual_keycode: Some(key),
                    ..
                },
                ..
            } => {
                if self.keys.process(*key, *state) {
                    return true;
                }
                if *state != ElementState::Pressed {
                    return false;
                }
                self.controller
                    .key_pressed(*key, &mut self.projection, self.scene.light.as_ref())
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.controller.mouse_moved(
                    &mut self.camera,
                    &mut self.cursor,
                    position.x,
                    position.y,
                );
                true
            }
            WindowEvent::Focused(false) => {
                self.cursor.reset();
                self.keys = MovementKeys::default();
                false
            }
            _ => false,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.controller.update(&mut self.camera, self.scene.light.as_mut(), &self.keys, dt);

        let time = now.duration_since(self.started).as_secs_f32();
        let light = self.scene.light.unwrap_or_default();
        let view = self.camera.view_matrix();
        let proj = self.projection.matrix();
        for (object, binding) in self.scene.drawables().zip(&self.bindings) {
            let uniforms =
                ObjectUniforms::new(&object, view, proj, self.camera.position, &light, time);
            binding.write(&self.queue, &uniforms);
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SwapChainError> {
        let frame = self.swap_chain.get_current_frame()?.output;
        let mut encoder = self.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") },
        );
        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                color_attachments: &[
                    wgpu::RenderPassColorAttachmentDescriptor {
                        attachment: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: 0.1,
                                g: 0.2,
                                b: 0.3,
                                a: 1.0,
                            }),
                            store: true,
                        },
                    },
                ],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachmentDescriptor {
                    attachment: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: true,
                    }),
                    stencil_ops: None,
                }),
            });
        // The light marker comes last in `drawables`, after the depth-tested objects.
        for (object, binding) in self.scene.drawables().zip(&self.bindings) {
            let mesh = self.meshes.get(object.mesh);
            render_pass.set_pipeline(self.pipelines.for_material(&object.material));
            render_pass.set_bind_group(0, &binding.bind_group, &[]);
            let texture = self.textures.get(object.material.pattern());
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.draw(0..mesh.num_vertices, 0..1);
        }
        drop(render_pass);
        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}

fn create_pipelines(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
) -> Pipelines {
    let flat_vs = device.create_shader_module(wgpu::include_spirv!("shaders/flat.vert.spv"));
    let flat_fs = device.create_shader_module(wgpu::include_spirv!("shaders/flat.frag.spv"));
    let lit_vs = device.create_shader_module(wgpu::include_spirv!("shaders/lit.vert.spv"));
    let diffuse_fs = device.create_shader_module(wgpu::include_spirv!("shaders/diffuse.frag.spv"));
    let specular_fs =
        device.create_shader_module(wgpu::include_spirv!("shaders/specular.frag.spv"));
    let blinn_phong_fs =
        device.create_shader_module(wgpu::include_spirv!("shaders/blinn_phong.frag.spv"));
    let texture_vs = device.create_shader_module(wgpu::include_spirv!("shaders/texture.vert.spv"));
    let texture_fs = device.create_shader_module(wgpu::include_spirv!("shaders/texture.frag.spv"));
    let flag_vs = device.create_shader_module(wgpu::include_spirv!("shaders/flag.vert.spv"));

    let pipeline =
        |label: &str, vs: &wgpu::ShaderModule, fs: &wgpu::ShaderModule, depth: DepthMode| {
            create_render_pipeline(device, layout, format, label, vs, fs, depth)
        };
    Pipelines {
        flat: pipeline("flat_pipeline", &flat_vs, &flat_fs, DepthMode::Tested),
        diffuse: pipeline("diffuse_pipeline", &lit_vs, &diffuse_fs, DepthMode::Tested),
        specular: pipeline("specular_pipeline", &lit_vs, &specular_fs, DepthMode::Tested),
        blinn_phong: pipeline(
            "blinn_phong_pipeline",
            &lit_vs,
            &blinn_phong_fs,
            DepthMode::Tested,
        ),
        textured: pipeline("textured_pipeline", &texture_vs, &texture_fs, DepthMode::Tested),
        flag: pipeline("flag_pipeline", &flag_vs, &texture_fs, DepthMode::Tested),
        light_marker: pipeline(
            "light_marker_pipeline",
            &texture_vs,
            &texture_fs,
            DepthMode::OnTop,
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DepthMode {
    Tested,
    OnTop,
}

fn create_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    label: &str,
    vs_module: &wgpu::ShaderModule,
    fs_module: &wgpu::ShaderModule,
    depth: DepthMode,
) -> wgpu::RenderPipeline {
    let (depth_write_enabled, depth_compare) = match depth {
        DepthMode::Tested => (true, wgpu::CompareFunction::Less),
        DepthMode::OnTop => (false, wgpu::CompareFunction::Always),
    };
    device.create_render_pipeline(
        &wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex_stage: wgpu::ProgrammableStageDescriptor {
                module: vs_module,
                entry_point: "main",
            },
            fragment_stage: Some(wgpu::ProgrammableStageDescriptor {
                module: fs_module,
                entry_point: "main",
            }),
            // Both faces are drawn: the flag is a single quad.
            rasterization_state: Some(
                wgpu::RasterizationStateDescriptor {
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: wgpu::CullMode::None,
                    depth_bias: 0,
                    depth_bias_slope_scale: 0.0,
                    depth_bias_clamp: 0.0,
                    clamp_depth: false,
                }
            ),
            color_states: &[
                wgpu::ColorStateDescriptor {
                    format,
                    color_blend: wgpu::BlendDescriptor {
                        src_factor: wgpu::BlendFactor::SrcAlpha,
                        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                        operation: wgpu::BlendOperation::Add,
                    },
                    alpha_blend: wgpu::BlendDescriptor::REPLACE,
                    write_mask: wgpu::ColorWrite::ALL,
                }
            ],
            primitive_topology: wgpu::PrimitiveTopology::TriangleList,
            depth_stencil_state: Some(wgpu::DepthStencilStateDescriptor {
                format: DepthTexture::FORMAT,
                depth_write_enabled,
                depth_compare,
                stencil: wgpu::StencilStateDescriptor::default(),
            }),
            vertex_state: wgpu::VertexStateDescriptor {
                index_format: wgpu::IndexFormat::Uint32,
                vertex_buffers: &[Vertex::desc()],
            },
            sample_count: 1,
            sample_mask: !0,
            alpha_to_coverage_enabled: false,
        }
    )
}

