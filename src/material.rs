use crate::scene::{PointLight, SceneObject};
use crevice::std140::{AsStd140, Std140};
use glam::{Mat4, Vec3};
use mint::{ColumnMatrix4, Vector3};
use wgpu::util::DeviceExt;

/// Everything a shader needs to draw one object, laid out as std140.
#[derive(AsStd140)]
pub struct ObjectUniforms {
    mvp: ColumnMatrix4<f32>,
    model: ColumnMatrix4<f32>,
    view: ColumnMatrix4<f32>,
    view_position: Vector3<f32>,
    light_position: Vector3<f32>,
    light_color: Vector3<f32>,
    object_color: Vector3<f32>,
    time: f32,
}

impl ObjectUniforms {
    pub fn new(
        object: &SceneObject,
        view: Mat4,
        projection: Mat4,
        view_position: Vec3,
        light: &PointLight,
        time: f32,
    ) -> Self {
        let model = object.model_matrix();
        Self {
            mvp: (projection * view * model).into(),
            model: model.into(),
            view: view.into(),
            view_position: view_position.into(),
            light_position: light.position.into(),
            light_color: light.color.into(),
            object_color: object.color.into(),
            time,
        }
    }
}

/// Uniform buffer and bind group owned by a single scene object.
pub struct ObjectBinding {
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ObjectBinding {
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStage::VERTEX | wgpu::ShaderStage::FRAGMENT,
                ty: wgpu::BindingType::UniformBuffer {
                    dynamic: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("object_bind_group_layout"),
        })
    }

    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: &ObjectUniforms,
        name: &str,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{} uniform buffer", name).as_str()),
            contents: uniforms.as_std140().as_bytes(),
            usage: wgpu::BufferUsage::UNIFORM | wgpu::BufferUsage::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(buffer.slice(..)),
            }],
            label: Some(format!("{} bind group", name).as_str()),
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniforms: &ObjectUniforms) {
        queue.write_buffer(&self.buffer, 0, uniforms.as_std140().as_bytes());
    }
}
