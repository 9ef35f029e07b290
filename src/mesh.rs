use crate::scene::MeshKind;
use crate::vertex::{self, Vertex};
use wgpu::util::DeviceExt;

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{} vertex buffer", label).as_str()),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsage::VERTEX,
        });
        Self {
            vertex_buffer,
            num_vertices: vertices.len() as u32,
        }
    }
}

/// One static vertex buffer per mesh kind, shared by every object using it.
pub struct Meshes {
    prism: Mesh,
    cube: Mesh,
    plane: Mesh,
}

impl Meshes {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            prism: Mesh::new(device, &vertex::geometry(MeshKind::Prism), "prism"),
            cube: Mesh::new(device, &vertex::geometry(MeshKind::Cube), "cube"),
            plane: Mesh::new(device, &vertex::geometry(MeshKind::Plane), "plane"),
        }
    }

    pub fn get(&self, kind: MeshKind) -> &Mesh {
        match kind {
            MeshKind::Prism => &self.prism,
            MeshKind::Cube => &self.cube,
            MeshKind::Plane => &self.plane,
        }
    }
}
