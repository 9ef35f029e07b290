use crate::scene::MeshKind;
use std::mem;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub tex_coords: [f32; 2],
}

const ATTRIBUTES: [wgpu::VertexAttributeDescriptor; 4] = [
    wgpu::VertexAttributeDescriptor {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float3,
    },
    wgpu::VertexAttributeDescriptor {
        offset: 12,
        shader_location: 1,
        format: wgpu::VertexFormat::Float3,
    },
    wgpu::VertexAttributeDescriptor {
        offset: 24,
        shader_location: 2,
        format: wgpu::VertexFormat::Float3,
    },
    wgpu::VertexAttributeDescriptor {
        offset: 36,
        shader_location: 3,
        format: wgpu::VertexFormat::Float2,
    },
];

impl Vertex {
    pub fn desc<'a>() -> wgpu::VertexBufferDescriptor<'a> {
        wgpu::VertexBufferDescriptor {
            stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::InputStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

const fn v(position: [f32; 3], normal: [f32; 3], color: [f32; 3], tex_coords: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        color,
        tex_coords,
    }
}

const fn colored(position: [f32; 3], color: [f32; 3]) -> Vertex {
    v(position, [0.0, 0.0, 0.0], color, [0.0, 0.0])
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const PURPLE: [f32; 3] = [0.5, 0.0, 0.5];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

// Prism edges run along Z. A, B and C are the corners of the triangular
// cross-section.
const A0: [f32; 3] = [0.0, -0.5, -0.5];
const B0: [f32; 3] = [0.433, 0.25, -0.5];
const C0: [f32; 3] = [-0.433, 0.25, -0.5];
const A1: [f32; 3] = [0.0, -0.5, 0.5];
const B1: [f32; 3] = [0.433, 0.25, 0.5];
const C1: [f32; 3] = [-0.433, 0.25, 0.5];

/// Triangular prism: two caps and three sides, each a solid colour.
pub const PRISM: [Vertex; 24] = [
    colored(A0, RED),
    colored(B0, RED),
    colored(C0, RED),
    colored(A1, GREEN),
    colored(B1, GREEN),
    colored(C1, GREEN),
    colored(A0, BLUE),
    colored(B0, BLUE),
    colored(B1, BLUE),
    colored(A0, BLUE),
    colored(B1, BLUE),
    colored(A1, BLUE),
    colored(B0, YELLOW),
    colored(C0, YELLOW),
    colored(C1, YELLOW),
    colored(B0, YELLOW),
    colored(C1, YELLOW),
    colored(B1, YELLOW),
    colored(C0, PURPLE),
    colored(A0, PURPLE),
    colored(A1, PURPLE),
    colored(C0, PURPLE),
    colored(A1, PURPLE),
    colored(C1, PURPLE),
];

const fn face(corners: [[f32; 3]; 4], normal: [f32; 3]) -> [Vertex; 6] {
    const COLORS: [[f32; 3]; 4] = [RED, GREEN, BLUE, YELLOW];
    const UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    [
        v(corners[0], normal, COLORS[0], UVS[0]),
        v(corners[1], normal, COLORS[1], UVS[1]),
        v(corners[2], normal, COLORS[2], UVS[2]),
        v(corners[0], normal, COLORS[0], UVS[0]),
        v(corners[2], normal, COLORS[2], UVS[2]),
        v(corners[3], normal, COLORS[3], UVS[3]),
    ]
}

const CUBE_FACES: [[Vertex; 6]; 6] = [
    face(
        [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
        [0.0, 0.0, 1.0],
    ),
    face(
        [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
        [0.0, 0.0, -1.0],
    ),
    face(
        [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
        [0.0, 1.0, 0.0],
    ),
    face(
        [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
        [0.0, -1.0, 0.0],
    ),
    face(
        [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
        [1.0, 0.0, 0.0],
    ),
    face(
        [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
        [-1.0, 0.0, 0.0],
    ),
];

/// Unit cube centred on the origin, 36 vertices with per-face normals and UVs.
pub fn cube() -> Vec<Vertex> {
    CUBE_FACES.iter().flat_map(|face| face.iter().copied()).collect()
}

/// 2x2 quad in the XY plane facing +Z, subdivided along X so the flag
/// shader has vertices to displace.
pub fn plane(columns: u32) -> Vec<Vertex> {
    let columns = columns.max(1);
    let mut vertices = Vec::with_capacity(columns as usize * 6);
    for i in 0..columns {
        let u0 = i as f32 / columns as f32;
        let u1 = (i + 1) as f32 / columns as f32;
        let x0 = u0 * 2.0 - 1.0;
        let x1 = u1 * 2.0 - 1.0;
        vertices.extend_from_slice(&face(
            [[x0, -1.0, 0.0], [x1, -1.0, 0.0], [x1, 1.0, 0.0], [x0, 1.0, 0.0]],
            [0.0, 0.0, 1.0],
        ));
        for vertex in vertices.iter_mut().rev().take(6) {
            vertex.color = WHITE;
            vertex.tex_coords[0] = u0 + (u1 - u0) * vertex.tex_coords[0];
        }
    }
    vertices
}

pub const PLANE_COLUMNS: u32 = 16;

pub fn geometry(kind: MeshKind) -> Vec<Vertex> {
    match kind {
        MeshKind::Prism => PRISM.to_vec(),
        MeshKind::Cube => cube(),
        MeshKind::Plane => plane(PLANE_COLUMNS),
    }
}
