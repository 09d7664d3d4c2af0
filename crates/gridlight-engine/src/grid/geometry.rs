use bytemuck::{Pod, Zeroable};

use super::GridDims;

/// One corner of the shared cell square.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { pos: [x, y] }
    }

    /// Per-vertex layout: stride 8, one `Float32x2` at offset 0, shader location 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Half extent of the cell square; the remaining `0.2` leaves a gap between cells.
pub const SQUARE_EXTENT: f32 = 0.8;

/// Unit square as two counter-clockwise triangles, shared by every cell instance.
pub const UNIT_SQUARE: [Vertex; 6] = [
    Vertex::new(-SQUARE_EXTENT, -SQUARE_EXTENT),
    Vertex::new(SQUARE_EXTENT, -SQUARE_EXTENT),
    Vertex::new(SQUARE_EXTENT, SQUARE_EXTENT),
    Vertex::new(-SQUARE_EXTENT, -SQUARE_EXTENT),
    Vertex::new(SQUARE_EXTENT, SQUARE_EXTENT),
    Vertex::new(-SQUARE_EXTENT, SQUARE_EXTENT),
];

pub const VERTEX_COUNT: u32 = UNIT_SQUARE.len() as u32;

/// Byte length of the vertex buffer.
pub const VERTEX_BUFFER_SIZE: u64 = std::mem::size_of::<[Vertex; 6]>() as u64;

/// Byte length of the grid uniform (`vec2f`).
pub const UNIFORM_BUFFER_SIZE: u64 = std::mem::size_of::<[f32; 2]>() as u64;

/// Byte length of the cell-state storage buffer: one `u32` per cell.
#[inline]
pub fn storage_buffer_size(dims: GridDims) -> u64 {
    dims.cell_count() as u64 * std::mem::size_of::<u32>() as u64
}
