//! Vertex and index buffer creation for the sphere meshes.

use bytemuck::{Pod, Zeroable};
use orrery_mesh::{SphereMesh, interleave};

/// Vertex and index buffers for one mesh, ready for indexed drawing.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl MeshBuffer {
    /// Bind vertex and index buffers to a render pass.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw the entire mesh with one indexed draw call.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Index data in either 16- or 32-bit width.
pub enum IndexData<'a> {
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl IndexData<'_> {
    /// The matching wgpu index format.
    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    /// Number of indices.
    pub fn count(&self) -> u32 {
        match self {
            IndexData::U16(data) => data.len() as u32,
            IndexData::U32(data) => data.len() as u32,
        }
    }

    /// Raw bytes for buffer creation.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(data) => bytemuck::cast_slice(data),
            IndexData::U32(data) => bytemuck::cast_slice(data),
        }
    }
}

/// Explicit-ownership GPU buffer creation.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    /// Create an allocator borrowing the device.
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Upload a generated sphere as an interleaved position+normal+uv vertex
    /// buffer and a u32 index buffer.
    pub fn create_sphere(&self, label: &str, mesh: &SphereMesh) -> MeshBuffer {
        let vertices = interleave(mesh, true, true);
        self.create_mesh(
            label,
            bytemuck::cast_slice(&vertices),
            IndexData::U32(&mesh.indices),
        )
    }

    /// Create a mesh buffer from raw vertex bytes and index data.
    pub fn create_mesh(&self, label: &str, vertices: &[u8], indices: IndexData) -> MeshBuffer {
        use wgpu::util::DeviceExt;

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-vertices")),
                contents: vertices,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });

        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-indices")),
                contents: indices.as_bytes(),
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: indices.count(),
            index_format: indices.format(),
        }
    }

    /// Create a uniform buffer initialized with `data`, COPY_DST for per-frame
    /// updates.
    pub fn create_uniform(&self, label: &str, data: &[u8]) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
    }
}

/// Vertex format for celestial bodies: position, normal, uv. The 32-byte
/// stride (8 floats) matches the mesher's fully interleaved export.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BodyVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl BodyVertex {
    /// Vertex buffer layout matching the body and sun shaders.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 3]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_mesh::SphereMesh;

    #[test]
    fn test_body_vertex_stride_is_32_bytes() {
        let layout = BodyVertex::layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
    }

    #[test]
    fn test_body_vertex_attribute_offsets() {
        let layout = BodyVertex::layout();
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[2].offset, 24);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[2].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn test_interleaved_sphere_fills_whole_vertices() {
        // The mesher's 8-float stride must reinterpret cleanly as BodyVertex.
        let mesh = SphereMesh::generate(1.0, 6, 3, Vec3::ZERO).unwrap();
        let floats = orrery_mesh::interleave(&mesh, true, true);
        let vertices: &[BodyVertex] = bytemuck::cast_slice(&floats);
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(vertices[0].position, mesh.positions[0].to_array());
        assert_eq!(vertices[0].normal, mesh.normals[0].to_array());
        assert_eq!(vertices[0].uv, mesh.tex_coords[0]);
    }

    #[test]
    fn test_index_data_format_and_bytes() {
        let u16_data = IndexData::U16(&[0, 1, 2]);
        assert_eq!(u16_data.format(), wgpu::IndexFormat::Uint16);
        assert_eq!(u16_data.count(), 3);
        assert_eq!(u16_data.as_bytes().len(), 6);

        let u32_data = IndexData::U32(&[0, 1, 2, 3]);
        assert_eq!(u32_data.format(), wgpu::IndexFormat::Uint32);
        assert_eq!(u32_data.count(), 4);
        assert_eq!(u32_data.as_bytes().len(), 16);
    }
}
