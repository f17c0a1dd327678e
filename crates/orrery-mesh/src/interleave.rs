//! Interleaved vertex export for fixed-stride GPU layouts.

use crate::sphere::SphereMesh;

/// Flatten a mesh into one buffer with per-vertex attributes concatenated in
/// fixed order: position (3 floats), then normal (3) if requested, then
/// texture coordinate (2) if requested.
///
/// With both attribute sets enabled the stride is 8 floats, matching a
/// position+normal+uv vertex layout. The buffer is re-derived from the mesh
/// on every call; nothing is cached.
pub fn interleave(mesh: &SphereMesh, include_normals: bool, include_tex_coords: bool) -> Vec<f32> {
    let mut stride = 3;
    if include_normals {
        stride += 3;
    }
    if include_tex_coords {
        stride += 2;
    }

    let mut buffer = Vec::with_capacity(mesh.positions.len() * stride);
    for i in 0..mesh.positions.len() {
        buffer.extend_from_slice(&mesh.positions[i].to_array());
        if include_normals {
            buffer.extend_from_slice(&mesh.normals[i].to_array());
        }
        if include_tex_coords {
            buffer.extend_from_slice(&mesh.tex_coords[i]);
        }
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn small_mesh() -> SphereMesh {
        SphereMesh::generate(1.0, 4, 2, Vec3::ZERO).unwrap()
    }

    #[test]
    fn test_full_stride_is_eight_floats() {
        let mesh = small_mesh();
        let buffer = interleave(&mesh, true, true);
        assert_eq!(buffer.len(), mesh.vertex_count() * 8);
    }

    #[test]
    fn test_position_only_stride() {
        let mesh = small_mesh();
        assert_eq!(interleave(&mesh, false, false).len(), mesh.vertex_count() * 3);
        assert_eq!(interleave(&mesh, true, false).len(), mesh.vertex_count() * 6);
        assert_eq!(interleave(&mesh, false, true).len(), mesh.vertex_count() * 5);
    }

    #[test]
    fn test_attribute_order_within_vertex() {
        let mesh = small_mesh();
        let buffer = interleave(&mesh, true, true);
        for (i, pos) in mesh.positions.iter().enumerate() {
            let base = i * 8;
            assert_eq!(&buffer[base..base + 3], &pos.to_array());
            assert_eq!(&buffer[base + 3..base + 6], &mesh.normals[i].to_array());
            assert_eq!(&buffer[base + 6..base + 8], &mesh.tex_coords[i]);
        }
    }

    #[test]
    fn test_interleave_is_pure() {
        let mesh = small_mesh();
        let a = interleave(&mesh, true, true);
        let b = interleave(&mesh, true, true);
        assert_eq!(a, b);
    }
}
