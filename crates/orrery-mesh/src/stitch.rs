//! Index stitching for the UV-sphere grid.
//!
//! Between two adjacent stack rings, each sector column spans a quad. Interior
//! quads split into two triangles; in the two pole rows the triangle touching
//! the pole collapses to zero area (all pole vertices of a ring coincide), so
//! exactly one triangle per sector is emitted there. Winding is
//! counter-clockwise when viewed from outside the sphere; the renderer culls
//! back faces under that assumption.

use glam::Vec3;

/// Number of vertices the grid produces, seam column included.
pub fn vertex_count(sector_count: u32, stack_count: u32) -> usize {
    (stack_count as usize + 1) * (sector_count as usize + 1)
}

/// Number of indices [`triangulate`] emits: `3 * 2 * sectors * (stacks - 1)`.
pub fn index_count(sector_count: u32, stack_count: u32) -> usize {
    6 * sector_count as usize * (stack_count as usize - 1)
}

/// Emit the triangle list for a `sector_count` × `stack_count` sphere grid.
///
/// For the quad at ring `i`, column `j`:
/// `k1 = i * (sector_count + 1) + j` is its top-left vertex and
/// `k2 = k1 + sector_count + 1` the vertex directly below. The upper
/// triangle `(k1, k2, k1 + 1)` is skipped on the north pole row, the lower
/// triangle `(k1 + 1, k2, k2 + 1)` on the south pole row.
pub fn triangulate(sector_count: u32, stack_count: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(index_count(sector_count, stack_count));
    let cols = sector_count + 1;

    for i in 0..stack_count {
        let mut k1 = i * cols;
        let mut k2 = k1 + cols;

        for _ in 0..sector_count {
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stack_count - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    indices
}

/// Check that a triangle's face normal points away from `center`.
///
/// The cross product of the edges gives the face normal; a positive dot
/// product with the centroid-from-center direction means the winding reads
/// counter-clockwise from outside.
pub fn triangle_winds_outward(v0: Vec3, v1: Vec3, v2: Vec3, center: Vec3) -> bool {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0 - center;
    face_normal.dot(centroid) > 0.0
}
