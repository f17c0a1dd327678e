//! UV-sphere vertex generation.
//!
//! Sweeps a latitude/longitude grid over the sphere: `stack_count + 1` rings
//! from the north pole down to the south pole, each ring holding
//! `sector_count + 1` vertices. The last column of every ring duplicates the
//! first in position but carries `s = 1.0` instead of `s = 0.0`, so an
//! equirectangular texture does not wrap or pinch at the seam.

use glam::Vec3;

use crate::stitch::{index_count, triangulate, vertex_count};

/// Errors produced when sphere generation parameters are out of range.
///
/// Generation either fully succeeds or fails before any output is produced;
/// there is no partial mesh state.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MeshError {
    /// Radius must be a positive, finite number.
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// Fewer than 3 sectors cannot enclose the axis.
    #[error("sector count must be at least 3, got {0}")]
    InvalidSectorCount(u32),

    /// Fewer than 2 stacks cannot span both poles.
    #[error("stack count must be at least 2, got {0}")]
    InvalidStackCount(u32),
}

/// An immutable triangulated UV-sphere.
///
/// `positions[i]`, `normals[i]`, and `tex_coords[i]` describe the same
/// logical vertex for every `i`. Vertices are laid out row-major: the vertex
/// at stack ring `row` and sector column `col` sits at index
/// `row * (sector_count + 1) + col`. All data is produced once by
/// [`generate`](Self::generate) and never mutated, so shared references may
/// be read from any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    /// Sphere radius the mesh was generated with.
    pub radius: f32,
    /// Sphere center the mesh was generated around.
    pub center: Vec3,
    /// Number of longitude subdivisions.
    pub sector_count: u32,
    /// Number of latitude subdivisions.
    pub stack_count: u32,
    /// Vertex positions, `(stack_count + 1) * (sector_count + 1)` entries.
    pub positions: Vec<Vec3>,
    /// Unit outward radial normals, index-matched with `positions`.
    pub normals: Vec<Vec3>,
    /// Texture coordinates in `[0, 1]²`, index-matched with `positions`.
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle list indices into the vertex arrays.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Generate a sphere mesh from a radius, tessellation resolution, and center.
    ///
    /// `sector_count` subdivides longitude (0 to 2π), `stack_count` subdivides
    /// latitude (north pole to south pole). The result is deterministic:
    /// identical inputs produce bit-for-bit identical output.
    pub fn generate(
        radius: f32,
        sector_count: u32,
        stack_count: u32,
        center: Vec3,
    ) -> Result<Self, MeshError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(MeshError::InvalidRadius(radius));
        }
        if sector_count < 3 {
            return Err(MeshError::InvalidSectorCount(sector_count));
        }
        if stack_count < 2 {
            return Err(MeshError::InvalidStackCount(stack_count));
        }

        let count = vertex_count(sector_count, stack_count);
        let mut positions = Vec::with_capacity(count);
        let mut normals = Vec::with_capacity(count);
        let mut tex_coords = Vec::with_capacity(count);

        let stack_step = std::f32::consts::PI / stack_count as f32;
        let sector_step = std::f32::consts::TAU / sector_count as f32;
        let inv_radius = 1.0 / radius;

        for i in 0..=stack_count {
            // pi/2 at the north pole, -pi/2 at the south pole
            let stack_angle = std::f32::consts::FRAC_PI_2 - i as f32 * stack_step;
            let ring_radius = radius * stack_angle.cos();
            let z = radius * stack_angle.sin();

            for j in 0..=sector_count {
                let sector_angle = j as f32 * sector_step;
                let local = Vec3::new(
                    ring_radius * sector_angle.cos(),
                    ring_radius * sector_angle.sin(),
                    z,
                );

                positions.push(local + center);
                // Unit length by construction; the shader still re-normalizes
                // after interpolation.
                normals.push(local * inv_radius);
                tex_coords.push([
                    j as f32 / sector_count as f32,
                    i as f32 / stack_count as f32,
                ]);
            }
        }

        let indices = triangulate(sector_count, stack_count);
        debug_assert_eq!(positions.len(), count);
        debug_assert_eq!(indices.len(), index_count(sector_count, stack_count));

        Ok(Self {
            radius,
            center,
            sector_count,
            stack_count,
            positions,
            normals,
            tex_coords,
            indices,
        })
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
