//! Procedural UV-sphere meshes: lat/long tessellation, seam and pole handling, and index stitching.

mod interleave;
mod sphere;
mod stitch;

pub use interleave::interleave;
pub use sphere::{MeshError, SphereMesh};
pub use stitch::{index_count, triangle_winds_outward, triangulate, vertex_count};
