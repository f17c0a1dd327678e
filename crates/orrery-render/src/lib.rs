//! wgpu rendering layer: GPU context, mesh/texture upload, camera matrices, and the body/sun pipelines.

pub mod body_pipeline;
pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod light;
pub mod sun_pipeline;
pub mod texture;

pub use body_pipeline::{BODY_SHADER_SOURCE, BodyPipeline, ModelUniform, draw_body};
pub use buffer::{BodyVertex, BufferAllocator, IndexData, MeshBuffer};
pub use camera::{Camera, CameraUniform};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use light::{PointLight, PointLightUniform};
pub use sun_pipeline::{SUN_SHADER_SOURCE, SunPipeline, draw_sun};
pub use texture::{MaterialUniform, TextureError, TextureSet};
