//! Scene description: celestial bodies, the sun light, and the fly camera.

pub mod body;
pub mod fly_camera;

pub use body::{Body, SceneDef};
pub use fly_camera::FlyCamera;
