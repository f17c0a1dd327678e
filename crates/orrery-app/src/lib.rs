//! Application host: window, event loop, asset loading, and frame pacing.

pub mod assets;
pub mod frame_timer;
pub mod window;
