//! Frame-coherent input state: keyboard and mouse trackers over winit events.

pub mod keyboard;
pub mod mouse;

pub use keyboard::KeyboardState;
pub use mouse::MouseState;
