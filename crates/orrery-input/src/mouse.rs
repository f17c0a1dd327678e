//! Mouse state accumulated over a frame.
//!
//! When the cursor is captured (fly-camera mode), look deltas come from raw
//! `DeviceEvent::MouseMotion` instead of `CursorMoved` position differences,
//! which keeps rotation smooth at the window edges.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Frame-coherent mouse state: position, delta, buttons, scroll, capture.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    scroll: f32,
    left_pressed: bool,
    right_pressed: bool,
    captured: bool,
}

impl MouseState {
    /// Create a zeroed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. Ignored for delta purposes while
    /// captured.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if !self.captured {
            self.delta += new_pos - self.position;
        }
        self.position = new_pos;
    }

    /// Process a raw `DeviceEvent::MouseMotion` delta. Only used while
    /// captured.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// Process a `MouseInput` event.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.left_pressed = pressed,
            MouseButton::Right => self.right_pressed = pressed,
            _ => {}
        }
    }

    /// Process a `MouseWheel` event. Pixel deltas are normalized to lines
    /// (~40 px per line).
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => self.scroll += y,
            MouseScrollDelta::PixelDelta(pos) => self.scroll += (pos.y / 40.0) as f32,
        }
    }

    /// Grab or release the cursor. Locked grab is preferred; Confined is the
    /// fallback for platforms without lock support.
    pub fn set_captured(&mut self, window: &winit::window::Window, captured: bool) {
        use winit::window::CursorGrabMode;
        self.captured = captured;
        if captured {
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                let _ = window.set_cursor_grab(CursorGrabMode::Confined);
            }
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
    }

    /// Last known cursor position in window coordinates.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Accumulated movement delta for this frame.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Accumulated scroll for this frame, in lines.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// `true` while the left button is held.
    pub fn left_pressed(&self) -> bool {
        self.left_pressed
    }

    /// `true` while the right button is held.
    pub fn right_pressed(&self) -> bool {
        self.right_pressed
    }

    /// Whether the cursor is currently captured.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Zero the per-frame delta and scroll accumulators. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }
}
