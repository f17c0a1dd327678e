//! Keyboard state accumulated over a frame.
//!
//! Tracks physical (scan-code) keys so WASD flight works the same on any
//! keyboard layout. Forward every winit [`KeyEvent`] to
//! [`process_event`](KeyboardState::process_event), query with the accessors,
//! and call [`clear_transients`](KeyboardState::clear_transients) at the end
//! of each frame.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Held / just-pressed / just-released key sets for the current frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
    just_released: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state from a winit key event. OS key-repeat events are ignored
    /// so `just_pressed` fires once per physical press.
    pub fn process_event(&mut self, event: &KeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => self.press(event.physical_key),
            ElementState::Released => self.release(event.physical_key),
        }
    }

    /// Record a key press directly. winit's `KeyEvent` cannot be constructed
    /// outside winit, so synthetic input (tests, scripted playback) enters
    /// here.
    pub fn press(&mut self, key: PhysicalKey) {
        self.pressed.insert(key);
        self.just_pressed.insert(key);
    }

    /// Record a key release directly; counterpart of [`press`](Self::press).
    pub fn release(&mut self, key: PhysicalKey) {
        self.pressed.remove(&key);
        self.just_released.insert(key);
    }

    /// `true` while the key is held.
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    /// `true` only on the frame the key went down.
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key)
    }

    /// `true` only on the frame the key came up.
    pub fn just_released(&self, key: PhysicalKey) -> bool {
        self.just_released.contains(&key)
    }

    /// Clear the per-frame transition sets. Call once at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn key(code: KeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn test_press_sets_held_and_just_pressed() {
        let mut kb = KeyboardState::new();
        kb.press(key(KeyCode::KeyW));
        assert!(kb.is_pressed(key(KeyCode::KeyW)));
        assert!(kb.just_pressed(key(KeyCode::KeyW)));
        assert!(!kb.just_released(key(KeyCode::KeyW)));
    }

    #[test]
    fn test_clear_transients_keeps_held() {
        let mut kb = KeyboardState::new();
        kb.press(key(KeyCode::KeyA));
        kb.clear_transients();
        assert!(kb.is_pressed(key(KeyCode::KeyA)));
        assert!(!kb.just_pressed(key(KeyCode::KeyA)));
    }

    #[test]
    fn test_release_clears_held_sets_just_released() {
        let mut kb = KeyboardState::new();
        kb.press(key(KeyCode::Space));
        kb.clear_transients();
        kb.release(key(KeyCode::Space));
        assert!(!kb.is_pressed(key(KeyCode::Space)));
        assert!(kb.just_released(key(KeyCode::Space)));
    }

    #[test]
    fn test_release_without_press_is_harmless() {
        let mut kb = KeyboardState::new();
        kb.release(key(KeyCode::KeyQ));
        assert!(!kb.is_pressed(key(KeyCode::KeyQ)));
        assert!(kb.just_released(key(KeyCode::KeyQ)));
    }

    #[test]
    fn test_unpressed_key_reports_false() {
        let kb = KeyboardState::new();
        assert!(!kb.is_pressed(key(KeyCode::Escape)));
        assert!(!kb.just_pressed(key(KeyCode::Escape)));
        assert!(!kb.just_released(key(KeyCode::Escape)));
    }
}
