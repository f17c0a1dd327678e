//! First-person fly camera: WASD movement, mouse look, scroll zoom.

use glam::{Quat, Vec3};
use winit::keyboard::{KeyCode, PhysicalKey};

use orrery_input::{KeyboardState, MouseState};
use orrery_render::Camera;

/// Pitch limit just short of straight up/down, in radians.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Free-flying camera controller.
///
/// Consumes keyboard and mouse state once per frame and maintains
/// yaw/pitch/position/fov; [`to_camera`](Self::to_camera) converts the
/// current pose into a renderable [`Camera`].
#[derive(Debug, Clone)]
pub struct FlyCamera {
    /// World-space position.
    pub position: Vec3,
    /// Heading around world +Y, radians. 0 looks down -Z.
    pub yaw: f32,
    /// Elevation, radians, clamped to ±89°.
    pub pitch: f32,
    /// Vertical field of view, radians; zoomed by the scroll wheel.
    pub fov_y: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Radians of rotation per pixel of mouse movement.
    pub mouse_sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 45.0_f32.to_radians(),
            speed: 4.0,
            mouse_sensitivity: 0.003,
        }
    }
}

impl FlyCamera {
    /// Minimum zoomed-in field of view.
    pub const MIN_FOV: f32 = 10.0 * std::f32::consts::PI / 180.0;
    /// Maximum zoomed-out field of view.
    pub const MAX_FOV: f32 = 100.0 * std::f32::consts::PI / 180.0;

    /// Advance the camera one frame.
    ///
    /// Mouse delta turns the view (only while the cursor is captured),
    /// scroll zooms, and WASD plus Space/Shift translate along the camera's
    /// own axes.
    pub fn update(&mut self, dt: f32, keyboard: &KeyboardState, mouse: &MouseState) {
        if mouse.is_captured() {
            let delta = mouse.delta();
            self.yaw -= delta.x * self.mouse_sensitivity;
            self.pitch = (self.pitch - delta.y * self.mouse_sensitivity)
                .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.fov_y = (self.fov_y - mouse.scroll() * 2.5_f32.to_radians())
            .clamp(Self::MIN_FOV, Self::MAX_FOV);

        let rotation = self.rotation();
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;
        let up = Vec3::Y;

        let mut dir = Vec3::ZERO;
        if keyboard.is_pressed(PhysicalKey::Code(KeyCode::KeyW)) {
            dir += forward;
        }
        if keyboard.is_pressed(PhysicalKey::Code(KeyCode::KeyS)) {
            dir -= forward;
        }
        if keyboard.is_pressed(PhysicalKey::Code(KeyCode::KeyD)) {
            dir += right;
        }
        if keyboard.is_pressed(PhysicalKey::Code(KeyCode::KeyA)) {
            dir -= right;
        }
        if keyboard.is_pressed(PhysicalKey::Code(KeyCode::Space)) {
            dir += up;
        }
        if keyboard.is_pressed(PhysicalKey::Code(KeyCode::ShiftLeft)) {
            dir -= up;
        }

        if dir.length_squared() > 1e-6 {
            self.position += dir.normalize() * self.speed * dt;
        }
    }

    /// Current orientation: yaw about world +Y, then pitch about camera +X.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Build a renderable camera for the given viewport aspect ratio.
    pub fn to_camera(&self, aspect_ratio: f32) -> Camera {
        Camera {
            position: self.position,
            rotation: self.rotation(),
            fov_y: self.fov_y,
            aspect_ratio,
            ..Camera::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_neg_z() {
        let cam = FlyCamera::default();
        let forward = cam.rotation() * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_forward_movement_follows_view() {
        let mut cam = FlyCamera {
            yaw: std::f32::consts::FRAC_PI_2, // facing -X
            ..FlyCamera::default()
        };
        let start = cam.position;
        let keyboard = pressed(KeyCode::KeyW);
        cam.update(1.0, &keyboard, &MouseState::new());
        let moved = cam.position - start;
        assert!(moved.x < -1.0, "expected movement along -X, got {moved:?}");
        assert!(moved.z.abs() < 1e-4);
    }

    #[test]
    fn test_vertical_movement_is_world_aligned() {
        let mut cam = FlyCamera {
            pitch: 0.5, // looking up must not tilt the climb
            ..FlyCamera::default()
        };
        let start = cam.position;
        let keyboard = pressed(KeyCode::Space);
        cam.update(1.0, &keyboard, &MouseState::new());
        let moved = cam.position - start;
        assert!(moved.y > 0.0);
        assert!(moved.x.abs() < 1e-6 && moved.z.abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamps_at_limit() {
        let mut cam = FlyCamera::default();
        cam.pitch = 10.0; // absurd input
        cam.pitch = cam.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        assert!(cam.pitch <= PITCH_LIMIT + 1e-6);
    }

    #[test]
    fn test_fov_zoom_clamps() {
        let mut cam = FlyCamera::default();
        cam.fov_y = 0.001;
        cam.fov_y = cam.fov_y.clamp(FlyCamera::MIN_FOV, FlyCamera::MAX_FOV);
        assert!((cam.fov_y - FlyCamera::MIN_FOV).abs() < 1e-6);

        cam.fov_y = 10.0;
        cam.fov_y = cam.fov_y.clamp(FlyCamera::MIN_FOV, FlyCamera::MAX_FOV);
        assert!((cam.fov_y - FlyCamera::MAX_FOV).abs() < 1e-6);
    }

    #[test]
    fn test_no_input_no_motion() {
        let mut cam = FlyCamera::default();
        let start = cam.position;
        let start_yaw = cam.yaw;
        cam.update(1.0 / 60.0, &KeyboardState::new(), &MouseState::new());
        assert_eq!(cam.position, start);
        assert_eq!(cam.yaw, start_yaw);
    }

    #[test]
    fn test_to_camera_copies_pose() {
        let cam = FlyCamera {
            position: Vec3::new(1.0, 2.0, 3.0),
            yaw: 0.4,
            pitch: -0.2,
            ..FlyCamera::default()
        };
        let render_cam = cam.to_camera(2.0);
        assert_eq!(render_cam.position, cam.position);
        assert_eq!(render_cam.aspect_ratio, 2.0);
        assert_eq!(render_cam.fov_y, cam.fov_y);
        let expected = cam.rotation() * Vec3::NEG_Z;
        assert!((render_cam.forward() - expected).length() < 1e-6);
    }

    /// Build a keyboard state with one key held.
    fn pressed(code: KeyCode) -> KeyboardState {
        let mut kb = KeyboardState::new();
        kb.press(PhysicalKey::Code(code));
        kb
    }
}
