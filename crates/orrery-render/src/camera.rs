//! Camera view and projection matrix generation.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Camera uniform: view-projection matrix plus world-space camera position
/// for specular shading. 80 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = camera position, w unused.
    pub camera_pos: [f32; 4],
}

/// A perspective camera producing view and projection matrices.
///
/// Projection uses reverse-Z (near plane at depth 1, far plane at depth 0)
/// to keep depth precision usable across the scene's distance spread.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space position.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height of the viewport.
    pub aspect_ratio: f32,
    /// Near clip plane distance (positive).
    pub near: f32,
    /// Far clip plane distance (positive, > near).
    pub far: f32,
}

impl Camera {
    /// Compute the view matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = Mat4::from_quat(self.rotation);
        let translation = Mat4::from_translation(self.position);
        (translation * rotation).inverse()
    }

    /// Compute the reverse-Z perspective projection matrix. Near/far are
    /// swapped in the call, which is what maps near to depth 1.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Forward direction (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Up direction (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Right direction (+X in camera space).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Update the aspect ratio from viewport dimensions.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Build the GPU uniform for this camera.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [self.position.x, self.position.y, self.position.z, 0.0],
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 16.0 / 9.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_uniform_is_80_bytes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn test_identity_camera_looks_down_neg_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!(forward.y.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_basis_vectors_are_orthonormal() {
        let camera = Camera {
            rotation: Quat::from_euler(glam::EulerRot::YXZ, 0.7, -0.3, 0.0),
            ..Camera::default()
        };
        let f = camera.forward();
        let u = camera.up();
        let r = camera.right();

        assert!((f.length() - 1.0).abs() < 1e-6);
        assert!((u.length() - 1.0).abs() < 1e-6);
        assert!((r.length() - 1.0).abs() < 1e-6);
        assert!(f.dot(u).abs() < 1e-6);
        assert!(f.dot(r).abs() < 1e-6);
        assert!(u.dot(r).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_inverse_recovers_position() {
        let camera = Camera {
            position: Vec3::new(5.0, -3.0, 12.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Camera::default()
        };
        let reconstructed = camera.view_matrix().inverse().col(3).truncate();
        assert!((reconstructed - camera.position).length() < 1e-4);
    }

    #[test]
    fn test_reverse_z_maps_near_to_one() {
        let camera = Camera {
            near: 0.5,
            far: 100.0,
            ..Camera::default()
        };
        let proj = camera.projection_matrix();

        // A point on the near plane projects to depth 1, a far point to ~0.
        let near_point = proj * glam::Vec4::new(0.0, 0.0, -0.5, 1.0);
        assert!((near_point.z / near_point.w - 1.0).abs() < 1e-4);

        let far_point = proj * glam::Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((far_point.z / far_point.w).abs() < 1e-4);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);

        // Zero height must not poison the ratio.
        camera.set_aspect_ratio(1920.0, 0.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_carries_position() {
        let camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..Camera::default()
        };
        let uniform = camera.to_uniform();
        assert_eq!(uniform.camera_pos, [1.0, 2.0, 3.0, 0.0]);
    }
}
