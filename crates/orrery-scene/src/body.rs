//! Celestial body descriptions and world placement.
//!
//! Meshes come out of the generator as unit spheres with poles on ±Z; each
//! body's model matrix scales to its radius, stands the pole axis up onto
//! world +Y, applies the accumulated spin about that axis, and translates to
//! the body's position. Placement lives entirely in the transform so one
//! generated mesh per resolution serves any body.

use glam::{Mat4, Quat, Vec3};

use orrery_render::PointLight;

/// One celestial body: geometry resolution, placement, spin, and material.
#[derive(Debug, Clone)]
pub struct Body {
    /// Body name; doubles as the material key for texture lookup.
    pub name: &'static str,
    /// Sphere radius in world units.
    pub radius: f32,
    /// Longitude subdivisions for mesh generation.
    pub sector_count: u32,
    /// Latitude subdivisions for mesh generation.
    pub stack_count: u32,
    /// World-space center position.
    pub position: Vec3,
    /// Rotation about the body's own axis, radians per second.
    pub spin_rate: f32,
    /// Phong shininess exponent for the body's material.
    pub shininess: f32,
    /// Whether the body emits light (drawn with the sun pipeline, unlit).
    pub emissive: bool,
}

impl Body {
    /// Compose the model matrix for the given accumulated spin angle.
    ///
    /// Order: scale to radius, tilt the mesh's +Z pole onto world +Y, spin
    /// about world +Y, translate into place.
    pub fn model_matrix(&self, spin_angle: f32) -> Mat4 {
        let upright = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        let spin = Quat::from_rotation_y(spin_angle);
        Mat4::from_translation(self.position)
            * Mat4::from_quat(spin * upright)
            * Mat4::from_scale(Vec3::splat(self.radius))
    }
}

/// The orbital scene: its bodies plus the light they share.
#[derive(Debug, Clone)]
pub struct SceneDef {
    /// Bodies in draw order.
    pub bodies: Vec<Body>,
    /// The scene's point light, co-located with the sun.
    pub light: PointLight,
}

impl SceneDef {
    /// The sun-and-earth scene.
    ///
    /// Sun at the origin, emissive, also the light source; earth off on the
    /// orbital plane with a day-length spin. Tessellation resolutions are
    /// passed in from configuration.
    pub fn sun_and_earth(sector_count: u32, stack_count: u32) -> Self {
        let sun_position = Vec3::ZERO;
        let bodies = vec![
            Body {
                name: "sun",
                radius: 2.0,
                sector_count,
                stack_count,
                position: sun_position,
                spin_rate: 0.05,
                shininess: 1.0,
                emissive: true,
            },
            Body {
                name: "earth",
                radius: 1.0,
                sector_count,
                stack_count,
                position: Vec3::new(6.0, 0.0, 0.0),
                spin_rate: 0.4,
                shininess: 32.0,
                emissive: false,
            },
        ];

        let light = PointLight {
            position: sun_position,
            ..PointLight::default()
        };

        Self { bodies, light }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_matrix_places_center() {
        let body = Body {
            name: "earth",
            radius: 1.0,
            sector_count: 8,
            stack_count: 4,
            position: Vec3::new(6.0, 1.0, -2.0),
            spin_rate: 0.4,
            shininess: 32.0,
            emissive: false,
        };
        let m = body.model_matrix(1.234);
        let center = m.transform_point3(Vec3::ZERO);
        assert!((center - body.position).length() < 1e-6);
    }

    #[test]
    fn test_model_matrix_scales_radius() {
        let body = Body {
            name: "sun",
            radius: 2.5,
            sector_count: 8,
            stack_count: 4,
            position: Vec3::ZERO,
            spin_rate: 0.0,
            shininess: 1.0,
            emissive: true,
        };
        // A unit-sphere surface point must land at `radius` from the center.
        let m = body.model_matrix(0.0);
        let surface = m.transform_point3(Vec3::X);
        assert!((surface.length() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_pole_axis_stands_on_world_y() {
        let body = Body {
            name: "earth",
            radius: 1.0,
            sector_count: 8,
            stack_count: 4,
            position: Vec3::ZERO,
            spin_rate: 0.4,
            shininess: 32.0,
            emissive: false,
        };
        // The mesh's +Z north pole maps to world +Y regardless of spin.
        for angle in [0.0, 0.7, 2.0, -1.3] {
            let m = body.model_matrix(angle);
            let pole = m.transform_point3(Vec3::Z);
            assert!(
                (pole - Vec3::Y).length() < 1e-5,
                "pole drifted to {pole:?} at spin {angle}"
            );
        }
    }

    #[test]
    fn test_spin_rotates_equator_only() {
        let body = Body {
            name: "earth",
            radius: 1.0,
            sector_count: 8,
            stack_count: 4,
            position: Vec3::ZERO,
            spin_rate: 0.4,
            shininess: 32.0,
            emissive: false,
        };
        let equator_point = Vec3::X; // on the mesh equator
        let before = body.model_matrix(0.0).transform_point3(equator_point);
        let after = body
            .model_matrix(std::f32::consts::FRAC_PI_2)
            .transform_point3(equator_point);
        assert!((before - after).length() > 0.5, "equator point did not move");
        // Still on the sphere surface and still at equator height.
        assert!((after.length() - 1.0).abs() < 1e-5);
        assert!(after.y.abs() < 1e-5);
    }

    #[test]
    fn test_sun_and_earth_scene_shape() {
        let scene = SceneDef::sun_and_earth(36, 18);
        assert_eq!(scene.bodies.len(), 2);

        let sun = &scene.bodies[0];
        assert_eq!(sun.name, "sun");
        assert!(sun.emissive);
        assert_eq!(sun.position, Vec3::ZERO);

        let earth = &scene.bodies[1];
        assert_eq!(earth.name, "earth");
        assert!(!earth.emissive);
        assert!(earth.position.length() > sun.radius + earth.radius);
    }

    #[test]
    fn test_light_sits_at_sun() {
        let scene = SceneDef::sun_and_earth(36, 18);
        assert_eq!(scene.light.position, scene.bodies[0].position);
    }

    #[test]
    fn test_scene_propagates_tessellation() {
        let scene = SceneDef::sun_and_earth(72, 36);
        for body in &scene.bodies {
            assert_eq!(body.sector_count, 72);
            assert_eq!(body.stack_count, 36);
        }
    }
}
