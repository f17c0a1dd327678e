//! Point light: the sun as a positional light source.
//!
//! [`PointLight`] is the CPU-side description; [`PointLightUniform`] is the
//! GPU-side representation written to a uniform buffer each frame and bound
//! at `@group(2) @binding(0)` of the body pipeline.

use bytemuck::{Pod, Zeroable};

/// CPU-side point light description with classic ambient/diffuse/specular
/// color terms.
#[derive(Clone, Debug)]
pub struct PointLight {
    /// World-space light position.
    pub position: glam::Vec3,
    /// Ambient contribution (linear RGB).
    pub ambient: glam::Vec3,
    /// Diffuse contribution (linear RGB).
    pub diffuse: glam::Vec3,
    /// Specular contribution (linear RGB).
    pub specular: glam::Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: glam::Vec3::ZERO,
            ambient: glam::Vec3::splat(0.2),
            diffuse: glam::Vec3::splat(0.5),
            specular: glam::Vec3::splat(1.0),
        }
    }
}

impl PointLight {
    /// Build the GPU uniform from this light.
    pub fn to_uniform(&self) -> PointLightUniform {
        PointLightUniform {
            position: [self.position.x, self.position.y, self.position.z, 0.0],
            ambient: [self.ambient.x, self.ambient.y, self.ambient.z, 0.0],
            diffuse: [self.diffuse.x, self.diffuse.y, self.diffuse.z, 0.0],
            specular: [self.specular.x, self.specular.y, self.specular.z, 0.0],
        }
    }
}

/// GPU-side point light, 64 bytes, std140-compatible (four vec4s).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointLightUniform {
    /// xyz = position, w = padding.
    pub position: [f32; 4],
    /// xyz = ambient color, w = padding.
    pub ambient: [f32; 4],
    /// xyz = diffuse color, w = padding.
    pub diffuse: [f32; 4],
    /// xyz = specular color, w = padding.
    pub specular: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_64_bytes() {
        assert_eq!(std::mem::size_of::<PointLightUniform>(), 64);
    }

    #[test]
    fn test_uniform_field_packing() {
        let light = PointLight {
            position: glam::Vec3::new(1.0, 2.0, 3.0),
            ambient: glam::Vec3::new(0.1, 0.2, 0.3),
            diffuse: glam::Vec3::new(0.4, 0.5, 0.6),
            specular: glam::Vec3::new(0.7, 0.8, 0.9),
        };
        let uniform = light.to_uniform();
        assert_eq!(uniform.position, [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(uniform.ambient, [0.1, 0.2, 0.3, 0.0]);
        assert_eq!(uniform.diffuse, [0.4, 0.5, 0.6, 0.0]);
        assert_eq!(uniform.specular, [0.7, 0.8, 0.9, 0.0]);
    }

    #[test]
    fn test_default_light_has_full_specular() {
        let light = PointLight::default();
        assert_eq!(light.specular, glam::Vec3::ONE);
        assert!(light.ambient.x < light.diffuse.x);
    }
}
