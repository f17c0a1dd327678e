//! Lit body pipeline: Phong shading with diffuse and specular maps.
//!
//! Bind groups: camera at group 0, model transform at group 1, point light at
//! group 2, material (textures + shininess) at group 3. Front faces are
//! counter-clockwise and back faces are culled, matching the sphere mesher's
//! outward winding.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::buffer::{BodyVertex, MeshBuffer};
use crate::light::PointLightUniform;

/// Model uniform: the body's world transform. 64 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Wrap a glam matrix for upload.
    pub fn from_matrix(model: glam::Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

/// Render pipeline for lit, textured celestial bodies.
pub struct BodyPipeline {
    /// The underlying wgpu render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Camera uniform layout (group 0).
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    /// Model uniform layout (group 1).
    pub model_bind_group_layout: wgpu::BindGroupLayout,
    /// Point light uniform layout (group 2).
    pub light_bind_group_layout: wgpu::BindGroupLayout,
}

impl BodyPipeline {
    /// Create the body pipeline.
    ///
    /// `material_bind_group_layout` is [`TextureSet::bind_group_layout`]
    /// (group 3).
    ///
    /// [`TextureSet::bind_group_layout`]: crate::texture::TextureSet::bind_group_layout
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        material_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("body-camera-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(80), // CameraUniform: mat4x4 + vec4
                    },
                    count: None,
                }],
            });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("body-model-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(64), // mat4x4<f32>
                    },
                    count: None,
                }],
            });

        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("body-light-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<PointLightUniform>() as u64
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("body-pipeline-layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &model_bind_group_layout,
                &light_bind_group_layout,
                material_bind_group_layout,
            ],
            immediate_size: 0,
        });

        let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("body-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[BodyVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None, // opaque
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_bind_group_layout,
            model_bind_group_layout,
            light_bind_group_layout,
        }
    }
}

/// Draw one lit body.
pub fn draw_body<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &BodyPipeline,
    camera_bind_group: &'a wgpu::BindGroup,
    model_bind_group: &'a wgpu::BindGroup,
    light_bind_group: &'a wgpu::BindGroup,
    material_bind_group: &'a wgpu::BindGroup,
    mesh: &'a MeshBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, camera_bind_group, &[]);
    render_pass.set_bind_group(1, model_bind_group, &[]);
    render_pass.set_bind_group(2, light_bind_group, &[]);
    render_pass.set_bind_group(3, material_bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

/// WGSL source for the body shader: Phong ambient/diffuse/specular with the
/// specular map masking highlights (oceans shine, continents stay matte).
pub const BODY_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
};

struct PointLight {
    position: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
};

struct Material {
    shininess: f32,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> model: mat4x4<f32>;

@group(2) @binding(0)
var<uniform> light: PointLight;

@group(3) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(3) @binding(1)
var t_specular: texture_2d<f32>;
@group(3) @binding(2)
var s_material: sampler;
@group(3) @binding(3)
var<uniform> material: Material;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = model * vec4<f32>(in.position, 1.0);
    out.world_pos = world.xyz;
    // Uniform scale only, so the upper 3x3 of the model matrix is fine
    // for normals.
    out.world_normal = (model * vec4<f32>(in.normal, 0.0)).xyz;
    out.uv = in.uv;
    out.clip_position = camera.view_proj * world;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let albedo = textureSample(t_diffuse, s_material, in.uv).rgb;
    let spec_mask = textureSample(t_specular, s_material, in.uv).rgb;

    // Interpolation denormalizes; renormalize before lighting.
    let normal = normalize(in.world_normal);
    let light_dir = normalize(light.position.xyz - in.world_pos);
    let view_dir = normalize(camera.camera_pos.xyz - in.world_pos);
    let reflect_dir = reflect(-light_dir, normal);

    let ambient = light.ambient.rgb * albedo;
    let diff = max(dot(normal, light_dir), 0.0);
    let diffuse = light.diffuse.rgb * diff * albedo;
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), material.shininess);
    let specular = light.specular.rgb * spec * spec_mask;

    return vec4<f32>(ambient + diffuse + specular, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_uniform_is_64_bytes() {
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
    }

    #[test]
    fn test_model_uniform_roundtrips_matrix() {
        let m = glam::Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let uniform = ModelUniform::from_matrix(m);
        assert_eq!(glam::Mat4::from_cols_array_2d(&uniform.model), m);
    }

    #[test]
    fn test_shader_declares_entry_points() {
        assert!(BODY_SHADER_SOURCE.contains("fn vs_main"));
        assert!(BODY_SHADER_SOURCE.contains("fn fs_main"));
    }

    #[test]
    fn test_shader_samples_both_maps() {
        assert!(BODY_SHADER_SOURCE.contains("t_diffuse"));
        assert!(BODY_SHADER_SOURCE.contains("t_specular"));
    }
}
