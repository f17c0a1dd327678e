//! Material textures: a diffuse/specular map pair uploaded as one bind group.

use bytemuck::{Pod, Zeroable};

/// Errors from texture upload.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Pixel data length does not match width × height × 4.
    #[error("texture data size {actual} does not match expected {expected} for {width}x{height}")]
    DataSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },

    /// Width or height is zero.
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}

/// Material uniform: Phong shininess exponent, padded to 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MaterialUniform {
    pub shininess: f32,
    pub _padding: [f32; 3],
}

/// A body's material: diffuse map, specular map, shared sampler, and the
/// shininess uniform, pre-bound as bind group 3 of the body pipeline.
///
/// The sun pipeline reuses the same layout and simply ignores the specular
/// map and shininess.
pub struct TextureSet {
    pub diffuse: wgpu::Texture,
    pub specular: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub dimensions: (u32, u32),
}

impl TextureSet {
    /// The material bind group layout: diffuse view, specular view, sampler,
    /// material uniform.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<MaterialUniform>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        })
    }

    /// Upload a diffuse/specular RGBA8 pair and build the material bind group.
    ///
    /// `name` labels the GPU objects (e.g. "earth"). Diffuse is uploaded as
    /// sRGB, the specular mask as linear. Both images must share `width` ×
    /// `height` and carry exactly `width * height * 4` bytes.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        name: &str,
        diffuse_rgba: &[u8],
        specular_rgba: &[u8],
        width: u32,
        height: u32,
        shininess: f32,
    ) -> Result<Self, TextureError> {
        validate(diffuse_rgba, width, height)?;
        validate(specular_rgba, width, height)?;

        let diffuse = upload_rgba8(
            device,
            queue,
            &format!("{name}-diffuse"),
            diffuse_rgba,
            width,
            height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let specular = upload_rgba8(
            device,
            queue,
            &format!("{name}-specular"),
            specular_rgba,
            width,
            height,
            wgpu::TextureFormat::Rgba8Unorm,
        );

        let diffuse_view = diffuse.create_view(&wgpu::TextureViewDescriptor::default());
        let specular_view = specular.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{name}-sampler")),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let material = MaterialUniform {
            shininess,
            _padding: [0.0; 3],
        };
        let material_buffer = {
            use wgpu::util::DeviceExt;
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name}-material")),
                contents: bytemuck::bytes_of(&material),
                usage: wgpu::BufferUsages::UNIFORM,
            })
        };

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{name}-material-bg")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&diffuse_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&specular_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: material_buffer.as_entire_binding(),
                },
            ],
        });

        Ok(Self {
            diffuse,
            specular,
            bind_group,
            dimensions: (width, height),
        })
    }
}

fn validate(data: &[u8], width: u32, height: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }
    let expected = (width as usize) * (height as usize) * 4;
    if data.len() != expected {
        return Err(TextureError::DataSizeMismatch {
            actual: data.len(),
            expected,
            width,
            height,
        });
    }
    Ok(())
}

fn upload_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    data: &[u8],
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
) -> wgpu::Texture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: None,
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    texture
}
