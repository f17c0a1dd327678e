//! Window and event loop handling via winit.
//!
//! [`OrreryApp`] implements winit's [`ApplicationHandler`]: the GPU context,
//! meshes, and textures are created on `resumed`, per-frame work happens on
//! `RedrawRequested`, and raw mouse motion arrives through `device_event`
//! while the cursor is captured.

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use orrery_config::Config;
use orrery_input::{KeyboardState, MouseState};
use orrery_mesh::{MeshError, SphereMesh};
use orrery_render::{
    BODY_SHADER_SOURCE, BodyPipeline, BufferAllocator, Camera, DepthBuffer, MeshBuffer,
    ModelUniform, RenderContext, SUN_SHADER_SOURCE, SunPipeline, SurfaceError, TextureError,
    TextureSet, draw_body, draw_sun, init_render_context_blocking,
};
use orrery_scene::{Body, FlyCamera, SceneDef};

use crate::assets::load_body_textures;
use crate::frame_timer::FrameTimer;

/// Errors during scene resource creation.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Sphere generation was handed invalid tessellation parameters.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Texture upload failed validation.
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Window attributes derived from the configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// GPU resources for one body.
struct BodyResources {
    body: Body,
    spin_angle: f32,
    mesh: MeshBuffer,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    textures: TextureSet,
}

/// All GPU-side scene state, created once on `resumed`.
struct SceneResources {
    body_pipeline: BodyPipeline,
    sun_pipeline: SunPipeline,
    depth: DepthBuffer,
    camera_buffer: wgpu::Buffer,
    body_camera_bind_group: wgpu::BindGroup,
    sun_camera_bind_group: wgpu::BindGroup,
    light_bind_group: wgpu::BindGroup,
    bodies: Vec<BodyResources>,
}

impl SceneResources {
    fn new(gpu: &RenderContext, config: &Config) -> Result<Self, InitError> {
        let device = &gpu.device;
        let scene = SceneDef::sun_and_earth(config.scene.sector_count, config.scene.stack_count);

        let body_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("body-shader"),
            source: wgpu::ShaderSource::Wgsl(BODY_SHADER_SOURCE.into()),
        });
        let sun_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sun-shader"),
            source: wgpu::ShaderSource::Wgsl(SUN_SHADER_SOURCE.into()),
        });

        // One material layout shared by both pipelines, so a body's texture
        // bind group is valid wherever the body is drawn.
        let material_layout = TextureSet::bind_group_layout(device);

        let body_pipeline = BodyPipeline::new(
            device,
            &body_shader,
            gpu.surface_format,
            Some(DepthBuffer::FORMAT),
            &material_layout,
        );
        let sun_pipeline = SunPipeline::new(
            device,
            &sun_shader,
            gpu.surface_format,
            Some(DepthBuffer::FORMAT),
            &material_layout,
        );

        let depth = DepthBuffer::new(device, gpu.surface_config.width, gpu.surface_config.height);

        let allocator = BufferAllocator::new(device);

        let camera_buffer = allocator.create_uniform(
            "camera-uniform",
            bytemuck::bytes_of(&Camera::default().to_uniform()),
        );
        let body_camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("body-camera-bg"),
            layout: &body_pipeline.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let sun_camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sun-camera-bg"),
            layout: &sun_pipeline.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let light_buffer = allocator.create_uniform(
            "light-uniform",
            bytemuck::bytes_of(&scene.light.to_uniform()),
        );
        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("light-bg"),
            layout: &body_pipeline.light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        let mut bodies = Vec::with_capacity(scene.bodies.len());
        for body in scene.bodies {
            // Unit sphere at the origin; radius and placement live in the
            // model transform.
            let sphere =
                SphereMesh::generate(1.0, body.sector_count, body.stack_count, glam::Vec3::ZERO)?;
            if config.debug.log_mesh_stats {
                info!(
                    "{}: {} vertices, {} triangles",
                    body.name,
                    sphere.vertex_count(),
                    sphere.triangle_count()
                );
            }
            let mesh = allocator.create_sphere(body.name, &sphere);

            let maps = load_body_textures(&config.scene.assets_dir, body.name);
            let textures = TextureSet::new(
                device,
                &gpu.queue,
                &material_layout,
                body.name,
                &maps.diffuse.pixels,
                &maps.specular.pixels,
                maps.diffuse.width,
                maps.diffuse.height,
                body.shininess,
            )?;

            let model_buffer = allocator.create_uniform(
                &format!("{}-model", body.name),
                bytemuck::bytes_of(&ModelUniform::from_matrix(body.model_matrix(0.0))),
            );
            let model_layout = if body.emissive {
                &sun_pipeline.model_bind_group_layout
            } else {
                &body_pipeline.model_bind_group_layout
            };
            let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{}-model-bg", body.name)),
                layout: model_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model_buffer.as_entire_binding(),
                }],
            });

            bodies.push(BodyResources {
                body,
                spin_angle: 0.0,
                mesh,
                model_buffer,
                model_bind_group,
                textures,
            });
        }

        Ok(Self {
            body_pipeline,
            sun_pipeline,
            depth,
            camera_buffer,
            body_camera_bind_group,
            sun_camera_bind_group,
            light_bind_group,
            bodies,
        })
    }
}

/// Application state driving the winit event loop.
pub struct OrreryApp {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    scene: Option<SceneResources>,
    keyboard: KeyboardState,
    mouse: MouseState,
    fly_camera: FlyCamera,
    timer: FrameTimer,
}

impl OrreryApp {
    /// Create the application from a loaded configuration.
    pub fn new(config: Config) -> Self {
        let fly_camera = FlyCamera {
            speed: config.input.move_speed,
            mouse_sensitivity: config.input.mouse_sensitivity,
            ..FlyCamera::default()
        };
        Self {
            config,
            window: None,
            gpu: None,
            scene: None,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            fly_camera,
            timer: FrameTimer::new(),
        }
    }

    /// Advance the simulation and draw one frame.
    fn redraw(&mut self) -> Result<(), SurfaceError> {
        let Some(gpu) = self.gpu.as_ref() else {
            return Ok(());
        };
        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };

        let dt = self.timer.tick();
        self.fly_camera.update(dt, &self.keyboard, &self.mouse);

        let camera = self.fly_camera.to_camera(gpu.aspect_ratio());
        gpu.queue.write_buffer(
            &scene.camera_buffer,
            0,
            bytemuck::bytes_of(&camera.to_uniform()),
        );

        for entry in &mut scene.bodies {
            entry.spin_angle += entry.body.spin_rate * dt;
            let model = ModelUniform::from_matrix(entry.body.model_matrix(entry.spin_angle));
            gpu.queue
                .write_buffer(&entry.model_buffer, 0, bytemuck::bytes_of(&model));
        }

        let frame = gpu.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &scene.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for entry in &scene.bodies {
                if entry.body.emissive {
                    draw_sun(
                        &mut pass,
                        &scene.sun_pipeline,
                        &scene.sun_camera_bind_group,
                        &entry.model_bind_group,
                        &entry.textures.bind_group,
                        &entry.mesh,
                    );
                } else {
                    draw_body(
                        &mut pass,
                        &scene.body_pipeline,
                        &scene.body_camera_bind_group,
                        &entry.model_bind_group,
                        &scene.light_bind_group,
                        &entry.textures.bind_group,
                        &entry.mesh,
                    );
                }
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.keyboard.clear_transients();
        self.mouse.clear_transients();
        Ok(())
    }
}

impl ApplicationHandler for OrreryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match init_render_context_blocking(window.clone()) {
            Ok(gpu) => gpu,
            Err(err) => {
                error!("Failed to initialize GPU: {err}");
                event_loop.exit();
                return;
            }
        };

        match SceneResources::new(&gpu, &self.config) {
            Ok(scene) => {
                info!(
                    "Scene ready: {} bodies at {}x{} tessellation",
                    scene.bodies.len(),
                    self.config.scene.sector_count,
                    self.config.scene.stack_count
                );
                self.scene = Some(scene);
            }
            Err(err) => {
                error!("Failed to build scene: {err}");
                event_loop.exit();
                return;
            }
        }

        self.mouse.set_captured(&window, true);
        self.window = Some(window);
        self.gpu = Some(gpu);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                    if let Some(scene) = self.scene.as_mut() {
                        scene.depth.resize(
                            &gpu.device,
                            gpu.surface_config.width,
                            gpu.surface_config.height,
                        );
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
                if self.keyboard.just_pressed(PhysicalKey::Code(KeyCode::Escape)) {
                    event_loop.exit();
                }
                if self.keyboard.just_pressed(PhysicalKey::Code(KeyCode::Tab))
                    && let Some(window) = self.window.as_ref()
                {
                    let capture = !self.mouse.is_captured();
                    self.mouse.set_captured(window, capture);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
                // Clicking back into the window recaptures the cursor.
                if state.is_pressed()
                    && !self.mouse.is_captured()
                    && let Some(window) = self.window.as_ref()
                {
                    self.mouse.set_captured(window, true);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
            }

            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(()) => {}
                Err(SurfaceError::Timeout) => warn!("Frame acquisition timed out, skipping"),
                Err(SurfaceError::Lost) => warn!("Surface lost, will retry next frame"),
                Err(SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory");
                    event_loop.exit();
                }
            },

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.mouse.on_raw_motion(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

/// Build the event loop and run the application to completion.
///
/// Continuous redraw is driven from `about_to_wait`, so no explicit control
/// flow mode is needed.
pub fn run(config: Config) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = OrreryApp::new(config);
    event_loop.run_app(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_attributes_follow_config() {
        let mut config = Config::default();
        config.window.width = 800;
        config.window.height = 600;
        config.window.title = "Orrery Test".to_string();

        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Orrery Test");
        match attrs.inner_size {
            Some(winit::dpi::Size::Logical(size)) => {
                assert_eq!(size.width, 800.0);
                assert_eq!(size.height, 600.0);
            }
            other => panic!("unexpected inner size {other:?}"),
        }
    }

    #[test]
    fn test_app_starts_without_window() {
        let app = OrreryApp::new(Config::default());
        assert!(app.window.is_none());
        assert!(app.gpu.is_none());
        assert!(app.scene.is_none());
    }

    #[test]
    fn test_fly_camera_takes_config_input_settings() {
        let mut config = Config::default();
        config.input.move_speed = 9.5;
        config.input.mouse_sensitivity = 0.01;
        let app = OrreryApp::new(config);
        assert_eq!(app.fly_camera.speed, 9.5);
        assert_eq!(app.fly_camera.mouse_sensitivity, 0.01);
    }

    #[test]
    fn test_init_error_wraps_mesh_error() {
        let err: InitError = MeshError::InvalidSectorCount(2).into();
        assert!(err.to_string().contains("sector count"));
    }
}
