//! Interactive windowed viewer
//!
//! Owns the event loop and wires pointer input into the spin state, the
//! glide camera and face picking, drains the asset loader between frames,
//! and composites the egui layer over the rendered scene.

use crate::error::Result;
use crate::form::AccessForm;
use crate::loader::{spawn_loader, FaceSlots, LoaderEvent};
use crate::navigate::{Navigator, SystemNavigator};
use instant::Instant;
use log::{debug, error, info, warn};
use nalgebra::Vector2;
use spincube_core::{
    hit_test, Cuboid, FaceBindings, FaceHit, FaceIndex, GlideCamera, GlideConfig, SpinConfig,
    Spinnable, Viewport,
};
use spincube_render::{SceneConfig, SceneRenderer, OVERLAY_HALF_EXTENT};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{CursorIcon, WindowBuilder},
};

/// Viewer configuration
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Sky panorama image; the sky stays black without one.
    pub sky_image: Option<PathBuf>,
    /// How long a press over a face stays armed to open its link.
    pub arm_timeout: Duration,
    pub show_access_form: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Spincube".to_string(),
            width: 1200,
            height: 800,
            sky_image: None,
            arm_timeout: Duration::from_millis(1400),
            show_access_form: true,
        }
    }
}

/// Pointer interaction state shared by mouse and touch input.
///
/// A press over a face arms a pending click; any pointer movement disarms
/// it, and a release while still armed and within the timeout opens the
/// link of the face under the release point.
struct InteractionState {
    spin: Spinnable,
    glide: GlideCamera,
    viewport: Viewport,
    cursor: Vector2<f32>,
    armed: Option<Instant>,
    hovering: bool,
    pick_shape: Cuboid,
    arm_timeout: Duration,
}

impl InteractionState {
    fn new(viewport: Viewport, arm_timeout: Duration) -> Self {
        Self {
            spin: Spinnable::new(SpinConfig::default()),
            glide: GlideCamera::new(viewport, GlideConfig::default()),
            viewport,
            cursor: Vector2::new(viewport.half_width(), viewport.half_height()),
            armed: None,
            hovering: false,
            pick_shape: Cuboid::cube(OVERLAY_HALF_EXTENT),
            arm_timeout,
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.glide.set_viewport(viewport);
    }

    /// Face currently under the cursor
    fn hover_face(&self) -> Option<FaceHit> {
        hit_test(
            self.cursor,
            self.glide.camera(),
            self.viewport,
            &self.spin.orientation(),
            &self.pick_shape,
        )
    }

    /// Pointer pressed: start dragging, and arm a click if the press landed
    /// on a face of the assembled overlay.
    fn press(&mut self, now: Instant, faces_ready: bool) {
        self.spin.begin_drag(self.cursor, self.viewport);
        self.armed = (faces_ready && self.hover_face().is_some()).then_some(now);
        if self.armed.is_some() {
            debug!("click armed");
        }
    }

    /// Pointer moved: retarget the camera glide, feed the drag, disarm any
    /// pending click, and report the cursor icon to show once the overlay
    /// is interactive.
    fn pointer_move(
        &mut self,
        position: Vector2<f32>,
        now: Instant,
        faces_ready: bool,
    ) -> Option<CursorIcon> {
        self.cursor = position;
        self.glide.on_pointer_move(position, self.viewport);
        self.spin.drag_move(position, self.viewport, now);
        if self.armed.take().is_some() {
            debug!("click disarmed by movement");
        }
        if !faces_ready {
            return None;
        }
        let over_face = self.hover_face().is_some();
        if over_face != self.hovering {
            self.hovering = over_face;
            debug!("hover {}", if over_face { "entered a face" } else { "left the cube" });
        }
        Some(if over_face {
            CursorIcon::Pointer
        } else {
            CursorIcon::Move
        })
    }

    /// Pointer released: end the drag, and fire the face under the release
    /// point if the click is still armed and inside the timeout.
    fn release(&mut self, now: Instant, faces_ready: bool) -> Option<FaceIndex> {
        self.spin.end_drag(self.cursor, now);
        let pressed_at = self.armed.take()?;
        if now.duration_since(pressed_at) > self.arm_timeout {
            debug!("click disarmed by the arm timeout");
            return None;
        }
        if !faces_ready {
            return None;
        }
        self.hover_face().map(|hit| hit.face)
    }

    /// Advance one animation frame
    fn frame(&mut self) {
        self.spin.tick(self.viewport);
        self.glide.update();
    }
}

/// Interactive viewer for the spinning-cube scene
pub struct SceneViewer {
    bindings: FaceBindings,
    config: ViewerConfig,
    navigator: Box<dyn Navigator>,
}

impl SceneViewer {
    /// Create a viewer for six face bindings
    pub fn new(bindings: FaceBindings, config: ViewerConfig) -> Self {
        Self {
            bindings,
            config,
            navigator: Box::new(SystemNavigator),
        }
    }

    /// Replace the navigator used to open face links
    pub fn with_navigator(mut self, navigator: Box<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Run the viewer until the window closes
    pub fn run(self) -> Result<()> {
        let Self {
            bindings,
            config,
            navigator,
        } = self;

        let event_loop = EventLoop::new()?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&config.title)
                .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
                .build(&event_loop)?,
        );

        let window_clone = window.clone();
        let mut renderer =
            pollster::block_on(SceneRenderer::new(&window_clone, SceneConfig::default()))?;

        let size = window.inner_size();
        let mut interaction = InteractionState::new(
            Viewport::new(size.width, size.height),
            config.arm_timeout,
        );

        let mut face_slots = Some(FaceSlots::new());
        let loader_rx = spawn_loader(&bindings, config.sky_image.clone());

        let egui_ctx = egui::Context::default();
        let mut egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let mut egui_renderer = egui_wgpu::Renderer::new(
            &renderer.gpu_context.device,
            renderer.surface_config.format,
            None,
            1,
        );
        let mut form = config.show_access_form.then(AccessForm::default);

        info!("viewer started");

        event_loop.run(move |event, target| {
            target.set_control_flow(ControlFlow::Poll);

            if let Event::WindowEvent { event, .. } = event {
                // The UI layer gets first claim on every window event.
                let response = egui_state.on_window_event(&window, &event);
                if response.repaint {
                    window.request_redraw();
                }
                if response.consumed {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                        interaction.resize(Viewport::new(new_size.width, new_size.height));
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => match state {
                        ElementState::Pressed => {
                            interaction.press(Instant::now(), renderer.faces_ready());
                        }
                        ElementState::Released => {
                            if let Some(face) =
                                interaction.release(Instant::now(), renderer.faces_ready())
                            {
                                open_face(&bindings, face, navigator.as_ref());
                            }
                        }
                    },
                    WindowEvent::CursorMoved { position, .. } => {
                        let position = Vector2::new(position.x as f32, position.y as f32);
                        if let Some(icon) =
                            interaction.pointer_move(position, Instant::now(), renderer.faces_ready())
                        {
                            window.set_cursor_icon(icon);
                        }
                    }
                    WindowEvent::Touch(touch) => {
                        let position =
                            Vector2::new(touch.location.x as f32, touch.location.y as f32);
                        match touch.phase {
                            TouchPhase::Started => {
                                interaction.pointer_move(
                                    position,
                                    Instant::now(),
                                    renderer.faces_ready(),
                                );
                                interaction.press(Instant::now(), renderer.faces_ready());
                            }
                            TouchPhase::Moved => {
                                interaction.pointer_move(
                                    position,
                                    Instant::now(),
                                    renderer.faces_ready(),
                                );
                            }
                            TouchPhase::Ended | TouchPhase::Cancelled => {
                                if let Some(face) =
                                    interaction.release(Instant::now(), renderer.faces_ready())
                                {
                                    open_face(&bindings, face, navigator.as_ref());
                                }
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        // Apply finished decode jobs.
                        for loaded in loader_rx.try_iter() {
                            match loaded {
                                LoaderEvent::Face { slot, image } => {
                                    if let Some(slots) = face_slots.as_mut() {
                                        if let Err(e) = slots.complete(slot, image) {
                                            warn!("{}", e);
                                        }
                                        if slots.is_complete() {
                                            if let Some(slots) = face_slots.take() {
                                                match slots.into_images() {
                                                    Ok(images) => renderer.install_faces(&images),
                                                    Err(e) => warn!("{}", e),
                                                }
                                            }
                                        }
                                    } else {
                                        warn!("face slot {} delivered after assembly", slot);
                                    }
                                }
                                LoaderEvent::Sky { image } => {
                                    renderer.install_sky(&image);
                                }
                            }
                        }

                        interaction.frame();
                        renderer.update_orientation(&interaction.spin.orientation());
                        renderer.update_camera(interaction.glide.camera());

                        // UI frame
                        let raw_input = egui_state.take_egui_input(&window);
                        let full_output = egui_ctx.run(raw_input, |ctx| {
                            if let Some(form) = form.as_mut() {
                                form.ui(ctx);
                            }
                        });
                        egui_state.handle_platform_output(&window, full_output.platform_output);

                        let pixels_per_point = full_output.pixels_per_point;
                        let primitives = egui_ctx.tessellate(full_output.shapes, pixels_per_point);
                        for (id, delta) in &full_output.textures_delta.set {
                            egui_renderer.update_texture(
                                &renderer.gpu_context.device,
                                &renderer.gpu_context.queue,
                                *id,
                                delta,
                            );
                        }

                        let size = window.inner_size();
                        let screen = egui_wgpu::ScreenDescriptor {
                            size_in_pixels: [size.width, size.height],
                            pixels_per_point,
                        };

                        let result = renderer.render_with_overlay(|device, queue, encoder, view| {
                            let ui_commands = egui_renderer.update_buffers(
                                device,
                                queue,
                                encoder,
                                &primitives,
                                &screen,
                            );
                            queue.submit(ui_commands);
                            let mut render_pass =
                                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                    label: Some("Ui Render Pass"),
                                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                        view,
                                        resolve_target: None,
                                        ops: wgpu::Operations {
                                            load: wgpu::LoadOp::Load,
                                            store: wgpu::StoreOp::Store,
                                        },
                                    })],
                                    depth_stencil_attachment: None,
                                    timestamp_writes: None,
                                    occlusion_query_set: None,
                                });
                            egui_renderer.render(&mut render_pass, &primitives, &screen);
                        });
                        if let Err(e) = result {
                            error!("render failed: {}", e);
                            target.exit();
                        }

                        for id in &full_output.textures_delta.free {
                            egui_renderer.free_texture(id);
                        }

                        // Request next frame
                        window.request_redraw();
                    }
                    _ => {}
                }
            }
        })?;

        Ok(())
    }
}

fn open_face(bindings: &FaceBindings, face: FaceIndex, navigator: &dyn Navigator) {
    let binding = bindings.get(face);
    info!("face {} clicked", binding.label);
    if let Err(e) = navigator.open(&binding.url) {
        warn!("{}", e);
    }
}
