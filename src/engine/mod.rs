pub mod animation;
pub mod core;
pub mod headless;
pub mod input;
pub mod renderer;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glam::DVec2;
use wgpu::SurfaceError;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{EventLoop, EventLoopWindowTarget},
    keyboard::{Key as WinitKey, NamedKey},
    window::{Window, WindowBuilder},
};

use crate::error::SceneError;
use crate::programs::Program;
use crate::surface::RasterSurface;
use self::animation::{AnimationDriver, FrameScheduler};
use self::core::EngineConfig;
use self::input::{InputEvent, Key, PointerButton};
use self::renderer::Renderer;

pub use headless::run_headless;

/// Printed when no drawing surface can be created.
pub const CANVAS_UNSUPPORTED: &str = "ERROR: Canvas not supported";

/// Turns frame requests into window redraws.
struct WindowScheduler {
    window: Arc<Window>,
    pending: bool,
}

impl WindowScheduler {
    fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.window.request_redraw();
    }
}

/// Hosts one program in a window: input goes to the program, frames to the driver,
/// and the canvas is presented after every change.
pub struct EngineApp {
    config: EngineConfig,
    program: Box<dyn Program>,
    driver: AnimationDriver,
}

impl EngineApp {
    pub fn new(config: EngineConfig, program: Box<dyn Program>) -> Self {
        Self {
            config,
            program,
            driver: AnimationDriver::new(),
        }
    }

    pub fn run(self) -> Result<()> {
        tracing::info!(
            target: "engine",
            app = %self.config.app_name,
            program = %self.program.name(),
            "Engine starting"
        );

        let mut engine = self;
        let (width, height) = engine.config.canvas_size(engine.program.canvas_size());
        let mut canvas = RasterSurface::new(width, height, engine.config.background)
            .map_err(|err| {
                eprintln!("{CANVAS_UNSUPPORTED}");
                err
            })?;
        engine.program.setup(&mut canvas)?;

        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(engine.window_title())
                .with_inner_size(LogicalSize::new(width as f64, height as f64))
                .build(&event_loop)
                .context("failed to create window")?,
        );
        let mut scheduler = WindowScheduler {
            window: window.clone(),
            pending: false,
        };
        if engine.config.start_running && engine.program.animated() {
            engine.driver.set_running(true, &mut scheduler);
        }

        let mut renderer: Option<Renderer> = None;
        let mut cursor = DVec2::ZERO;

        event_loop
            .run(move |event, target| match event {
                Event::Resumed => {
                    if renderer.is_none() {
                        let page = engine.config.background;
                        let init = Renderer::new(window.clone(), (width, height), page);
                        match pollster::block_on(init) {
                            Ok(new_renderer) => {
                                tracing::info!(target: "engine", "renderer initialized");
                                renderer = Some(new_renderer);
                                window.request_redraw();
                            }
                            Err(err) => {
                                let err = SceneError::SurfaceUnavailable(format!("{err:#}"));
                                tracing::error!(
                                    target: "engine",
                                    %err,
                                    "failed to initialize renderer"
                                );
                                eprintln!("{CANVAS_UNSUPPORTED}");
                                target.exit();
                            }
                        }
                    }
                }
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested => {
                            tracing::info!(target: "engine", "window close requested");
                            target.exit();
                        }
                        WindowEvent::Resized(size) => {
                            if let Some(renderer) = renderer.as_mut() {
                                renderer.resize(size);
                            }
                            window.request_redraw();
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            cursor = to_canvas(&window, &canvas, position);
                            engine.dispatch(
                                InputEvent::PointerMove { position: cursor },
                                &mut canvas,
                                &window,
                                target,
                            );
                        }
                        WindowEvent::MouseInput { state, button, .. } => {
                            let Some(button) = pointer_button(button) else {
                                return;
                            };
                            let event = match state {
                                ElementState::Pressed => InputEvent::PointerDown {
                                    position: cursor,
                                    button,
                                },
                                ElementState::Released => InputEvent::PointerUp {
                                    position: cursor,
                                    button,
                                },
                            };
                            engine.dispatch(event, &mut canvas, &window, target);
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            engine.on_key(event, &mut canvas, &mut scheduler, &window, target);
                        }
                        WindowEvent::RedrawRequested => {
                            if scheduler.take_request() {
                                if let Err(err) = engine.driver.on_frame(
                                    engine.program.as_mut(),
                                    &mut canvas,
                                    &mut scheduler,
                                ) {
                                    tracing::error!(
                                        target: "engine",
                                        %err,
                                        "frame failed, stopping"
                                    );
                                    target.exit();
                                    return;
                                }
                            }
                            if let Some(renderer) = renderer.as_mut() {
                                match renderer.render(canvas.pixels()) {
                                    Ok(()) => {}
                                    Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                                        renderer.resize(window.inner_size());
                                        window.request_redraw();
                                    }
                                    Err(SurfaceError::OutOfMemory) => {
                                        tracing::error!(
                                            target: "engine",
                                            "GPU out of memory, shutting down engine"
                                        );
                                        target.exit();
                                    }
                                    Err(SurfaceError::Timeout) => {
                                        tracing::warn!(
                                            target: "engine",
                                            "surface timeout, retrying next frame"
                                        );
                                        window.request_redraw();
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            })
            .map_err(|err| anyhow!(err))?;

        tracing::info!(target: "engine", "Engine shutdown complete");
        Ok(())
    }

    fn window_title(&self) -> String {
        format!("{} - {}", self.config.app_name, self.program.name())
    }

    /// Hands an event to the program and presents the canvas when it changed.
    fn dispatch(
        &mut self,
        event: InputEvent,
        canvas: &mut RasterSurface,
        window: &Window,
        target: &EventLoopWindowTarget<()>,
    ) {
        match self.program.handle_input(&event, canvas) {
            Ok(true) => window.request_redraw(),
            Ok(false) => {}
            Err(err) => {
                tracing::error!(target: "engine", %err, ?event, "input handling failed");
                target.exit();
            }
        }
    }

    fn on_key(
        &mut self,
        event: KeyEvent,
        canvas: &mut RasterSurface,
        scheduler: &mut WindowScheduler,
        window: &Window,
        target: &EventLoopWindowTarget<()>,
    ) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.logical_key {
            WinitKey::Named(NamedKey::Space) if self.program.animated() => {
                let should_run = !self.driver.is_running();
                self.driver.set_running(should_run, scheduler);
            }
            WinitKey::Named(NamedKey::Space) => {
                self.dispatch(InputEvent::Key(Key::Space), canvas, window, target);
            }
            WinitKey::Named(NamedKey::Escape) => {
                tracing::info!(target: "engine", "escape pressed");
                target.exit();
            }
            WinitKey::Character(ref text) => {
                for c in text.chars() {
                    self.dispatch(InputEvent::Key(Key::from_char(c)), canvas, window, target);
                }
            }
            _ => {}
        }
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Window pixels to canvas pixels; the canvas is stretched over the whole window.
fn to_canvas(window: &Window, canvas: &RasterSurface, position: PhysicalPosition<f64>) -> DVec2 {
    let size = window.inner_size();
    let (width, height) = canvas.pixels().dimensions();
    let sx = width as f64 / size.width.max(1) as f64;
    let sy = height as f64 / size.height.max(1) as f64;
    DVec2::new(position.x * sx, position.y * sy)
}
