// ============================================================================
// WINDOW HOST
// ============================================================================

use crate::config::DisplayConfig;
use crate::display::DisplayState;
use crate::error::Result;
use crate::layout::backing_size;
use crate::scene::Typeface;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::Instant;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

/// Pixels scrolled per wheel line.
const LINE_SCROLL: f64 = 48.0;

/// Cockpit display window
pub struct Cockpit {
    config: DisplayConfig,
    typeface: Option<Typeface>,
}

impl Cockpit {
    /// Prepares the display, loading the label font when one is configured.
    pub fn new(config: DisplayConfig) -> Result<Self> {
        let typeface = match &config.font_path {
            Some(path) => {
                let typeface = Typeface::load(path)?;
                log::info!("Loaded font {}", path.display());
                Some(typeface)
            }
            None => None,
        };
        Ok(Self { config, typeface })
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Opens the window and runs until it is closed.
    pub fn show(&self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .with_min_inner_size(LogicalSize::new(320.0, 240.0))
            .build(&event_loop)?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        let (mut fb_width, mut fb_height) = (size.width, size.height);

        let mut state = DisplayState::new(self.config.clone(), Instant::now());
        state.resize(fb_width, fb_height, window.scale_factor());
        log::info!(
            "Window opened at {}x{} (scale {:.2})",
            fb_width,
            fb_height,
            window.scale_factor()
        );

        let frame_duration = self.config.frame_duration();
        let mut last_frame = Instant::now();
        let mut pointer = (0.0, 0.0);
        let window_clone = window.clone();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        log::info!("Window closed");
                        window_target.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. }
                        if event.state == ElementState::Pressed =>
                    {
                        match event.logical_key {
                            Key::Named(NamedKey::Escape) => {
                                if !state.collapse_panels() {
                                    window_target.exit();
                                }
                            }
                            Key::Named(NamedKey::PageDown) => {
                                state.scroll_by(state.page().viewport_h * 0.8)
                            }
                            Key::Named(NamedKey::PageUp) => {
                                state.scroll_by(-state.page().viewport_h * 0.8)
                            }
                            Key::Character(ref c) if c.eq_ignore_ascii_case("l") => {
                                state.toggle_locale()
                            }
                            _ => {}
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        pointer = (position.x, position.y);
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => state.click(pointer),
                    WindowEvent::MouseWheel { delta, .. } => {
                        let dy = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y as f64 * LINE_SCROLL,
                            MouseScrollDelta::PixelDelta(position) => position.y,
                        };
                        state.scroll_by(-dy);
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            log::error!("Failed to resize surface: {err}");
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let scale = window_clone.scale_factor();
                        let logical = window_clone.inner_size().to_logical::<f64>(scale);
                        let (width, height) = backing_size(logical.width, logical.height, scale);
                        if (width, height) != (fb_width, fb_height) && width > 0 && height > 0 {
                            if let Err(err) = pixels.resize_buffer(width, height) {
                                log::error!("Failed to resize buffer: {err}");
                                window_target.exit();
                                return;
                            }
                            fb_width = width;
                            fb_height = height;
                            state.resize(width, height, scale);
                        }

                        state.update(Instant::now());
                        state.render(
                            pixels.frame_mut(),
                            fb_width as usize,
                            fb_height as usize,
                            self.typeface.as_ref(),
                        );
                        if let Err(err) = pixels.render() {
                            log::error!("Render failed: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
