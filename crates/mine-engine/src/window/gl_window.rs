use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use glam::Vec2;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, Window as WinitWindow};

use super::config::WindowConfig;
use super::events::EventSink;
use crate::gl::{Gl, GlowApi};
use crate::input::{InputState, Key};

type ResizeCallback = Box<dyn FnMut(u32, u32)>;

/// The process's one window, with a current GL context.
///
/// Input is polled: call [`poll_events`](Self::poll_events) once per frame,
/// then query keys and cursor.
///
/// GL objects created from [`gl`](Self::gl) must be dropped before the
/// window; their release calls need the context alive and current.
pub struct Window {
    gl: Gl,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: WinitWindow,
    event_loop: EventLoop<()>,

    input: InputState,
    should_close: bool,
    resize_callback: Option<ResizeCallback>,
}

impl Window {
    /// Opens the window, creates a double-buffered core-profile context and
    /// makes it current on this thread.
    ///
    /// The cursor is hidden and locked for continuous mouse-look.
    pub fn new(config: WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let attrs = WinitWindow::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));

        let template = ConfigTemplateBuilder::new();
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(&event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create window: {e}"))?;

        let window = window.context("failed to create window")?;

        let raw_window_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .with_context(|| format!("failed to create OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create window surface")?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .context("failed to make GL context current")?;

        let glow = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol))
        };
        let api = GlowApi::new(glow);
        log::info!("OpenGL context created: {}", api.version_string());

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            log::warn!("failed to set swap interval {interval:?}: {e}");
        }

        let gl = Gl::new(Rc::new(api));

        let size = window.inner_size();
        gl.viewport(size.width, size.height);

        lock_cursor(&window);

        let input = InputState {
            focused: window.has_focus(),
            ..Default::default()
        };

        log::info!("window created: {}x{} physical px", size.width, size.height);

        Ok(Self {
            gl,
            gl_surface,
            gl_context,
            window,
            event_loop,
            input,
            should_close: false,
            resize_callback: None,
        })
    }

    /// Handle to the context for creating GL objects.
    pub fn gl(&self) -> &Gl {
        &self.gl
    }

    /// Framebuffer size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Width over height; 1.0 while minimized.
    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.size();
        if w == 0 || h == 0 {
            return 1.0;
        }
        w as f32 / h as f32
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    /// Unbounded virtual cursor position, accumulated from raw mouse motion.
    pub fn cursor_position(&self) -> Vec2 {
        self.input.virtual_cursor
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    /// Registers `callback` to run after each resize, once the viewport
    /// already matches the new framebuffer size.
    pub fn set_resize_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u32, u32) + 'static,
    {
        self.resize_callback = Some(Box::new(callback));
    }

    /// Processes pending window and device events without blocking.
    pub fn poll_events(&mut self) {
        let mut sink = EventSink {
            window_id: self.window.id(),
            input: &mut self.input,
            resized: None,
            close_requested: false,
        };

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut sink);

        let EventSink {
            resized,
            close_requested,
            ..
        } = sink;

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {code}");
            self.should_close = true;
        }

        if close_requested {
            self.should_close = true;
        }

        if let Some(size) = resized {
            self.apply_resize(size);
        }
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.window.pre_present_notify();
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("failed to swap buffers")
    }

    fn apply_resize(&mut self, size: PhysicalSize<u32>) {
        // Minimized.
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };

        self.gl_surface.resize(&self.gl_context, width, height);
        self.gl.viewport(size.width, size.height);
        log::debug!("resized to {}x{}", size.width, size.height);

        if let Some(callback) = self.resize_callback.as_mut() {
            callback(size.width, size.height);
        }
    }
}

/// Picks the config with the most samples.
///
/// glutin's `find_configs` already fails with `BadConfig` when nothing matches
/// the template, and that error comes back through `DisplayBuilder::build`, so
/// `configs` is never empty here.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    let mut configs = configs;
    let first = configs
        .next()
        .expect("find_configs returned an empty config list");
    configs.fold(first, |best, c| if c.num_samples() > best.num_samples() { c } else { best })
}

fn lock_cursor(window: &WinitWindow) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

    if let Err(e) = grabbed {
        log::warn!("cursor grab unavailable, mouse-look may hit the screen edge: {e}");
    }

    window.set_cursor_visible(false);
}
