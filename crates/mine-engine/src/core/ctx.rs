use glam::Vec2;

use crate::gl::Gl;
use crate::input::Key;
use crate::time::FrameTime;
use crate::window::Window;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
pub struct FrameCtx<'a> {
    pub window: &'a Window,
    pub time: FrameTime,
}

impl FrameCtx<'_> {
    pub fn gl(&self) -> &Gl {
        self.window.gl()
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key)
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.window.cursor_position()
    }

    /// Seconds since the previous frame.
    pub fn dt(&self) -> f32 {
        self.time.dt
    }
}
