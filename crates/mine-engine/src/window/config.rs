/// Window and context configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Logical size of the client area.
    pub width: u32,
    pub height: u32,
    /// Wait for vertical blank on swap.
    pub vsync: bool,
    /// Requested core-profile GL version as `(major, minor)`.
    pub gl_version: (u8, u8),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hello, World!".to_string(),
            width: 640,
            height: 480,
            vsync: true,
            gl_version: (3, 3),
        }
    }
}

impl WindowConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}
