use anyhow::Result;

use crate::core::{App, AppControl, FrameCtx};
use crate::time::FrameClock;

use super::config::WindowConfig;
use super::gl_window::Window;

/// Entry point for the polling frame loop.
pub struct Runtime;

impl Runtime {
    /// Opens a window, builds the app against it and drives frames until the
    /// window closes or the app asks to exit.
    ///
    /// Each iteration polls events, runs one app frame, then swaps buffers.
    /// The app is dropped before the window so that its GL objects are released
    /// while the context is still current.
    pub fn run<A, F>(config: WindowConfig, build: F) -> Result<()>
    where
        A: App,
        F: FnOnce(&mut Window) -> Result<A>,
    {
        let mut window = Window::new(config)?;
        let mut app = build(&mut window)?;
        let mut clock = FrameClock::new();

        let result = Self::drive(&mut window, &mut app, &mut clock);

        drop(app);
        drop(window);

        result
    }

    fn drive<A: App>(window: &mut Window, app: &mut A, clock: &mut FrameClock) -> Result<()> {
        loop {
            window.poll_events();
            if window.should_close() {
                log::info!("window closed");
                return Ok(());
            }

            let time = clock.tick();
            let control = {
                let mut ctx = FrameCtx { window, time };
                app.on_frame(&mut ctx)
            };

            if control == AppControl::Exit {
                window.set_should_close(true);
                log::info!("app requested exit after {} frames", time.frame_index + 1);
                return Ok(());
            }

            window.swap_buffers()?;
        }
    }
}
