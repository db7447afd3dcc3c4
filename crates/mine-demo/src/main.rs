//! Renders one quad and flies a camera around it.
//!
//! WASD moves in the view plane, Z/X move up and down, the mouse looks around
//! and Escape quits.

mod scene;

use std::process::ExitCode;

use anyhow::Result;

use mine_engine::logging::{LoggingConfig, init_logging};
use mine_engine::window::{Runtime, WindowConfig};

use scene::QuadScene;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());
    ExitCode::from(report(run()))
}

fn run() -> Result<()> {
    Runtime::run(WindowConfig::default(), |window| {
        window.set_resize_callback(|width, height| {
            log::debug!("aspect ratio now {:.3}", width as f32 / height as f32);
        });
        QuadScene::new(window.gl())
    })
}

/// Logs a fatal error and maps the outcome to the process exit status.
fn report(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", failure_message(&e));
            1
        }
    }
}

/// The whole error chain on one line, outermost context first.
fn failure_message(e: &anyhow::Error) -> String {
    format!("fatal: {e:#}")
}
