//! Window, GL context and the polling frame loop.
//!
//! Built on `winit` with `glutin` for the context. Events are pumped without
//! blocking so the loop keeps the familiar poll/draw/swap shape.

mod config;
mod events;
mod gl_window;
mod runtime;

pub use config::WindowConfig;
pub use gl_window::Window;
pub use runtime::Runtime;
