//! Mine engine crate.
//!
//! Owns the window, the GL context and the object wrappers used by the demo.

pub mod camera;
pub mod core;
pub mod fs;
pub mod gl;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;
