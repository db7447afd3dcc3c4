//! OpenGL object wrappers.
//!
//! Every GL object is owned by exactly one wrapper and released on drop. All
//! binding goes through the wrappers, which keep [`Bindings`] in step with the
//! driver; callers never see a raw handle they could bind behind its back.
//!
//! The driver is reached through the [`GlApi`] trait. [`GlowApi`] forwards to a
//! loaded `glow` context.

mod api;
mod buffer;
mod context;
mod error;
mod native;
mod shader;
mod uniform;
mod vertex_array;

#[cfg(test)]
pub(crate) mod headless;

pub use api::{
    AttribLayout, AttribType, BufferId, BufferTarget, BufferUsage, GlApi, IndexType,
    PrimitiveMode, ProgramId, ShaderId, ShaderStage, UniformLocation, VertexArrayId,
};
pub use buffer::Buffer;
pub use context::{Bindings, Gl};
pub use error::GlError;
pub use native::GlowApi;
pub use shader::ShaderProgram;
pub use uniform::{Uniform, UniformValue};
pub use vertex_array::VertexArray;
