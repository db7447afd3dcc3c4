use bytemuck::Pod;

use super::api::{BufferId, BufferTarget, BufferUsage};
use super::context::Gl;
use super::error::GlError;

/// Owned GL buffer object.
///
/// The native name is released exactly once, when the value is dropped.
/// `Buffer` is not `Clone`; ownership moves with the value.
pub struct Buffer {
    gl: Gl,
    id: BufferId,
    target: BufferTarget,
}

impl Buffer {
    /// Allocates a buffer name for `target`.
    pub fn new(gl: &Gl, target: BufferTarget) -> Result<Self, GlError> {
        let id = gl
            .api()
            .create_buffer()
            .map_err(|reason| GlError::Create { kind: "buffer", reason })?;

        log::trace!("created buffer {id:?} for {target:?}");

        Ok(Self {
            gl: gl.clone(),
            id,
            target,
        })
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    /// True when this buffer occupies its target's binding slot.
    pub fn is_bound(&self) -> bool {
        self.gl.bindings().buffer(self.target) == Some(self.id)
    }

    pub fn bind(&mut self) {
        self.gl.api().bind_buffer(self.target, Some(self.id));
        self.gl.bindings().set_buffer(self.target, Some(self.id));
    }

    /// Clears the binding slot of this buffer's target.
    pub fn unbind(&mut self) {
        self.gl.api().bind_buffer(self.target, None);
        self.gl.bindings().set_buffer(self.target, None);
    }

    /// Replaces the buffer's storage with a copy of `data`.
    ///
    /// Binds the buffer first if it is not already bound, and leaves it bound.
    pub fn upload<T: Pod>(&mut self, data: &[T], usage: BufferUsage) {
        if !self.is_bound() {
            self.bind();
        }

        let bytes: &[u8] = bytemuck::cast_slice(data);
        self.gl.api().buffer_data(self.target, bytes, usage);
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.gl.api().delete_buffer(self.id);
        self.gl.bindings().forget_buffer(self.target, self.id);
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("id", &self.id)
            .field("target", &self.target)
            .finish()
    }
}
