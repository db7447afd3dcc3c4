use std::cell::Cell;
use std::rc::Rc;

use super::api::{
    BufferId, BufferTarget, GlApi, IndexType, PrimitiveMode, ProgramId, VertexArrayId,
};

/// Process-wide record of which object occupies each binding target.
///
/// Invariant: every slot holds at most one object, namely the last one bound
/// through a wrapper and not unbound or deleted since. Binding a vertex array
/// counts as binding the index buffer it owns. Only the wrappers in this
/// module write to it.
#[derive(Debug, Default)]
pub struct Bindings {
    array_buffer: Cell<Option<BufferId>>,
    element_buffer: Cell<Option<BufferId>>,
    vertex_array: Cell<Option<VertexArrayId>>,
    program: Cell<Option<ProgramId>>,
}

impl Bindings {
    pub fn buffer(&self, target: BufferTarget) -> Option<BufferId> {
        self.buffer_slot(target).get()
    }

    pub fn vertex_array(&self) -> Option<VertexArrayId> {
        self.vertex_array.get()
    }

    pub fn program(&self) -> Option<ProgramId> {
        self.program.get()
    }

    /// True when no target has anything bound.
    pub fn is_clear(&self) -> bool {
        self.array_buffer.get().is_none()
            && self.element_buffer.get().is_none()
            && self.vertex_array.get().is_none()
            && self.program.get().is_none()
    }

    fn buffer_slot(&self, target: BufferTarget) -> &Cell<Option<BufferId>> {
        match target {
            BufferTarget::Array => &self.array_buffer,
            BufferTarget::ElementArray => &self.element_buffer,
        }
    }

    pub(crate) fn set_buffer(&self, target: BufferTarget, id: Option<BufferId>) {
        self.buffer_slot(target).set(id);
    }

    pub(crate) fn set_vertex_array(&self, id: Option<VertexArrayId>) {
        self.vertex_array.set(id);
    }

    pub(crate) fn set_program(&self, id: Option<ProgramId>) {
        self.program.set(id);
    }

    // Deleting a bound object reverts its target to zero in GL.
    pub(crate) fn forget_buffer(&self, target: BufferTarget, id: BufferId) {
        let slot = self.buffer_slot(target);
        if slot.get() == Some(id) {
            slot.set(None);
        }
    }

    pub(crate) fn forget_vertex_array(&self, id: VertexArrayId) {
        if self.vertex_array.get() == Some(id) {
            self.vertex_array.set(None);
        }
    }

    pub(crate) fn forget_program(&self, id: ProgramId) {
        if self.program.get() == Some(id) {
            self.program.set(None);
        }
    }
}

/// Shared handle to the current GL context.
///
/// Cloning is cheap. The handle is `!Send`: a GL context is
/// current on exactly one thread, and every wrapper holding a `Gl` stays there.
#[derive(Clone)]
pub struct Gl {
    api: Rc<dyn GlApi>,
    bindings: Rc<Bindings>,
}

impl Gl {
    pub fn new(api: Rc<dyn GlApi>) -> Self {
        Self {
            api,
            bindings: Rc::new(Bindings::default()),
        }
    }

    pub fn api(&self) -> &dyn GlApi {
        self.api.as_ref()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn viewport(&self, width: u32, height: u32) {
        self.api.viewport(0, 0, width as i32, height as i32);
    }

    /// Clears the color buffer of the current framebuffer.
    pub fn clear(&self, color: [f32; 4]) {
        self.api.clear(color);
    }

    /// Draws `count` indices from the bound element buffer.
    ///
    /// `offset` is in bytes into the element buffer.
    pub fn draw_elements(&self, mode: PrimitiveMode, count: i32, index_type: IndexType, offset: i32) {
        debug_assert!(
            self.bindings.vertex_array().is_some(),
            "draw_elements called with no vertex array bound"
        );
        self.api.draw_elements(mode, count, index_type, offset);
    }
}
