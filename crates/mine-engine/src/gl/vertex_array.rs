use super::api::{AttribLayout, BufferId, BufferTarget, VertexArrayId};
use super::buffer::Buffer;
use super::context::Gl;
use super::error::GlError;

/// Owned GL vertex array object together with the buffers it references.
///
/// Dropping the array releases its own name and then every owned buffer.
pub struct VertexArray {
    gl: Gl,
    id: VertexArrayId,
    buffers: Vec<Buffer>,
}

impl VertexArray {
    pub fn new(gl: &Gl) -> Result<Self, GlError> {
        let id = gl
            .api()
            .create_vertex_array()
            .map_err(|reason| GlError::Create { kind: "vertex array", reason })?;

        log::trace!("created vertex array {id:?}");

        Ok(Self {
            gl: gl.clone(),
            id,
            buffers: Vec::new(),
        })
    }

    /// Creates a vertex array and runs `setup` on it once while it is bound.
    ///
    /// The array is unbound again before returning, also when `setup` fails.
    pub fn with_setup<F>(gl: &Gl, setup: F) -> Result<Self, GlError>
    where
        F: FnOnce(&mut VertexArray) -> Result<(), GlError>,
    {
        let mut vao = Self::new(gl)?;

        vao.bind();
        let result = setup(&mut vao);
        vao.unbind();

        result.map(|()| vao)
    }

    pub fn id(&self) -> VertexArrayId {
        self.id
    }

    pub fn is_bound(&self) -> bool {
        self.gl.bindings().vertex_array() == Some(self.id)
    }

    /// Binds the array.
    ///
    /// GL restores the element buffer recorded in the array's state along with
    /// it, so the element slot is updated to the owned index buffer, if any.
    pub fn bind(&mut self) {
        self.gl.api().bind_vertex_array(Some(self.id));
        self.gl.bindings().set_vertex_array(Some(self.id));

        if let Some(elements) = self.element_buffer() {
            self.gl
                .bindings()
                .set_buffer(BufferTarget::ElementArray, Some(elements));
        }
    }

    /// Unbinds the array, then every owned buffer.
    ///
    /// The array goes first so that clearing the element buffer slot does not
    /// detach the index buffer recorded in this array's state.
    pub fn unbind(&mut self) {
        self.gl.api().bind_vertex_array(None);
        self.gl.bindings().set_vertex_array(None);

        for buffer in &mut self.buffers {
            buffer.unbind();
        }
    }

    /// Sets the layout of attribute slot `index` and enables it.
    ///
    /// # Panics
    ///
    /// Panics if the array is not bound or `layout.components` is outside 1..=4.
    pub fn attrib_pointer(&mut self, index: u32, layout: AttribLayout) {
        assert!(self.is_bound(), "vertex array {:?} is not bound", self.id);
        assert!(
            (1..=4).contains(&layout.components),
            "attribute component count must be 1..=4, got {}",
            layout.components
        );

        self.gl.api().vertex_attrib_pointer(index, &layout);
        self.gl.api().enable_vertex_attrib_array(index);
    }

    /// Allocates a new buffer owned by this array.
    pub fn add_buffer(&mut self, target: BufferTarget) -> Result<&mut Buffer, GlError> {
        let buffer = Buffer::new(&self.gl, target)?;
        self.buffers.push(buffer);

        let index = self.buffers.len() - 1;
        Ok(&mut self.buffers[index])
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn buffer(&self, index: usize) -> &Buffer {
        assert!(
            index < self.buffers.len(),
            "buffer index {index} out of range ({} buffers)",
            self.buffers.len()
        );
        &self.buffers[index]
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn buffer_mut(&mut self, index: usize) -> &mut Buffer {
        assert!(
            index < self.buffers.len(),
            "buffer index {index} out of range ({} buffers)",
            self.buffers.len()
        );
        &mut self.buffers[index]
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    // Last one added wins: it was the last bound while this array was bound.
    fn element_buffer(&self) -> Option<BufferId> {
        self.buffers
            .iter()
            .rev()
            .find(|b| b.target() == BufferTarget::ElementArray)
            .map(Buffer::id)
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.gl.api().delete_vertex_array(self.id);
        self.gl.bindings().forget_vertex_array(self.id);
    }
}

impl std::fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexArray")
            .field("id", &self.id)
            .field("buffers", &self.buffers)
            .finish()
    }
}
