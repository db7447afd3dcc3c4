use std::fmt;
use std::num::NonZeroU32;

use super::uniform::UniformValue;

/// Native buffer object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferId(pub NonZeroU32);

/// Native vertex array object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexArrayId(pub NonZeroU32);

/// Native shader object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderId(pub NonZeroU32);

/// Native program object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramId(pub NonZeroU32);

/// Uniform slot inside a linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation(pub u32);

/// Logical role of a buffer object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (`GL_ARRAY_BUFFER`).
    Array,
    /// Index data (`GL_ELEMENT_ARRAY_BUFFER`).
    ElementArray,
}

/// Driver hint for how often buffer contents change.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Element type of a vertex attribute as stored in the buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttribType {
    Float,
    Int,
    UnsignedInt,
    Short,
    UnsignedShort,
    Byte,
    UnsignedByte,
}

impl AttribType {
    /// Size of one component in bytes.
    pub fn size(self) -> usize {
        match self {
            AttribType::Float | AttribType::Int | AttribType::UnsignedInt => 4,
            AttribType::Short | AttribType::UnsignedShort => 2,
            AttribType::Byte | AttribType::UnsignedByte => 1,
        }
    }
}

/// Layout of one vertex attribute slot.
///
/// `stride` and `offset` are in bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttribLayout {
    pub components: i32,
    pub kind: AttribType,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

impl AttribLayout {
    /// Tightly packed float attribute with `components` elements per vertex.
    pub fn floats(components: i32) -> Self {
        Self {
            components,
            kind: AttribType::Float,
            normalized: false,
            stride: components * AttribType::Float.size() as i32,
            offset: 0,
        }
    }

    pub fn with_stride(mut self, stride: i32) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

/// Element type of an index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

/// The GL entry points used by the wrappers.
///
/// Every call mutates or reads the state of the context current on this
/// thread. Implementations are not expected to be thread-safe.
pub trait GlApi {
    fn create_buffer(&self) -> Result<BufferId, String>;
    fn delete_buffer(&self, buffer: BufferId);
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>);
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    fn create_vertex_array(&self) -> Result<VertexArrayId, String>;
    fn delete_vertex_array(&self, array: VertexArrayId);
    fn bind_vertex_array(&self, array: Option<VertexArrayId>);
    fn vertex_attrib_pointer(&self, index: u32, layout: &AttribLayout);
    fn enable_vertex_attrib_array(&self, index: u32);

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String>;
    fn shader_source(&self, shader: ShaderId, source: &str);
    fn compile_shader(&self, shader: ShaderId);
    fn shader_compile_status(&self, shader: ShaderId) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    fn create_program(&self) -> Result<ProgramId, String>;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn link_program(&self, program: ProgramId);
    fn program_link_status(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn delete_program(&self, program: ProgramId);
    fn use_program(&self, program: Option<ProgramId>);

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    /// Writes `value` into the currently used program.
    fn uniform(&self, location: UniformLocation, value: &UniformValue);
    fn read_uniform_f32(&self, program: ProgramId, location: UniformLocation, out: &mut [f32]);
    fn read_uniform_i32(&self, program: ProgramId, location: UniformLocation, out: &mut [i32]);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear(&self, color: [f32; 4]);
    fn draw_elements(&self, mode: PrimitiveMode, count: i32, index_type: IndexType, offset: i32);
}
