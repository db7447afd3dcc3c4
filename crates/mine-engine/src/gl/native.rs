use glow::HasContext;

use super::api::{
    AttribLayout, AttribType, BufferId, BufferTarget, BufferUsage, GlApi, IndexType,
    PrimitiveMode, ProgramId, ShaderId, ShaderStage, UniformLocation, VertexArrayId,
};
use super::uniform::UniformValue;

/// [`GlApi`] backed by a loaded `glow` context.
///
/// All calls are forwarded to the driver. The context these function pointers
/// were loaded from must be current on the calling thread.
pub struct GlowApi {
    gl: glow::Context,
}

impl GlowApi {
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Returns the driver's `GL_VERSION` string.
    pub fn version_string(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn buffer_usage(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::StaticDraw => glow::STATIC_DRAW,
        BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
        BufferUsage::StreamDraw => glow::STREAM_DRAW,
    }
}

fn attrib_type(kind: AttribType) -> u32 {
    match kind {
        AttribType::Float => glow::FLOAT,
        AttribType::Int => glow::INT,
        AttribType::UnsignedInt => glow::UNSIGNED_INT,
        AttribType::Short => glow::SHORT,
        AttribType::UnsignedShort => glow::UNSIGNED_SHORT,
        AttribType::Byte => glow::BYTE,
        AttribType::UnsignedByte => glow::UNSIGNED_BYTE,
    }
}

fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn primitive_mode(mode: PrimitiveMode) -> u32 {
    match mode {
        PrimitiveMode::Points => glow::POINTS,
        PrimitiveMode::Lines => glow::LINES,
        PrimitiveMode::LineStrip => glow::LINE_STRIP,
        PrimitiveMode::Triangles => glow::TRIANGLES,
        PrimitiveMode::TriangleStrip => glow::TRIANGLE_STRIP,
    }
}

fn index_type(kind: IndexType) -> u32 {
    match kind {
        IndexType::U8 => glow::UNSIGNED_BYTE,
        IndexType::U16 => glow::UNSIGNED_SHORT,
        IndexType::U32 => glow::UNSIGNED_INT,
    }
}

impl GlApi for GlowApi {
    fn create_buffer(&self) -> Result<BufferId, String> {
        unsafe { self.gl.create_buffer() }.map(|b| BufferId(b.0))
    }

    fn delete_buffer(&self, buffer: BufferId) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer.0)) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        unsafe {
            self.gl
                .bind_buffer(buffer_target(target), buffer.map(|b| glow::NativeBuffer(b.0)))
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, buffer_usage(usage))
        }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        unsafe { self.gl.create_vertex_array() }.map(|a| VertexArrayId(a.0))
    }

    fn delete_vertex_array(&self, array: VertexArrayId) {
        unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(array.0)) }
    }

    fn bind_vertex_array(&self, array: Option<VertexArrayId>) {
        unsafe {
            self.gl
                .bind_vertex_array(array.map(|a| glow::NativeVertexArray(a.0)))
        }
    }

    fn vertex_attrib_pointer(&self, index: u32, layout: &AttribLayout) {
        // glVertexAttribPointer for every element type; integers are converted
        // to float on fetch, as the fixed quad layout expects.
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                layout.components,
                attrib_type(layout.kind),
                layout.normalized,
                layout.stride,
                layout.offset,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        unsafe { self.gl.create_shader(shader_type(stage)) }.map(|s| ShaderId(s.0))
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader.0), source) }
    }

    fn compile_shader(&self, shader: ShaderId) {
        unsafe { self.gl.compile_shader(glow::NativeShader(shader.0)) }
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        unsafe { self.gl.get_shader_compile_status(glow::NativeShader(shader.0)) }
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader.0)) }
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) }
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        unsafe { self.gl.create_program() }.map(|p| ProgramId(p.0))
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn link_program(&self, program: ProgramId) {
        unsafe { self.gl.link_program(glow::NativeProgram(program.0)) }
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        unsafe { self.gl.get_program_link_status(glow::NativeProgram(program.0)) }
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program.0)) }
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) }
    }

    fn use_program(&self, program: Option<ProgramId>) {
        unsafe { self.gl.use_program(program.map(|p| glow::NativeProgram(p.0))) }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        unsafe {
            self.gl
                .get_uniform_location(glow::NativeProgram(program.0), name)
        }
        .map(|l| UniformLocation(l.0))
    }

    fn uniform(&self, location: UniformLocation, value: &UniformValue) {
        let location = glow::NativeUniformLocation(location.0);
        let loc = Some(&location);
        unsafe {
            match value {
                UniformValue::Float1(v) => self.gl.uniform_1_f32(loc, *v),
                UniformValue::Float2(v) => self.gl.uniform_2_f32_slice(loc, v),
                UniformValue::Float3(v) => self.gl.uniform_3_f32_slice(loc, v),
                UniformValue::Float4(v) => self.gl.uniform_4_f32_slice(loc, v),
                UniformValue::Int1(v) => self.gl.uniform_1_i32(loc, *v),
                UniformValue::Int2(v) => self.gl.uniform_2_i32_slice(loc, v),
                UniformValue::Int3(v) => self.gl.uniform_3_i32_slice(loc, v),
                UniformValue::Int4(v) => self.gl.uniform_4_i32_slice(loc, v),
                UniformValue::Mat2(m) => self.gl.uniform_matrix_2_f32_slice(loc, false, m),
                UniformValue::Mat3(m) => self.gl.uniform_matrix_3_f32_slice(loc, false, m),
                UniformValue::Mat4(m) => self.gl.uniform_matrix_4_f32_slice(loc, false, m),
            }
        }
    }

    fn read_uniform_f32(&self, program: ProgramId, location: UniformLocation, out: &mut [f32]) {
        unsafe {
            self.gl.get_uniform_f32(
                glow::NativeProgram(program.0),
                &glow::NativeUniformLocation(location.0),
                out,
            )
        }
    }

    fn read_uniform_i32(&self, program: ProgramId, location: UniformLocation, out: &mut [i32]) {
        unsafe {
            self.gl.get_uniform_i32(
                glow::NativeProgram(program.0),
                &glow::NativeUniformLocation(location.0),
                out,
            )
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw_elements(&self, mode: PrimitiveMode, count: i32, kind: IndexType, offset: i32) {
        unsafe {
            self.gl
                .draw_elements(primitive_mode(mode), count, index_type(kind), offset)
        }
    }
}
