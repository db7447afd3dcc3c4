//! In-memory [`GlApi`] for tests.
//!
//! Mimics the parts of GL state the wrappers touch: object names, the native
//! binding slots, buffer storage, attribute layouts, shader/program status and
//! uniform values. Compilation is a crude check: a stage without `void main`
//! fails with a driver-style log.

use std::cell::{Ref, RefCell};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;
use std::rc::Rc;

use super::api::{
    AttribLayout, BufferId, BufferTarget, BufferUsage, GlApi, IndexType, PrimitiveMode,
    ProgramId, ShaderId, ShaderStage, UniformLocation, VertexArrayId,
};
use super::context::Gl;
use super::uniform::UniformValue;

#[derive(Debug, Default)]
pub struct ShaderState {
    pub stage: Option<ShaderStage>,
    pub source: String,
    pub compiled: bool,
    pub log: String,
}

#[derive(Debug, Default)]
pub struct ProgramState {
    pub attached: Vec<ShaderId>,
    pub linked: bool,
    pub log: String,
    pub locations: HashMap<String, UniformLocation>,
    pub values: HashMap<UniformLocation, UniformValue>,
}

#[derive(Debug, Default)]
pub struct HeadlessState {
    next_name: u32,

    pub live_buffers: HashSet<BufferId>,
    pub deleted_buffers: Vec<BufferId>,
    pub bound_buffers: HashMap<BufferTarget, BufferId>,
    pub buffer_data: HashMap<BufferId, (Vec<u8>, BufferUsage)>,

    pub live_arrays: HashSet<VertexArrayId>,
    pub deleted_arrays: Vec<VertexArrayId>,
    pub bound_array: Option<VertexArrayId>,
    pub attribs: Vec<(Option<VertexArrayId>, u32, AttribLayout)>,
    pub enabled_attribs: Vec<(Option<VertexArrayId>, u32)>,

    pub shaders: HashMap<ShaderId, ShaderState>,
    pub deleted_shaders: Vec<ShaderId>,

    pub programs: HashMap<ProgramId, ProgramState>,
    pub deleted_programs: Vec<ProgramId>,
    pub current_program: Option<ProgramId>,

    pub viewport: Option<(i32, i32, i32, i32)>,
    pub clears: Vec<[f32; 4]>,
    pub draws: Vec<(PrimitiveMode, i32, IndexType, i32)>,

    /// When set, every `create_*` call fails.
    pub refuse_allocations: bool,
}

impl HeadlessState {
    fn allocate(&mut self) -> Result<NonZeroU32, String> {
        if self.refuse_allocations {
            return Err("out of object names".to_string());
        }
        self.next_name += 1;
        NonZeroU32::new(self.next_name).ok_or_else(|| "name counter overflow".to_string())
    }

    pub fn deletions_of_buffer(&self, id: BufferId) -> usize {
        self.deleted_buffers.iter().filter(|d| **d == id).count()
    }
}

#[derive(Debug, Default)]
pub struct HeadlessGl {
    state: RefCell<HeadlessState>,
}

impl HeadlessGl {
    /// Creates a headless backend and a [`Gl`] handle over it.
    pub fn pair() -> (Rc<HeadlessGl>, Gl) {
        let headless = Rc::new(HeadlessGl::default());
        let gl = Gl::new(headless.clone());
        (headless, gl)
    }

    pub fn state(&self) -> Ref<'_, HeadlessState> {
        self.state.borrow()
    }

    pub fn refuse_allocations(&self, refuse: bool) {
        self.state.borrow_mut().refuse_allocations = refuse;
    }
}

impl GlApi for HeadlessGl {
    fn create_buffer(&self) -> Result<BufferId, String> {
        let mut s = self.state.borrow_mut();
        let id = BufferId(s.allocate()?);
        s.live_buffers.insert(id);
        Ok(id)
    }

    fn delete_buffer(&self, buffer: BufferId) {
        let mut s = self.state.borrow_mut();
        if s.live_buffers.remove(&buffer) {
            s.bound_buffers.retain(|_, b| *b != buffer);
        }
        s.deleted_buffers.push(buffer);
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        let mut s = self.state.borrow_mut();
        match buffer {
            Some(b) => {
                assert!(s.live_buffers.contains(&b), "binding deleted buffer {b:?}");
                s.bound_buffers.insert(target, b);
            }
            None => {
                s.bound_buffers.remove(&target);
            }
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        let mut s = self.state.borrow_mut();
        let bound = s
            .bound_buffers
            .get(&target)
            .copied()
            .unwrap_or_else(|| panic!("buffer_data with nothing bound to {target:?}"));
        s.buffer_data.insert(bound, (data.to_vec(), usage));
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        let mut s = self.state.borrow_mut();
        let id = VertexArrayId(s.allocate()?);
        s.live_arrays.insert(id);
        Ok(id)
    }

    fn delete_vertex_array(&self, array: VertexArrayId) {
        let mut s = self.state.borrow_mut();
        s.live_arrays.remove(&array);
        if s.bound_array == Some(array) {
            s.bound_array = None;
        }
        s.deleted_arrays.push(array);
    }

    fn bind_vertex_array(&self, array: Option<VertexArrayId>) {
        let mut s = self.state.borrow_mut();
        if let Some(a) = array {
            assert!(s.live_arrays.contains(&a), "binding deleted vertex array {a:?}");
        }
        s.bound_array = array;
    }

    fn vertex_attrib_pointer(&self, index: u32, layout: &AttribLayout) {
        let mut s = self.state.borrow_mut();
        let array = s.bound_array;
        s.attribs.push((array, index, *layout));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        let mut s = self.state.borrow_mut();
        let array = s.bound_array;
        s.enabled_attribs.push((array, index));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let mut s = self.state.borrow_mut();
        let id = ShaderId(s.allocate()?);
        s.shaders.insert(
            id,
            ShaderState {
                stage: Some(stage),
                ..Default::default()
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        if let Some(sh) = self.state.borrow_mut().shaders.get_mut(&shader) {
            sh.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: ShaderId) {
        if let Some(sh) = self.state.borrow_mut().shaders.get_mut(&shader) {
            sh.compiled = sh.source.contains("void main");
            sh.log = if sh.compiled {
                String::new()
            } else {
                "0:1(1): error: no function with name 'main'\n".to_string()
            };
        }
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|sh| sh.compiled)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|sh| sh.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderId) {
        let mut s = self.state.borrow_mut();
        s.shaders.remove(&shader);
        s.deleted_shaders.push(shader);
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        let mut s = self.state.borrow_mut();
        let id = ProgramId(s.allocate()?);
        s.programs.insert(id, ProgramState::default());
        Ok(id)
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn link_program(&self, program: ProgramId) {
        let mut s = self.state.borrow_mut();
        let stages: Vec<Option<ShaderStage>> = match s.programs.get(&program) {
            Some(p) => p
                .attached
                .iter()
                .map(|id| s.shaders.get(id).filter(|sh| sh.compiled).and_then(|sh| sh.stage))
                .collect(),
            None => return,
        };
        let has = |stage| stages.contains(&Some(stage));
        let linked = has(ShaderStage::Vertex) && has(ShaderStage::Fragment);
        if let Some(p) = s.programs.get_mut(&program) {
            p.linked = linked;
            p.log = if linked {
                String::new()
            } else {
                "error: program lacks a compiled vertex or fragment stage\n".to_string()
            };
        }
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramId) {
        let mut s = self.state.borrow_mut();
        s.programs.remove(&program);
        if s.current_program == Some(program) {
            s.current_program = None;
        }
        s.deleted_programs.push(program);
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.state.borrow_mut().current_program = program;
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let mut s = self.state.borrow_mut();
        let p = s.programs.get_mut(&program)?;
        if !p.linked || name.starts_with("gl_") {
            return None;
        }
        let next = UniformLocation(p.locations.len() as u32);
        Some(*p.locations.entry(name.to_string()).or_insert(next))
    }

    fn uniform(&self, location: UniformLocation, value: &UniformValue) {
        let mut s = self.state.borrow_mut();
        let Some(current) = s.current_program else {
            // GL_INVALID_OPERATION: nothing in use.
            return;
        };
        if let Some(p) = s.programs.get_mut(&current) {
            p.values.insert(location, *value);
        }
    }

    fn read_uniform_f32(&self, program: ProgramId, location: UniformLocation, out: &mut [f32]) {
        let s = self.state.borrow();
        let value = s.programs.get(&program).and_then(|p| p.values.get(&location));
        if let Some(src) = value.and_then(UniformValue::float_components) {
            let n = out.len().min(src.len());
            out[..n].copy_from_slice(&src[..n]);
        }
    }

    fn read_uniform_i32(&self, program: ProgramId, location: UniformLocation, out: &mut [i32]) {
        let s = self.state.borrow();
        let value = s.programs.get(&program).and_then(|p| p.values.get(&location));
        if let Some(src) = value.and_then(UniformValue::int_components) {
            let n = out.len().min(src.len());
            out[..n].copy_from_slice(&src[..n]);
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.state.borrow_mut().viewport = Some((x, y, width, height));
    }

    fn clear(&self, color: [f32; 4]) {
        self.state.borrow_mut().clears.push(color);
    }

    fn draw_elements(&self, mode: PrimitiveMode, count: i32, index_type: IndexType, offset: i32) {
        self.state
            .borrow_mut()
            .draws
            .push((mode, count, index_type, offset));
    }
}
