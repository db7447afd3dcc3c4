use std::path::Path;

use anyhow::{Context, Result};

use super::api::{ProgramId, ShaderId, ShaderStage};
use super::context::Gl;
use super::error::{non_empty_log, GlError};
use super::uniform::Uniform;
use crate::fs;

/// Linked GL program built from a vertex and a fragment stage.
///
/// Construction either yields a fully linked program or an error; no shader or
/// program object outlives a failed build.
pub struct ShaderProgram {
    gl: Gl,
    id: ProgramId,
}

impl ShaderProgram {
    pub fn new(gl: &Gl, vertex_src: &str, fragment_src: &str) -> Result<Self, GlError> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_src) {
            Ok(fragment) => fragment,
            Err(err) => {
                gl.api().delete_shader(vertex);
                return Err(err);
            }
        };

        let linked = link(gl, vertex, fragment);

        gl.api().delete_shader(vertex);
        gl.api().delete_shader(fragment);

        let id = linked?;
        log::debug!("linked shader program {id:?}");

        Ok(Self { gl: gl.clone(), id })
    }

    /// Reads both stages from disk and builds the program.
    pub fn from_files(
        gl: &Gl,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();

        let vertex_src = fs::read_to_string(vertex_path)?;
        let fragment_src = fs::read_to_string(fragment_path)?;

        Self::new(gl, &vertex_src, &fragment_src).with_context(|| {
            format!(
                "failed to build shader program from {} and {}",
                vertex_path.display(),
                fragment_path.display()
            )
        })
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Makes this the program used by subsequent draw calls.
    pub fn activate(&self) {
        self.gl.api().use_program(Some(self.id));
        self.gl.bindings().set_program(Some(self.id));
    }

    pub fn deactivate(&self) {
        self.gl.api().use_program(None);
        self.gl.bindings().set_program(None);
    }

    pub fn is_active(&self) -> bool {
        self.gl.bindings().program() == Some(self.id)
    }

    /// Writes `value` to the uniform called `name`.
    ///
    /// Names the linker dropped or never saw are skipped.
    ///
    /// # Panics
    ///
    /// Panics if the program is not active.
    pub fn set_uniform<U: Uniform>(&self, name: &str, value: U) {
        assert!(
            self.is_active(),
            "uniform `{name}` set on inactive program {:?}",
            self.id
        );

        let Some(location) = self.gl.api().uniform_location(self.id, name) else {
            log::debug!("uniform `{name}` not found in program {:?}", self.id);
            return;
        };

        self.gl.api().uniform(location, &value.to_uniform_value());
    }

    /// Reads the current value of the uniform called `name`.
    pub fn uniform<U: Uniform>(&self, name: &str) -> Option<U> {
        let location = self.gl.api().uniform_location(self.id, name)?;
        Some(U::read_back(self.gl.api(), self.id, location))
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.gl.api().delete_program(self.id);
        self.gl.bindings().forget_program(self.id);
    }
}

impl std::fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram").field("id", &self.id).finish()
    }
}

fn compile_stage(gl: &Gl, stage: ShaderStage, source: &str) -> Result<ShaderId, GlError> {
    let api = gl.api();
    let shader = api.create_shader(stage).map_err(|reason| GlError::Create {
        kind: "shader",
        reason,
    })?;

    api.shader_source(shader, source);
    api.compile_shader(shader);

    if !api.shader_compile_status(shader) {
        let log = non_empty_log(api.shader_info_log(shader));
        api.delete_shader(shader);
        return Err(GlError::Compile { stage, log });
    }

    Ok(shader)
}

fn link(gl: &Gl, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, GlError> {
    let api = gl.api();
    let program = api.create_program().map_err(|reason| GlError::Create {
        kind: "program",
        reason,
    })?;

    api.attach_shader(program, vertex);
    api.attach_shader(program, fragment);
    api.link_program(program);

    if !api.program_link_status(program) {
        let log = non_empty_log(api.program_info_log(program));
        api.delete_program(program);
        return Err(GlError::Link { log });
    }

    Ok(program)
}
