use anyhow::Result;
use glam::{Mat4, Vec3, Vec4};

use mine_engine::camera::{Camera, Direction};
use mine_engine::core::{App, AppControl, FrameCtx};
use mine_engine::gl::{
    AttribLayout, BufferTarget, BufferUsage, Gl, IndexType, PrimitiveMode, ShaderProgram,
    VertexArray,
};
use mine_engine::input::Key;

const VERTEX_SHADER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/vertex.glsl");
const FRAGMENT_SHADER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/fragment.glsl");

const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.9, 1.0];
const QUAD_COLOR: Vec4 = Vec4::new(1.0, 0.5, 0.2, 1.0);
const QUAD_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 0.2);

const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// World units per second.
const CAMERA_SPEED: f32 = 3.0;
/// Radians per pixel of mouse travel per second.
const CAMERA_SENSITIVITY: f32 = 0.6;
const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, -1.0);

#[rustfmt::skip]
const QUAD_VERTICES: [f32; 12] = [
     0.5,  0.5, 0.0,
     0.5, -0.5, 0.0,
    -0.5, -0.5, 0.0,
    -0.5,  0.5, 0.0,
];

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

const KEY_BINDINGS: &[(Key, Direction)] = &[
    (Key::W, Direction::Forward),
    (Key::S, Direction::Backward),
    (Key::A, Direction::Left),
    (Key::D, Direction::Right),
    (Key::Z, Direction::Up),
    (Key::X, Direction::Down),
];

pub struct QuadScene {
    gl: Gl,
    program: ShaderProgram,
    quad: VertexArray,
    camera: Camera,
}

impl QuadScene {
    pub fn new(gl: &Gl) -> Result<Self> {
        let program = ShaderProgram::from_files(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        let quad = VertexArray::with_setup(gl, |vao| {
            vao.add_buffer(BufferTarget::Array)?
                .upload(&QUAD_VERTICES, BufferUsage::StaticDraw);
            vao.attrib_pointer(0, AttribLayout::floats(3));

            vao.add_buffer(BufferTarget::ElementArray)?
                .upload(&QUAD_INDICES, BufferUsage::StaticDraw);
            Ok(())
        })?;

        let mut camera = Camera::new(CAMERA_SPEED, CAMERA_SENSITIVITY);
        camera.set_position(CAMERA_START);

        Ok(Self {
            gl: gl.clone(),
            program,
            quad,
            camera,
        })
    }

    fn steer(&mut self, ctx: &FrameCtx<'_>) {
        let dt = ctx.dt();

        for &(key, direction) in KEY_BINDINGS {
            if ctx.is_key_pressed(key) {
                self.camera.move_towards(direction, dt);
            }
        }

        self.camera.handle_mouse_movement(ctx.cursor_position(), dt);
    }

    fn render(&mut self, aspect: f32) {
        self.gl.clear(CLEAR_COLOR);

        self.program.activate();
        self.quad.bind();

        self.program.set_uniform("offset", QUAD_OFFSET);
        self.program.set_uniform("color", QUAD_COLOR);
        self.program.set_uniform("mvp", model_view_projection(&self.camera, aspect));

        self.gl
            .draw_elements(PrimitiveMode::Triangles, QUAD_INDICES.len() as i32, IndexType::U32, 0);

        self.program.deactivate();
        self.quad.unbind();
    }
}

impl App for QuadScene {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if ctx.is_key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        self.steer(ctx);
        self.render(ctx.window.aspect_ratio());

        AppControl::Continue
    }
}

/// Projection and view of `camera`; the quad's model matrix is identity.
fn model_view_projection(camera: &Camera, aspect: f32) -> Mat4 {
    let projection = Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
    projection * camera.look_at() * Mat4::IDENTITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_movement_key_is_bound_once() {
        for (i, (key, _)) in KEY_BINDINGS.iter().enumerate() {
            assert!(
                KEY_BINDINGS[i + 1..].iter().all(|(other, _)| other != key),
                "{key:?} bound twice"
            );
        }
        assert!(KEY_BINDINGS.iter().all(|(key, _)| *key != Key::Escape));
    }

    #[test]
    fn indices_stay_within_vertex_count() {
        let vertex_count = (QUAD_VERTICES.len() / 3) as u32;
        assert!(QUAD_INDICES.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn quad_center_projects_in_front_of_starting_camera() {
        let mut camera = Camera::new(CAMERA_SPEED, CAMERA_SENSITIVITY);
        camera.set_position(CAMERA_START);

        let clip = model_view_projection(&camera, 640.0 / 480.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;

        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((-1.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn shader_files_ship_with_the_crate() {
        let vertex = std::fs::read_to_string(VERTEX_SHADER).unwrap();
        let fragment = std::fs::read_to_string(FRAGMENT_SHADER).unwrap();

        assert!(vertex.contains("uniform mat4 mvp;"));
        assert!(vertex.contains("uniform vec3 offset;"));
        assert!(fragment.contains("uniform vec4 color;"));
    }
}
