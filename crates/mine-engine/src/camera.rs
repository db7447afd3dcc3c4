//! Free-fly camera driven by movement keys and cursor deltas.
//!
//! Orientation is a single `front` vector rotated in place; there is no
//! yaw/pitch bookkeeping, no roll and no pitch clamp. Looking straight up or
//! down lets `front` pass the pole and the view flips.

use glam::{Mat4, Quat, Vec2, Vec3};

/// Semantic movement directions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    front: Vec3,
    up: Vec3,

    /// World units per second.
    speed: f32,
    /// Radians per cursor unit per second.
    sensitivity: f32,

    last_cursor: Option<Vec2>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Camera {
    /// Camera at the origin looking down +Z with +Y up.
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            eye: Vec3::ZERO,
            front: Vec3::Z,
            up: Vec3::Y,
            speed,
            sensitivity,
            last_cursor: None,
        }
    }

    pub fn set_position(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    pub fn position(&self) -> Vec3 {
        self.eye
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// `front × up`; not normalized.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up)
    }

    /// Translates the eye by `speed * dt` along `direction`.
    pub fn move_towards(&mut self, direction: Direction, dt: f32) {
        let velocity = self.speed * dt;
        let right = self.right();

        match direction {
            Direction::Forward => self.eye += self.front * velocity,
            Direction::Backward => self.eye -= self.front * velocity,
            Direction::Right => self.eye += right * velocity,
            Direction::Left => self.eye -= right * velocity,
            Direction::Up => self.eye += self.up * velocity,
            Direction::Down => self.eye -= self.up * velocity,
        }
    }

    /// Turns the camera by the cursor movement since the previous call.
    ///
    /// The first call only records the cursor. A horizontal delta yaws around
    /// `up`; a vertical delta pitches around `right`, taken before either
    /// rotation. An axis with zero delta is left untouched.
    pub fn handle_mouse_movement(&mut self, cursor: Vec2, dt: f32) {
        let previous = self.last_cursor.replace(cursor).unwrap_or(cursor);
        let delta = cursor - previous;

        let right = self.right();
        let velocity = self.sensitivity * dt;

        if delta.x != 0.0 {
            self.front = rotate(self.front, -(delta.x * velocity), self.up);
        }

        if delta.y != 0.0 {
            self.front = rotate(self.front, -(delta.y * velocity), right);
        }
    }

    /// Right-handed view matrix looking from `eye` towards `eye + front`.
    pub fn look_at(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.eye + self.front, self.up)
    }
}

/// Rotates `v` by `angle` radians around `axis`.
///
/// A degenerate axis (`front` parallel to `up`) leaves `v` unchanged.
fn rotate(v: Vec3, angle: f32, axis: Vec3) -> Vec3 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return v;
    }
    Quat::from_axis_angle(axis, angle) * v
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, EPS)
    }

    // ── movement ──────────────────────────────────────────────────────────

    #[test]
    fn forward_moves_along_front() {
        let mut cam = Camera::new(2.5, 1.0);
        cam.move_towards(Direction::Forward, 1.0);
        assert!(approx(cam.position(), Vec3::new(0.0, 0.0, 2.5)));
    }

    #[test]
    fn backward_is_inverse_of_forward() {
        let mut cam = Camera::new(2.5, 1.0);
        cam.move_towards(Direction::Forward, 0.4);
        cam.move_towards(Direction::Backward, 0.4);
        assert!(approx(cam.position(), Vec3::ZERO));
    }

    #[test]
    fn right_moves_along_front_cross_up() {
        // (0,0,1) × (0,1,0) = (-1,0,0): screen-right when looking down +Z.
        let mut cam = Camera::new(3.0, 1.0);
        cam.move_towards(Direction::Right, 1.0);
        assert!(approx(cam.position(), Vec3::new(-3.0, 0.0, 0.0)));

        cam.move_towards(Direction::Left, 2.0);
        assert!(approx(cam.position(), Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn up_and_down_follow_up_vector() {
        let mut cam = Camera::new(1.0, 1.0);
        cam.move_towards(Direction::Up, 0.5);
        assert!(approx(cam.position(), Vec3::new(0.0, 0.5, 0.0)));
        cam.move_towards(Direction::Down, 1.5);
        assert!(approx(cam.position(), Vec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn movement_scales_with_dt() {
        let mut cam = Camera::new(4.0, 1.0);
        cam.set_position(Vec3::new(0.0, 0.0, -1.0));
        cam.move_towards(Direction::Forward, 0.25);
        assert!(approx(cam.position(), Vec3::ZERO));
    }

    // ── mouse look ────────────────────────────────────────────────────────

    #[test]
    fn first_mouse_sample_only_records_baseline() {
        let mut cam = Camera::new(1.0, 1.0);
        cam.handle_mouse_movement(Vec2::new(400.0, 300.0), 1.0);
        assert_eq!(cam.front(), Vec3::Z);
    }

    #[test]
    fn unchanged_cursor_produces_no_rotation() {
        let mut cam = Camera::new(1.0, 0.01);
        cam.handle_mouse_movement(Vec2::new(0.0, 0.0), 1.0);
        cam.handle_mouse_movement(Vec2::new(10.0, 5.0), 1.0);
        let after_move = cam.front();

        cam.handle_mouse_movement(Vec2::new(10.0, 5.0), 1.0);
        assert_eq!(cam.front(), after_move);
    }

    #[test]
    fn horizontal_delta_yaws_around_up() {
        let mut cam = Camera::new(1.0, 1.0);
        cam.handle_mouse_movement(Vec2::ZERO, 1.0);
        cam.handle_mouse_movement(Vec2::new(std::f32::consts::FRAC_PI_2, 0.0), 1.0);

        // -90° around +Y takes +Z to -X.
        assert!(approx(cam.front(), Vec3::new(-1.0, 0.0, 0.0)));
        assert_eq!(cam.up(), Vec3::Y);
    }

    #[test]
    fn vertical_delta_pitches_around_right() {
        let mut cam = Camera::new(1.0, 1.0);
        cam.handle_mouse_movement(Vec2::ZERO, 1.0);
        cam.handle_mouse_movement(Vec2::new(0.0, 0.1), 1.0);

        let front = cam.front();
        assert!(front.x.abs() < EPS);
        // Cursor y grows downwards; the view follows it.
        assert!(front.y < 0.0, "moving the cursor down should tilt towards -Y, got {front}");
        assert!((front.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn rotation_scales_with_sensitivity_and_dt() {
        let mut a = Camera::new(1.0, 0.5);
        let mut b = Camera::new(1.0, 1.0);
        for cam in [&mut a, &mut b] {
            cam.handle_mouse_movement(Vec2::ZERO, 1.0);
        }
        a.handle_mouse_movement(Vec2::new(0.2, 0.0), 1.0);
        b.handle_mouse_movement(Vec2::new(0.2, 0.0), 0.5);
        assert!(approx(a.front(), b.front()));
    }

    #[test]
    fn degenerate_pitch_axis_leaves_front_unchanged() {
        assert_eq!(rotate(Vec3::Y, 0.3, Vec3::ZERO), Vec3::Y);
    }

    // ── view matrix ───────────────────────────────────────────────────────

    #[test]
    fn look_at_matches_eye_front_up() {
        let mut cam = Camera::new(1.0, 1.0);
        cam.set_position(Vec3::new(0.0, 0.0, -1.0));
        let expected = Mat4::look_at_rh(Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(cam.look_at(), expected);

        // The origin sits straight ahead, one unit down the view axis.
        let p = cam.look_at().transform_point3(Vec3::ZERO);
        assert!(approx(p, Vec3::new(0.0, 0.0, -1.0)));
    }
}
