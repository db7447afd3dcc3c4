use glam::{IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use super::api::{GlApi, ProgramId, UniformLocation};

/// A uniform write, one variant per shape GL can take in a single call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float1(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Int1(i32),
    Int2([i32; 2]),
    Int3([i32; 3]),
    Int4([i32; 4]),
    /// Column-major.
    Mat2([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
}

impl UniformValue {
    /// Float components in column-major order, or `None` for integer shapes.
    pub fn float_components(&self) -> Option<&[f32]> {
        match self {
            UniformValue::Float1(v) => Some(std::slice::from_ref(v)),
            UniformValue::Float2(v) => Some(v),
            UniformValue::Float3(v) => Some(v),
            UniformValue::Float4(v) => Some(v),
            UniformValue::Mat2(m) => Some(m),
            UniformValue::Mat3(m) => Some(m),
            UniformValue::Mat4(m) => Some(m),
            _ => None,
        }
    }

    pub fn int_components(&self) -> Option<&[i32]> {
        match self {
            UniformValue::Int1(v) => Some(std::slice::from_ref(v)),
            UniformValue::Int2(v) => Some(v),
            UniformValue::Int3(v) => Some(v),
            UniformValue::Int4(v) => Some(v),
            _ => None,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Types that can be written to a shader uniform.
///
/// Implemented for scalar and vector shapes of 1 to 4 `f32`/`i32` components
/// and for square float matrices of order 2 to 4. The trait is sealed, so any
/// other shape fails to compile at the call site.
pub trait Uniform: sealed::Sealed + Sized {
    fn to_uniform_value(&self) -> UniformValue;

    /// Reads the uniform at `location` of `program` back from the driver.
    fn read_back(api: &dyn GlApi, program: ProgramId, location: UniformLocation) -> Self;
}

macro_rules! impl_uniform {
    ($ty:ty, $elem:ty, $n:literal, $variant:ident, $read:ident, $to:expr, $from:expr) => {
        impl sealed::Sealed for $ty {}

        impl Uniform for $ty {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$variant(($to)(self))
            }

            fn read_back(api: &dyn GlApi, program: ProgramId, location: UniformLocation) -> Self {
                let mut out: [$elem; $n] = [Default::default(); $n];
                api.$read(program, location, &mut out);
                ($from)(out)
            }
        }
    };
}

impl_uniform!(f32, f32, 1, Float1, read_uniform_f32, |v: &f32| *v, |a: [f32; 1]| a[0]);
impl_uniform!(Vec2, f32, 2, Float2, read_uniform_f32, Vec2::to_array, Vec2::from_array);
impl_uniform!(Vec3, f32, 3, Float3, read_uniform_f32, Vec3::to_array, Vec3::from_array);
impl_uniform!(Vec4, f32, 4, Float4, read_uniform_f32, Vec4::to_array, Vec4::from_array);

impl_uniform!(i32, i32, 1, Int1, read_uniform_i32, |v: &i32| *v, |a: [i32; 1]| a[0]);
impl_uniform!(IVec2, i32, 2, Int2, read_uniform_i32, IVec2::to_array, IVec2::from_array);
impl_uniform!(IVec3, i32, 3, Int3, read_uniform_i32, IVec3::to_array, IVec3::from_array);
impl_uniform!(IVec4, i32, 4, Int4, read_uniform_i32, IVec4::to_array, IVec4::from_array);

impl_uniform!(Mat2, f32, 4, Mat2, read_uniform_f32, Mat2::to_cols_array, |a: [f32; 4]| {
    Mat2::from_cols_array(&a)
});
impl_uniform!(Mat3, f32, 9, Mat3, read_uniform_f32, Mat3::to_cols_array, |a: [f32; 9]| {
    Mat3::from_cols_array(&a)
});
impl_uniform!(Mat4, f32, 16, Mat4, read_uniform_f32, Mat4::to_cols_array, |a: [f32; 16]| {
    Mat4::from_cols_array(&a)
});
