//! The slice of a WebGL-style context the effect needs.
//!
//! Everything above this trait is platform independent; the browser provides
//! an implementation over `WebGl2RenderingContext` and the unit tests use a
//! recording fake.

use crate::error::ShaderStage;

/// Value written to a uniform slot. The variant fixes the upload call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

pub trait Graphics {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    /// Sets the source and compiles. Returns the info log on failure.
    fn compile_shader(&self, shader: &Self::Shader, source: &str) -> Result<(), String>;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    /// Attaches both stages and links. Returns the info log on failure.
    fn link_program(
        &self,
        program: &Self::Program,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<(), String>;
    fn delete_program(&self, program: &Self::Program);
    fn use_program(&self, program: &Self::Program);

    /// `None` when the program has no active attribute of that name.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> Option<u32>;
    /// `None` when the program has no active uniform of that name.
    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    /// Binds `buffer` as the array buffer and uploads `data` for static use.
    fn upload_static(&self, buffer: &Self::Buffer, data: &[f32]);
    /// Points `location` at the bound array buffer: tightly packed floats,
    /// `components` per vertex, not normalized.
    fn enable_float_attrib(&self, location: u32, components: i32);

    fn set_uniform(&self, location: &Self::UniformLocation, value: UniformValue);

    /// Depth test with `LEQUAL` and a black, fully cleared surface.
    fn prepare_surface(&self);
    fn viewport(&self, width: u32, height: u32);
    fn draw_triangle_strip(&self, vertex_count: i32);
}
