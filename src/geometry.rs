use crate::error::SetupError;
use crate::graphics::Graphics;
use crate::shader::ShaderProgram;

/// Clip-space corners: right top, left top, right bottom, left bottom.
pub const QUAD_POSITIONS: [f32; 8] = [1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
/// Texture coordinates matching `QUAD_POSITIONS` index for index.
pub const QUAD_UVS: [f32; 8] = [1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0];
pub const QUAD_VERTICES: i32 = 4;

const COMPONENTS: i32 = 2;

/// Full-screen quad drawn as a triangle strip. Uploaded once, never updated.
pub struct QuadGeometry<G: Graphics> {
    _positions: G::Buffer,
    _uvs: G::Buffer,
}

impl<G: Graphics> QuadGeometry<G> {
    pub fn upload(gl: &G, program: &ShaderProgram<G>) -> Result<Self, SetupError> {
        let bindings = program.bindings();
        let positions = upload_attrib(gl, &QUAD_POSITIONS, bindings.position)?;
        let uvs = upload_attrib(gl, &QUAD_UVS, bindings.uv)?;
        Ok(Self {
            _positions: positions,
            _uvs: uvs,
        })
    }
}

fn upload_attrib<G: Graphics>(
    gl: &G,
    data: &[f32],
    location: Option<u32>,
) -> Result<G::Buffer, SetupError> {
    let buffer = gl
        .create_buffer()
        .ok_or(SetupError::Allocation("vertex buffer"))?;
    gl.upload_static(&buffer, data);
    if let Some(location) = location {
        gl.enable_float_attrib(location, COMPONENTS);
    }
    Ok(buffer)
}
