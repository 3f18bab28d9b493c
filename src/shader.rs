//! Compiles and links the two shader stages and resolves the names the render
//! loop writes to.

use crate::config::UniformSpec;
use crate::error::{SetupError, ShaderStage};
use crate::graphics::Graphics;

pub const POSITION_ATTRIB: &str = "aVertexPosition";
pub const UV_ATTRIB: &str = "aVertexUV";

/// Locations resolved against one program. Only reachable through the
/// [`ShaderProgram`] that produced them.
pub struct Bindings<G: Graphics> {
    pub position: Option<u32>,
    pub uv: Option<u32>,
    uniforms: Vec<(UniformSpec, Option<G::UniformLocation>)>,
}

impl<G: Graphics> Bindings<G> {
    pub fn uniforms(&self) -> impl Iterator<Item = (&UniformSpec, Option<&G::UniformLocation>)> {
        self.uniforms.iter().map(|(spec, loc)| (spec, loc.as_ref()))
    }

    /// Names the program does not define; writes to these are skipped.
    pub fn absent(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.uniforms
            .iter()
            .filter(|(_, loc)| loc.is_none())
            .map(|(spec, _)| spec.name)
    }
}

/// A linked program and its bindings.
pub struct ShaderProgram<G: Graphics> {
    program: G::Program,
    bindings: Bindings<G>,
}

impl<G: Graphics> ShaderProgram<G> {
    /// Compiles `vertex_src` then `fragment_src`, links them, and resolves the
    /// quad attributes plus every uniform in `schema`.
    pub fn build(
        gl: &G,
        vertex_src: &str,
        fragment_src: &str,
        schema: &[UniformSpec],
    ) -> Result<Self, SetupError> {
        let vertex = compile(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile(gl, ShaderStage::Fragment, fragment_src) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(&vertex);
                return Err(err);
            }
        };

        let linked = gl
            .create_program()
            .ok_or(SetupError::Allocation("shader program"))
            .and_then(|program| match gl.link_program(&program, &vertex, &fragment) {
                Ok(()) => Ok(program),
                Err(log) => {
                    gl.delete_program(&program);
                    Err(SetupError::ShaderLink { log })
                }
            });

        // The program keeps the stages alive once linked.
        gl.delete_shader(&vertex);
        gl.delete_shader(&fragment);
        let program = linked?;

        let bindings = Bindings {
            position: gl.attrib_location(&program, POSITION_ATTRIB),
            uv: gl.attrib_location(&program, UV_ATTRIB),
            uniforms: schema
                .iter()
                .map(|spec| (*spec, gl.uniform_location(&program, spec.name)))
                .collect(),
        };

        Ok(Self { program, bindings })
    }

    pub fn handle(&self) -> &G::Program {
        &self.program
    }

    pub fn bindings(&self) -> &Bindings<G> {
        &self.bindings
    }
}

fn compile<G: Graphics>(gl: &G, stage: ShaderStage, source: &str) -> Result<G::Shader, SetupError> {
    let shader = gl
        .create_shader(stage)
        .ok_or(SetupError::Allocation("shader"))?;
    if let Err(log) = gl.compile_shader(&shader, source) {
        gl.delete_shader(&shader);
        return Err(SetupError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BANDED;
    use crate::fake::{Call, FakeGl};

    #[test]
    fn links_and_resolves_schema() {
        let gl = FakeGl::new();
        let program = ShaderProgram::build(&gl, "v", "f", BANDED.uniforms).unwrap();

        let bindings = program.bindings();
        assert_eq!(bindings.position, Some(0));
        assert_eq!(bindings.uv, Some(1));
        assert_eq!(bindings.uniforms().count(), BANDED.uniforms.len());
        assert_eq!(bindings.absent().count(), 0);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram(_))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader(_))), 2);
    }

    #[test]
    fn vertex_failure_stops_before_fragment() {
        let gl = FakeGl::failing_stage(ShaderStage::Vertex);
        let err = ShaderProgram::build(&gl, "v", "f", BANDED.uniforms).err().unwrap();

        assert!(matches!(
            err,
            SetupError::ShaderCompile {
                stage: ShaderStage::Vertex,
                ref log,
            } if log == "0:1: syntax error"
        ));
        assert_eq!(gl.count(|c| matches!(c, Call::CreateShader(..))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram(_))), 0);
    }

    #[test]
    fn fragment_failure_releases_both_stages() {
        let gl = FakeGl::failing_stage(ShaderStage::Fragment);
        let err = ShaderProgram::build(&gl, "v", "f", BANDED.uniforms).err().unwrap();

        assert!(matches!(
            err,
            SetupError::ShaderCompile { stage: ShaderStage::Fragment, .. }
        ));
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram(_))), 0);
    }

    #[test]
    fn link_failure_returns_no_program() {
        let gl = FakeGl::failing_link();
        let err = ShaderProgram::build(&gl, "v", "f", BANDED.uniforms).err().unwrap();

        assert!(matches!(err, SetupError::ShaderLink { ref log } if log == "varying mismatch"));
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteProgram(_))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader(_))), 2);
    }

    #[test]
    fn missing_names_resolve_to_absent() {
        let gl = FakeGl::without(&["u_colorSun", "aVertexUV"]);
        let program = ShaderProgram::build(&gl, "v", "f", BANDED.uniforms).unwrap();

        assert_eq!(program.bindings().uv, None);
        assert_eq!(program.bindings().absent().collect::<Vec<_>>(), ["u_colorSun"]);
    }
}
