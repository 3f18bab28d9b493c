//! Per-frame uniform upload driven by the preset's schema.

use crate::config::UniformSource;
use crate::controls::SceneState;
use crate::graphics::{Graphics, UniformValue};
use crate::shader::ShaderProgram;

/// Values that change every frame independently of the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub time: f32,
    pub width: u32,
    pub height: u32,
}

/// Value for one schema entry, or `None` when the state has nothing under
/// that name.
pub fn resolve(
    source: UniformSource,
    frame: &FrameInputs,
    state: &SceneState,
) -> Option<UniformValue> {
    match source {
        UniformSource::Time => Some(UniformValue::Float(frame.time)),
        UniformSource::Resolution => Some(UniformValue::Vec2([
            frame.width as f32,
            frame.height as f32,
        ])),
        UniformSource::Parameter(name) => state.params.get(name).map(UniformValue::Int),
        UniformSource::Color(name) => state
            .palette
            .get(name)
            .map(|c| UniformValue::Vec3(c.normalized())),
    }
}

/// Writes every resolved uniform of `program`. Absent locations are skipped.
pub fn push<G: Graphics>(
    gl: &G,
    program: &ShaderProgram<G>,
    frame: &FrameInputs,
    state: &SceneState,
) {
    for (spec, location) in program.bindings().uniforms() {
        let Some(location) = location else { continue };
        if let Some(value) = resolve(spec.source, frame, state) {
            gl.set_uniform(location, value);
        }
    }
}
