//! The per-frame task. The host calls [`Renderer::render_frame`] once per
//! display refresh and requests another callback while it reports
//! [`LoopState::Scheduled`].

use crate::config::ScenePreset;
use crate::controls::SceneState;
use crate::error::SetupError;
use crate::geometry::{QuadGeometry, QUAD_VERTICES};
use crate::graphics::Graphics;
use crate::shader::ShaderProgram;
use crate::uniforms::{self, FrameInputs};

/// Elapsed time since a fixed start, from a monotonic millisecond source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    start_ms: f64,
}

impl FrameClock {
    pub fn new(start_ms: f64) -> Self {
        Self { start_ms }
    }

    /// Seconds since start. Never negative.
    pub fn elapsed_secs(&self, now_ms: f64) -> f32 {
        ((now_ms - self.start_ms).max(0.0) * 0.001) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Scheduled,
}

/// Owns the linked program and the quad for the whole session.
pub struct Renderer<G: Graphics> {
    gl: G,
    program: ShaderProgram<G>,
    _geometry: QuadGeometry<G>,
    clock: FrameClock,
    state: LoopState,
    frames: u64,
}

impl<G: Graphics> Renderer<G> {
    /// Builds the program, uploads the quad and clears the surface. Nothing
    /// is drawn until the first [`render_frame`](Self::render_frame).
    pub fn new(
        gl: G,
        preset: &ScenePreset,
        vertex_src: &str,
        fragment_src: &str,
        start_ms: f64,
    ) -> Result<Self, SetupError> {
        let program = ShaderProgram::build(&gl, vertex_src, fragment_src, preset.uniforms)?;
        for name in program.bindings().absent() {
            log::debug!("uniform {name} not used by shader; skipping");
        }
        let geometry = QuadGeometry::upload(&gl, &program)?;
        gl.prepare_surface();

        Ok(Self {
            gl,
            program,
            _geometry: geometry,
            clock: FrameClock::new(start_ms),
            state: LoopState::Idle,
            frames: 0,
        })
    }

    /// Draws one frame with the current scene state and canvas size.
    pub fn render_frame(&mut self, now_ms: f64, size: (u32, u32), scene: &SceneState) -> LoopState {
        let frame = FrameInputs {
            time: self.clock.elapsed_secs(now_ms),
            width: size.0,
            height: size.1,
        };

        self.gl.viewport(frame.width, frame.height);
        self.gl.use_program(self.program.handle());
        uniforms::push(&self.gl, &self.program, &frame, scene);
        self.gl.draw_triangle_strip(QUAD_VERTICES);

        self.frames += 1;
        self.state = LoopState::Scheduled;
        self.state
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
