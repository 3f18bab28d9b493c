//! Recording stand-in for the graphics context used by the unit tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::ShaderStage;
use crate::graphics::{Graphics, UniformValue};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(u32, ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    CreateBuffer(u32),
    Upload(u32, Vec<f32>),
    EnableAttrib(u32, i32),
    SetUniform(String, UniformValue),
    PrepareSurface,
    Viewport(u32, u32),
    Draw(i32),
}

/// Clones share one call log, so a test can keep a probe after handing the
/// context to a renderer.
#[derive(Default, Clone)]
pub struct FakeGl {
    pub calls: Rc<RefCell<Vec<Call>>>,
    next_id: Rc<RefCell<u32>>,
    shader_stages: Rc<RefCell<Vec<(u32, ShaderStage)>>>,
    pub fail_stage: Option<ShaderStage>,
    pub fail_link: bool,
    /// Uniform and attribute names the fake program does not define.
    pub missing: HashSet<&'static str>,
}

impl FakeGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_stage(stage: ShaderStage) -> Self {
        Self {
            fail_stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    pub fn without(names: &[&'static str]) -> Self {
        Self {
            missing: names.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn id(&self) -> u32 {
        let mut next = self.next_id.borrow_mut();
        *next += 1;
        *next
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn draws(&self) -> usize {
        self.count(|c| matches!(c, Call::Draw(_)))
    }

    /// Uniform writes recorded since the last `clear`.
    pub fn uniforms(&self) -> Vec<(String, UniformValue)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::SetUniform(name, value) => Some((name.clone(), *value)),
                _ => None,
            })
            .collect()
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms()
            .into_iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Graphics for FakeGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    /// The fake resolves a uniform to its own name.
    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        let id = self.id();
        self.shader_stages.borrow_mut().push((id, stage));
        self.record(Call::CreateShader(id, stage));
        Some(id)
    }

    fn compile_shader(&self, shader: &u32, _source: &str) -> Result<(), String> {
        self.record(Call::CompileShader(*shader));
        let stage = self
            .shader_stages
            .borrow()
            .iter()
            .find(|(id, _)| id == shader)
            .map(|(_, s)| *s);
        if stage.is_some() && stage == self.fail_stage {
            return Err("0:1: syntax error".to_string());
        }
        Ok(())
    }

    fn delete_shader(&self, shader: &u32) {
        self.record(Call::DeleteShader(*shader));
    }

    fn create_program(&self) -> Option<u32> {
        let id = self.id();
        self.record(Call::CreateProgram(id));
        Some(id)
    }

    fn link_program(&self, program: &u32, _vertex: &u32, _fragment: &u32) -> Result<(), String> {
        self.record(Call::LinkProgram(*program));
        if self.fail_link {
            return Err("varying mismatch".to_string());
        }
        Ok(())
    }

    fn delete_program(&self, program: &u32) {
        self.record(Call::DeleteProgram(*program));
    }

    fn use_program(&self, program: &u32) {
        self.record(Call::UseProgram(*program));
    }

    fn attrib_location(&self, _program: &u32, name: &str) -> Option<u32> {
        if self.missing.contains(name) {
            return None;
        }
        match name {
            "aVertexPosition" => Some(0),
            "aVertexUV" => Some(1),
            _ => None,
        }
    }

    fn uniform_location(&self, _program: &u32, name: &str) -> Option<String> {
        if self.missing.contains(name) {
            None
        } else {
            Some(name.to_string())
        }
    }

    fn create_buffer(&self) -> Option<u32> {
        let id = self.id();
        self.record(Call::CreateBuffer(id));
        Some(id)
    }

    fn upload_static(&self, buffer: &u32, data: &[f32]) {
        self.record(Call::Upload(*buffer, data.to_vec()));
    }

    fn enable_float_attrib(&self, location: u32, components: i32) {
        self.record(Call::EnableAttrib(location, components));
    }

    fn set_uniform(&self, location: &String, value: UniformValue) {
        self.record(Call::SetUniform(location.clone(), value));
    }

    fn prepare_surface(&self) {
        self.record(Call::PrepareSurface);
    }

    fn viewport(&self, width: u32, height: u32) {
        self.record(Call::Viewport(width, height));
    }

    fn draw_triangle_strip(&self, vertex_count: i32) {
        self.record(Call::Draw(vertex_count));
    }
}
