use std::fmt;

use thiserror::Error;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Everything that can stop the effect from starting. None of these are
/// retried: startup logs the error and leaves the canvas blank.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("error in {stage} shader:\n\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("error linking shader program:\n\n{log}")]
    ShaderLink { log: String },

    #[error("could not fetch shader source `{url}`: {reason}")]
    Fetch { url: String, reason: String },

    #[error("graphics context could not allocate a {0}")]
    Allocation(&'static str),

    #[error("{0}")]
    Page(String),
}

impl SetupError {
    pub(crate) fn page(msg: impl Into<String>) -> Self {
        SetupError::Page(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SetupError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SetupError::Page(format!("{value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_stage() {
        let err = SetupError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error".into(),
        };
        let text = err.to_string();
        assert!(text.starts_with("error in fragment shader"));
        assert!(text.ends_with("0:3: syntax error"));
    }

    #[test]
    fn fetch_error_mentions_url() {
        let err = SetupError::Fetch {
            url: "shaders/quad.vert".into(),
            reason: "HTTP 404".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not fetch shader source `shaders/quad.vert`: HTTP 404"
        );
    }
}
