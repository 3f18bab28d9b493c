//! Scene presets and the canvas-attribute configuration that selects one.

use log::LevelFilter;

use crate::controls::{NumericControl, Rgb};
use crate::error::SetupError;

/// Where a uniform's value comes from each frame. The source fixes the arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformSource {
    /// Seconds since the loop started, `float`.
    Time,
    /// Canvas size in pixels, `vec2`.
    Resolution,
    /// Named effect parameter, `int`.
    Parameter(&'static str),
    /// Named palette color, normalized `vec3`.
    Color(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSpec {
    pub name: &'static str,
    pub source: UniformSource,
}

const fn uniform(name: &'static str, source: UniformSource) -> UniformSpec {
    UniformSpec { name, source }
}

/// A shader variant: its uniforms, default values, and panel layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePreset {
    pub name: &'static str,
    pub uniforms: &'static [UniformSpec],
    pub colors: &'static [(&'static str, Rgb)],
    pub controls: &'static [NumericControl],
    /// Colors exposed on the panel, in order.
    pub panel_colors: &'static [&'static str],
}

pub const BANDED: ScenePreset = ScenePreset {
    name: "banded",
    uniforms: &[
        uniform("u_resolution", UniformSource::Resolution),
        uniform("u_time", UniformSource::Time),
        uniform("u_numColors", UniformSource::Parameter("numColors")),
        uniform("u_colorOne", UniformSource::Color("colorOne")),
        uniform("u_colorTwo", UniformSource::Color("colorTwo")),
        uniform("u_colorThree", UniformSource::Color("colorThree")),
        uniform("u_colorSun", UniformSource::Color("colorSun")),
    ],
    colors: &[
        ("colorOne", Rgb::new(0, 40, 128)),
        ("colorTwo", Rgb::new(20, 20, 80)),
        ("colorThree", Rgb::new(10, 30, 15)),
        ("colorSun", Rgb::new(255, 120, 80)),
    ],
    controls: &[NumericControl {
        name: "numColors",
        min: 1,
        max: 3,
        step: 1,
        default: 2,
    }],
    panel_colors: &["colorOne", "colorTwo", "colorThree", "colorSun"],
};

pub const CLASSIC: ScenePreset = ScenePreset {
    name: "classic",
    uniforms: &[
        uniform("u_resolution", UniformSource::Resolution),
        uniform("u_time", UniformSource::Time),
        uniform("u_colorOne", UniformSource::Color("colorOne")),
        uniform("u_colorTwo", UniformSource::Color("colorTwo")),
        uniform("u_colorThree", UniformSource::Color("colorThree")),
        uniform("u_colorFour", UniformSource::Color("colorFour")),
    ],
    colors: &[
        ("colorOne", Rgb::new(0, 40, 128)),
        ("colorTwo", Rgb::new(20, 20, 80)),
        ("colorThree", Rgb::new(10, 30, 15)),
        ("colorFour", Rgb::new(55, 30, 15)),
    ],
    controls: &[],
    panel_colors: &["colorOne", "colorTwo", "colorThree", "colorFour"],
};

pub const PRESETS: [&ScenePreset; 2] = [&BANDED, &CLASSIC];

impl ScenePreset {
    pub fn by_name(name: &str) -> Option<&'static ScenePreset> {
        PRESETS.into_iter().find(|p| p.name == name)
    }
}

pub const DEFAULT_CANVAS_ID: &str = "glcanvas";

/// Startup settings read from the canvas element's `data-*` attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub vertex_url: String,
    pub fragment_url: String,
    pub preset: &'static ScenePreset,
    pub log_level: LevelFilter,
}

impl CanvasConfig {
    /// `lookup` receives dataset keys (`vert`, `frag`, `preset`, `logLevel`).
    pub fn from_dataset(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SetupError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| SetupError::page(format!("canvas is missing data-{key}")))
        };
        let vertex_url = required("vert")?;
        let fragment_url = required("frag")?;

        let preset = match lookup("preset") {
            Some(name) => ScenePreset::by_name(name.trim())
                .ok_or_else(|| SetupError::page(format!("unknown scene preset `{name}`")))?,
            None => &BANDED,
        };

        let log_level = match lookup("logLevel") {
            Some(level) => level
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| SetupError::page(format!("unknown log level `{level}`")))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            vertex_url,
            fragment_url,
            preset,
            log_level,
        })
    }
}
