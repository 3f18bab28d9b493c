//! User-editable scene state and the glue that exposes it on a control panel.

use crate::config::ScenePreset;

/// Key (`KeyboardEvent.code`) that shows or hides the panel.
pub const TOGGLE_KEY: &str = "Space";

/// 8-bit RGB color as edited on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    /// Components scaled into `[0, 1]` for upload.
    pub fn normalized(self) -> [f32; 3] {
        self.0.map(|c| f32::from(c) / 255.0)
    }

    /// Parses `#rrggbb` as produced by `<input type=color>`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Named colors in panel order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: Vec<(&'static str, Rgb)>,
}

impl Palette {
    pub fn new(colors: &[(&'static str, Rgb)]) -> Self {
        Self {
            colors: colors.to_vec(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.colors.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
    }

    /// Replaces an existing color. Unknown names are ignored.
    pub fn set(&mut self, name: &str, color: Rgb) -> bool {
        match self.colors.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => {
                entry.1 = color;
                true
            }
            None => false,
        }
    }
}

/// Integer slider bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericControl {
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub default: i32,
}

impl NumericControl {
    /// Clamps raw widget input into range and snaps it to the step grid
    /// anchored at `min`. The result never leaves the grid, so when `max` is
    /// off-grid the highest value is the last grid point below it.
    pub fn constrain(&self, raw: f64) -> i32 {
        if raw.is_nan() {
            return self.default;
        }
        let step = self.step.max(1);
        let last = (self.max - self.min).max(0) / step;
        let offset = (raw - f64::from(self.min)) / f64::from(step);
        let steps = offset.round().clamp(0.0, f64::from(last)) as i32;
        self.min + steps * step
    }
}

/// Current value of every numeric control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectParameters {
    values: Vec<(NumericControl, i32)>,
}

impl EffectParameters {
    pub fn new(controls: &[NumericControl]) -> Self {
        Self {
            values: controls.iter().map(|c| (*c, c.default)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(c, _)| c.name == name)
            .map(|(_, v)| *v)
    }

    /// Stores `raw` after constraining it by the named control and returns the
    /// stored value.
    pub fn set(&mut self, name: &str, raw: f64) -> Option<i32> {
        let (control, value) = self.values.iter_mut().find(|(c, _)| c.name == name)?;
        *value = control.constrain(raw);
        Some(*value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    #[default]
    Visible,
    Hidden,
}

impl PanelVisibility {
    pub fn toggled(self) -> Self {
        match self {
            PanelVisibility::Visible => PanelVisibility::Hidden,
            PanelVisibility::Hidden => PanelVisibility::Visible,
        }
    }
}

/// Session state shared by the panel (writer) and the render loop (reader).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub palette: Palette,
    pub params: EffectParameters,
    pub panel: PanelVisibility,
}

impl SceneState {
    pub fn from_preset(preset: &ScenePreset) -> Self {
        Self {
            palette: Palette::new(preset.colors),
            params: EffectParameters::new(preset.controls),
            panel: PanelVisibility::Visible,
        }
    }

    /// Flips panel visibility when `code` is the toggle key and returns the
    /// new state. Every other key is ignored.
    pub fn handle_key(&mut self, code: &str) -> Option<PanelVisibility> {
        if code != TOGGLE_KEY {
            return None;
        }
        self.panel = self.panel.toggled();
        Some(self.panel)
    }
}

/// The widget surface the glue builds on.
pub trait ControlPanel {
    fn add_numeric_control(&mut self, name: &'static str, min: i32, max: i32, step: i32);
    fn add_color_control(&mut self, name: &'static str);
    fn show(&mut self);
    fn hide(&mut self);

    fn apply(&mut self, visibility: PanelVisibility) {
        match visibility {
            PanelVisibility::Visible => self.show(),
            PanelVisibility::Hidden => self.hide(),
        }
    }
}

/// Declares one widget per numeric control, then one per exposed color.
pub fn build_panel<P: ControlPanel>(panel: &mut P, preset: &ScenePreset) {
    for control in preset.controls {
        panel.add_numeric_control(control.name, control.min, control.max, control.step);
    }
    for &name in preset.panel_colors {
        panel.add_color_control(name);
    }
}
