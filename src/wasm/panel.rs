//! Floating DOM control panel bound to the shared scene state.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::controls::{ControlPanel, Rgb, SceneState};
use crate::error::SetupError;

const PANEL_ID: &str = "controls";

const PANEL_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("right", "16px"),
    ("min-width", "220px"),
    ("padding", "8px"),
    ("background", "rgba(26, 26, 26, 0.9)"),
    ("color", "#eee"),
    ("font", "11px sans-serif"),
    ("z-index", "10"),
];

pub fn input_id(name: &str) -> String {
    format!("{PANEL_ID}-{name}")
}

pub struct DomPanel {
    document: Document,
    root: HtmlElement,
    state: Rc<RefCell<SceneState>>,
}

impl DomPanel {
    /// Appends an empty panel to `<body>`.
    pub fn new(document: &Document, state: Rc<RefCell<SceneState>>) -> Result<Self, SetupError> {
        let root = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SetupError::page("div is not an HtmlElement"))?;
        root.set_id(PANEL_ID);
        let style = root.style();
        for (property, value) in PANEL_STYLE {
            style.set_property(property, value)?;
        }
        document
            .body()
            .ok_or_else(|| SetupError::page("document has no body"))?
            .append_child(&root)?;

        Ok(Self {
            document: document.clone(),
            root,
            state,
        })
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    /// Adds `label` followed by a new input of `kind`.
    fn row(&self, label: &str, kind: &str) -> Result<(HtmlElement, HtmlInputElement), SetupError> {
        let row = self.document.create_element("label")?;
        row.set_attribute("style", "display: flex; justify-content: space-between; margin: 4px 0")?;

        let caption = self
            .document
            .create_element("span")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SetupError::page("span is not an HtmlElement"))?;
        caption.set_inner_text(label);

        let input = self
            .document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| SetupError::page("input is not an HtmlInputElement"))?;
        input.set_type(kind);
        input.set_id(&input_id(label));

        row.append_child(&caption)?;
        row.append_child(&input)?;
        self.root.append_child(&row)?;
        Ok((caption, input))
    }

    fn try_add_numeric(
        &self,
        name: &'static str,
        min: i32,
        max: i32,
        step: i32,
    ) -> Result<(), SetupError> {
        let current = self
            .state
            .borrow()
            .params
            .get(name)
            .ok_or_else(|| SetupError::page(format!("no effect parameter named {name}")))?;

        let (caption, input) = self.row(name, "range")?;
        input.set_min(&min.to_string());
        input.set_max(&max.to_string());
        input.set_step(&step.to_string());
        input.set_value_as_number(f64::from(current));
        caption.set_inner_text(&format!("{name} {current}"));

        let state = self.state.clone();
        let target = input.clone();
        let on_input = Closure::wrap(Box::new(move || {
            let raw = target.value_as_number();
            let stored = state.borrow_mut().params.set(name, raw);
            if let Some(value) = stored {
                target.set_value_as_number(f64::from(value));
                caption.set_inner_text(&format!("{name} {value}"));
            }
        }) as Box<dyn FnMut()>);
        input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
        Ok(())
    }

    fn try_add_color(&self, name: &'static str) -> Result<(), SetupError> {
        let current = self
            .state
            .borrow()
            .palette
            .get(name)
            .ok_or_else(|| SetupError::page(format!("no palette color named {name}")))?;

        let (_, input) = self.row(name, "color")?;
        input.set_value(&current.to_hex());

        let state = self.state.clone();
        let target = input.clone();
        let on_input = Closure::wrap(Box::new(move || {
            let value = target.value();
            match Rgb::from_hex(&value) {
                Some(color) => {
                    state.borrow_mut().palette.set(name, color);
                }
                None => log::warn!("ignoring color `{value}` for {name}"),
            }
        }) as Box<dyn FnMut()>);
        input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
        Ok(())
    }

    fn set_display(&self, display: &str) {
        if let Err(err) = self.root.style().set_property("display", display) {
            log::error!("could not set panel display: {err:?}");
        }
    }
}

impl ControlPanel for DomPanel {
    fn add_numeric_control(&mut self, name: &'static str, min: i32, max: i32, step: i32) {
        if let Err(err) = self.try_add_numeric(name, min, max, step) {
            log::error!("could not add control {name}: {err}");
        }
    }

    fn add_color_control(&mut self, name: &'static str) {
        if let Err(err) = self.try_add_color(name) {
            log::error!("could not add control {name}: {err}");
        }
    }

    fn show(&mut self) {
        self.set_display("block");
    }

    fn hide(&mut self) {
        self.set_display("none");
    }
}

/// Shows or hides `panel` on every space `keyup`.
pub fn listen_for_toggle(
    document: &Document,
    state: Rc<RefCell<SceneState>>,
    panel: Rc<RefCell<DomPanel>>,
) -> Result<(), SetupError> {
    let on_keyup = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let toggled = state.borrow_mut().handle_key(&event.code());
        if let Some(visibility) = toggled {
            panel.borrow_mut().apply(visibility);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())?;
    on_keyup.forget();
    Ok(())
}
