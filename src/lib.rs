pub mod config;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod render;
pub mod shader;
pub mod uniforms;

#[cfg(test)]
mod fake;

// Browser glue only compiles when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use log::LevelFilter;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, Window};

    use crate::config::{CanvasConfig, DEFAULT_CANVAS_ID};
    use crate::controls::{build_panel, SceneState};
    use crate::error::SetupError;
    use crate::render::Renderer;

    pub mod fetch;
    pub mod panel;
    pub mod render;
    pub mod webgl;

    use panel::DomPanel;
    use webgl::WebGl;

    /// Logs setup failures instead of throwing, so a page without the
    /// canvas (such as the test runner) still loads the module.
    #[wasm_bindgen(start)]
    pub fn main() {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Trace).is_ok() {
            log::set_max_level(LevelFilter::Info);
        }

        if let Err(err) = launch() {
            log::error!("{err}");
        }
    }

    fn launch() -> Result<(), SetupError> {
        let window = web_sys::window().ok_or_else(|| SetupError::page("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| SetupError::page("no document"))?;
        let canvas = document
            .get_element_by_id(DEFAULT_CANVAS_ID)
            .ok_or_else(|| SetupError::page(format!("no #{DEFAULT_CANVAS_ID} canvas")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SetupError::page(format!("#{DEFAULT_CANVAS_ID} is not a canvas")))?;

        let dataset = canvas.dataset();
        let config = CanvasConfig::from_dataset(|key| dataset.get(key))?;
        log::set_max_level(config.log_level);
        log::info!("starting `{}` scene", config.preset.name);

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = run(window, document, canvas, config).await {
                log::error!("{err}");
            }
        });
        Ok(())
    }

    async fn run(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        config: CanvasConfig,
    ) -> Result<(), SetupError> {
        let state = Rc::new(RefCell::new(SceneState::from_preset(config.preset)));
        let panel = Rc::new(RefCell::new(DomPanel::new(&document, state.clone())?));
        build_panel(&mut *panel.borrow_mut(), config.preset);
        panel::listen_for_toggle(&document, state.clone(), panel)?;

        render::fit_to_window(&window, &canvas)?;
        render::watch_resize(&window, &canvas)?;
        let gl = WebGl::from_canvas(&canvas)?;

        let vertex_src = fetch::fetch_text(&window, &config.vertex_url).await?;
        log::debug!("vertex shader `{}`:\n{vertex_src}", config.vertex_url);
        let fragment_src = fetch::fetch_text(&window, &config.fragment_url).await?;
        log::debug!("fragment shader `{}`:\n{fragment_src}", config.fragment_url);

        let start_ms = window
            .performance()
            .ok_or_else(|| SetupError::page("no performance clock"))?
            .now();
        let renderer = Renderer::new(gl, config.preset, &vertex_src, &fragment_src, start_ms)?;
        log::info!("shader program linked, starting render loop");

        render::start(window, canvas, renderer, state)
    }
}
