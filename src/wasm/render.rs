use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlCanvasElement, Window};

use super::webgl::WebGl;
use crate::controls::SceneState;
use crate::error::SetupError;
use crate::render::{LoopState, Renderer};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Sizes the canvas to the window's inner size.
pub fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> Result<(), SetupError> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    log::debug!("canvas resized to {}x{}", canvas.width(), canvas.height());
    Ok(())
}

/// Keeps the canvas sized to the window for the rest of the session.
pub fn watch_resize(window: &Window, canvas: &HtmlCanvasElement) -> Result<(), SetupError> {
    let resize_closure = {
        let window = window.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            if let Err(err) = fit_to_window(&window, &canvas) {
                log::error!("resize failed: {err}");
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();
    Ok(())
}

/// Hands `renderer` to `requestAnimationFrame`. Each callback draws one frame
/// at the canvas's current size and schedules the next.
pub fn start(
    window: Window,
    canvas: HtmlCanvasElement,
    mut renderer: Renderer<WebGl>,
    state: Rc<RefCell<SceneState>>,
) -> Result<(), SetupError> {
    let performance = window
        .performance()
        .ok_or_else(|| SetupError::page("no performance clock"))?;

    // `f` holds the frame closure so it can request itself again. The
    // `Option` lets the closure be created before it is referenced.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let frame_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let size = (canvas.width(), canvas.height());
        let next = renderer.render_frame(performance.now(), size, &state.borrow());
        if next == LoopState::Scheduled {
            if let Err(err) = request_frame(&frame_window, &f) {
                log::error!("could not schedule next frame: {err}");
            }
        }
    }) as Box<dyn FnMut()>));

    request_frame(&window, &g)
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<(), SetupError> {
    let callback = callback.borrow();
    let closure = callback
        .as_ref()
        .ok_or_else(|| SetupError::page("frame callback missing"))?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    Ok(())
}
