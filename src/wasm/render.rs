use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Document, HtmlCanvasElement, KeyboardEvent, Window};

use super::frame::RafScheduler;
use super::gl::WebGlContext;
use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::scene_loop::SceneLoop;

const CONFIG_ELEMENT_ID: &str = "scene-config";

type BrowserScene = SceneLoop<WebGlContext, RafScheduler>;

/// Builds the scene on the configured canvas, wires keyboard and resize
/// listeners and kicks off the animation loop.
pub fn start() -> Result<()> {
    let window = window().ok_or_else(|| host_error("no window"))?;
    let document = window.document().ok_or_else(|| host_error("no document"))?;
    let config = read_config(&document)?;

    let canvas = document
        .get_element_by_id(&config.canvas_id)
        .ok_or_else(|| host_error(&format!("canvas #{} not found", config.canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| host_error(&format!("#{} is not a canvas", config.canvas_id)))?;
    fit_to_window(&window, &canvas);

    let scheduler = RafScheduler::new(window.clone());
    let callback = scheduler.callback_slot();
    let armed = scheduler.armed_slot();
    let scene: Rc<RefCell<BrowserScene>> = Rc::new(RefCell::new(SceneLoop::new(
        WebGlContext::new(canvas.clone())?,
        scheduler,
        config,
    )?));

    // Animation loop. The scheduler re-registers this same closure for
    // every frame; `armed` tells it which handle the firing belongs to.
    {
        let scene = Rc::clone(&scene);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(handle) = armed.take() {
                scene.borrow_mut().on_frame(handle);
            }
        }) as Box<dyn FnMut(f64)>));
    }

    let on_key = {
        let scene = Rc::clone(&scene);
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            scene.borrow_mut().handle_key(&event.key());
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
        .map_err(|e| js_error("keydown listener", e))?;
    on_key.forget();

    // Resize canvas to fit window
    let on_resize = {
        let scene = Rc::clone(&scene);
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            fit_to_window(&window, &canvas);
            scene.borrow_mut().refresh();
        }) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|e| js_error("resize listener", e))?;
    on_resize.forget();

    let mut scene = scene.borrow_mut();
    scene.start()
}

/// Reads `<script type="application/json" id="scene-config">` if present.
fn read_config(document: &Document) -> Result<SceneConfig> {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        log::info!("no #{CONFIG_ELEMENT_ID} element, using default scene");
        return Ok(SceneConfig::default());
    };
    let json = element.text_content().unwrap_or_default();
    SceneConfig::from_json(&json)
}

fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) {
    let px = |v: std::result::Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
    if let (Some(w), Some(h)) = (px(window.inner_width()), px(window.inner_height())) {
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }
}

fn host_error(msg: &str) -> SceneError {
    SceneError::Host(msg.to_owned())
}

fn js_error(context: &str, e: JsValue) -> SceneError {
    SceneError::Host(format!("{context}: {e:?}"))
}
