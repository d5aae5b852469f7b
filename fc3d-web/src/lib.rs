/// FC3D Web - WASM front end drawing the shared scene through WebGL2
///
/// JavaScript calls `start` (or `start_with_config`) once the page has loaded.
/// The viewer attaches a canvas to the configured container and wires
/// keyboard, pointer, wheel and window-resize events into the shared
/// `Viewer`.
use fc3d_core::{ControlMode, Error, RedrawPolicy, Result, ViewConfig, ViewEvent, Viewer};
use log::{info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, WebGl2RenderingContext,
    WheelEvent, Window,
};

pub mod batches;
pub mod gl;

pub use gl::WebGlRenderer;

type SharedViewer = Rc<RefCell<Viewer<WebGlRenderer>>>;

/// Installs a panic hook that forwards Rust panics to the browser console.
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// The two keys the viewer claims. Every other key keeps its default action.
pub fn key_event(key: &str) -> Option<ViewEvent> {
    match key {
        "ArrowLeft" => Some(ViewEvent::RotateLeft),
        "ArrowRight" => Some(ViewEvent::RotateRight),
        _ => None,
    }
}

/// Wheel delta to zoom notches: scrolling up moves towards the scene
pub fn wheel_notches(delta_y: f64) -> f32 {
    if delta_y < 0.0 {
        1.0
    } else if delta_y > 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub fn parse_mode(mode: &str) -> ControlMode {
    match mode {
        "keys" => ControlMode::Keys,
        "orbit" => ControlMode::Orbit,
        other => {
            warn!("unknown control mode '{}', using keys", other);
            ControlMode::Keys
        }
    }
}

fn host_error(err: JsValue) -> Error {
    Error::render(format!("{:?}", err))
}

fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn report(err: &Error) {
    console::error_1(&JsValue::from_str(&err.to_string()));
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::capability("browser window"))
}

fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| Error::capability("document"))
}

/// Ask a canvas for a WebGL2 context
fn request_webgl(canvas: &HtmlCanvasElement) -> Result<WebGl2RenderingContext> {
    canvas
        .get_context("webgl2")
        .map_err(host_error)?
        .and_then(|context| context.dyn_into::<WebGl2RenderingContext>().ok())
        .ok_or_else(|| Error::capability("WebGL"))
}

/// Create the canvas, check for WebGL2 and only then attach it to the
/// container
fn create_renderer(config: &ViewConfig) -> Result<WebGlRenderer> {
    let document = document()?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(host_error)?
        .dyn_into()
        .map_err(|_| Error::render("canvas element has the wrong type"))?;
    let gl = request_webgl(&canvas)?;

    let container = document
        .get_element_by_id(config.container())
        .ok_or_else(|| Error::render(format!("no element with id '{}'", config.container())))?;
    container.append_child(&canvas).map_err(host_error)?;

    WebGlRenderer::new(canvas, gl)
}

/// A running viewer. Dropping it stops the timer and detaches every event
/// listener.
#[wasm_bindgen]
pub struct WebViewer {
    viewer: SharedViewer,
    listeners: Vec<(web_sys::EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>)>,
    interval: Option<i32>,
    _interval_callback: Option<Closure<dyn FnMut()>>,
    running: Rc<Cell<bool>>,
}

/// Start the default view for a control mode (`"keys"` or `"orbit"`)
#[wasm_bindgen]
pub fn start(mode: &str) -> std::result::Result<WebViewer, JsValue> {
    WebViewer::start(ViewConfig::for_mode(parse_mode(mode))).map_err(to_js)
}

/// Start a view from a JSON `ViewConfig`
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> std::result::Result<WebViewer, JsValue> {
    let config = ViewConfig::from_json(json).map_err(to_js)?;
    WebViewer::start(config).map_err(to_js)
}

impl WebViewer {
    pub fn start(config: ViewConfig) -> Result<Self> {
        let viewer = match Viewer::launch(&config, create_renderer) {
            Ok(viewer) => viewer,
            Err(err) => {
                if err.is_capability() {
                    // Reported once; nothing else is set up
                    if let Ok(window) = window() {
                        let _ = window.alert_with_message(&err.to_string());
                    }
                }
                return Err(err);
            }
        };
        info!(
            "viewer started in #{} ({:?}, {:?})",
            config.container(),
            config.mode,
            config.redraw_policy()
        );

        let mut web = Self {
            viewer: Rc::new(RefCell::new(viewer)),
            listeners: Vec::new(),
            interval: None,
            _interval_callback: None,
            running: Rc::new(Cell::new(true)),
        };
        web.listen(&config)?;
        web.schedule(&config)?;
        Ok(web)
    }

    fn on<F>(&mut self, target: web_sys::EventTarget, kind: &'static str, handler: F) -> Result<()>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(host_error)?;
        self.listeners.push((target, kind, closure));
        Ok(())
    }

    fn listen(&mut self, config: &ViewConfig) -> Result<()> {
        let window = window()?;
        let document = document()?;

        let viewer = self.viewer.clone();
        self.on(document.into(), "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(view_event) = key_event(&key.key()) {
                event.prevent_default();
                dispatch(&viewer, view_event);
            }
        })?;

        let viewer = self.viewer.clone();
        self.on(window.clone().into(), "resize", move |_| {
            let Ok(window) = self::window() else {
                return;
            };
            let size = |value: std::result::Result<JsValue, JsValue>| {
                value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
            };
            let width = size(window.inner_width());
            let height = size(window.inner_height());
            dispatch(&viewer, ViewEvent::Resize { width, height });
        })?;

        if config.mode == ControlMode::Orbit {
            let canvas = self.viewer.borrow().renderer().canvas().clone();
            let last = Rc::new(Cell::new(None::<(i32, i32)>));

            let pressed = last.clone();
            self.on(canvas.clone().into(), "mousedown", move |event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    if mouse.button() == 0 {
                        pressed.set(Some((mouse.client_x(), mouse.client_y())));
                    }
                }
            })?;

            let viewer = self.viewer.clone();
            let dragged = last.clone();
            self.on(window.clone().into(), "mousemove", move |event| {
                let (Some(mouse), Some((x, y))) = (event.dyn_ref::<MouseEvent>(), dragged.get())
                else {
                    return;
                };
                let here = (mouse.client_x(), mouse.client_y());
                dragged.set(Some(here));
                dispatch(
                    &viewer,
                    ViewEvent::Drag {
                        dx: (here.0 - x) as f32,
                        dy: (here.1 - y) as f32,
                    },
                );
            })?;

            self.on(window.into(), "mouseup", move |_| last.set(None))?;

            let viewer = self.viewer.clone();
            self.on(canvas.into(), "wheel", move |event| {
                if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                    event.prevent_default();
                    let notches = wheel_notches(wheel.delta_y());
                    if notches != 0.0 {
                        dispatch(&viewer, ViewEvent::Zoom { notches });
                    }
                }
            })?;
        }

        Ok(())
    }

    fn schedule(&mut self, config: &ViewConfig) -> Result<()> {
        match config.redraw_policy() {
            RedrawPolicy::OnChange => Ok(()),
            RedrawPolicy::Poll => {
                let viewer = self.viewer.clone();
                let callback = Closure::wrap(Box::new(move || tick(&viewer)) as Box<dyn FnMut()>);
                let id = window()?
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        callback.as_ref().unchecked_ref(),
                        config.poll_interval_ms as i32,
                    )
                    .map_err(host_error)?;
                self.interval = Some(id);
                self._interval_callback = Some(callback);
                Ok(())
            }
            RedrawPolicy::Continuous => {
                let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
                let next = frame.clone();
                let viewer = self.viewer.clone();
                let running = self.running.clone();

                *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    if !running.get() {
                        return;
                    }
                    tick(&viewer);
                    if let (Ok(window), Some(callback)) = (self::window(), next.borrow().as_ref()) {
                        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
                    }
                }) as Box<dyn FnMut()>));

                let first = frame.borrow();
                if let Some(callback) = first.as_ref() {
                    window()?
                        .request_animation_frame(callback.as_ref().unchecked_ref())
                        .map_err(host_error)?;
                }
                Ok(())
            }
        }
    }
}

#[wasm_bindgen]
impl WebViewer {
    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.viewer.borrow().frames()
    }

    pub fn rotate_left(&self) {
        dispatch(&self.viewer, ViewEvent::RotateLeft);
    }

    pub fn rotate_right(&self) {
        dispatch(&self.viewer, ViewEvent::RotateRight);
    }
}

impl Drop for WebViewer {
    fn drop(&mut self) {
        self.running.set(false);
        if let Ok(window) = window() {
            if let Some(id) = self.interval.take() {
                window.clear_interval_with_handle(id);
            }
        }
        for (target, kind, closure) in self.listeners.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}

fn dispatch(viewer: &SharedViewer, event: ViewEvent) {
    if let Err(err) = viewer.borrow_mut().handle(event) {
        report(&err);
    }
}

fn tick(viewer: &SharedViewer) {
    if let Err(err) = viewer.borrow_mut().tick() {
        report(&err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_arrows_are_claimed() {
        assert_eq!(key_event("ArrowLeft"), Some(ViewEvent::RotateLeft));
        assert_eq!(key_event("ArrowRight"), Some(ViewEvent::RotateRight));
        assert_eq!(key_event("ArrowUp"), None);
        assert_eq!(key_event("a"), None);
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(wheel_notches(-120.0), 1.0);
        assert_eq!(wheel_notches(53.0), -1.0);
        assert_eq!(wheel_notches(0.0), 0.0);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("orbit"), ControlMode::Orbit);
        assert_eq!(parse_mode("keys"), ControlMode::Keys);
        assert_eq!(parse_mode("sideways"), ControlMode::Keys);
    }
}
