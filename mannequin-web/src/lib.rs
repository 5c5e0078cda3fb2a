/// Mannequin Web - WebGL2 front-end for the mannequin scene
///
/// Looks up the canvas and the camera controls by id, wires DOM events to
/// scene control events and drives the scene from `requestAnimationFrame`.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mannequin_core::shader::ShaderSchema;
use mannequin_core::viewport::fit_canvas;
use mannequin_core::{ControlEvent, ProjectionPreset, RenderError, Scene, SceneConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, WebGl2RenderingContext as Gl,
    Window,
};

pub mod gl;

pub use gl::{WebGlMesh, WebGlMeshFactory, WebGlShader};

const VERTEX_SHADER: &str = include_str!("shaders/vertex_color.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/vertex_color.frag");

pub const ROLL_CONTROL: &str = "cameraRoll";
pub const DISTANCE_CONTROL: &str = "cameraZ";
pub const PROJECTION_CONTROL: &str = "projectionType";

fn js_error(err: RenderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn browser_window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Flip the started flag, failing if it was already set
fn claim_start(started: &Cell<bool>) -> Result<(), &'static str> {
    if started.replace(true) {
        Err("renderer already started")
    } else {
        Ok(())
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
}

struct App {
    scene: Scene<WebGlMesh>,
    shader: WebGlShader,
}

impl App {
    fn handle(&mut self, event: ControlEvent) {
        if let Err(e) = self.scene.handle(event) {
            log::warn!("ignoring {event:?}: {e}");
        }
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    app: Rc<RefCell<App>>,
    canvas: HtmlCanvasElement,
    gl: Gl,
    started: Cell<bool>,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Create the GL context on the canvas and build the scene
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = browser_window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = element(&document, canvas_id)?;
        let gl = canvas
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("WebGL2 is not available"))?
            .dyn_into::<Gl>()?;

        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.enable(Gl::DEPTH_TEST);

        let shader = WebGlShader::new(
            &gl,
            VERTEX_SHADER,
            FRAGMENT_SHADER,
            &ShaderSchema::vertex_color(),
        )
        .map_err(js_error)?;
        let scene = Scene::new(SceneConfig::default(), &mut WebGlMeshFactory::new(&gl))
            .map_err(js_error)?;

        Ok(WebRenderer {
            app: Rc::new(RefCell::new(App { scene, shader })),
            canvas,
            gl,
            started: Cell::new(false),
        })
    }

    /// Attach the control listeners and start the animation loop
    ///
    /// Fails when called a second time on the same renderer.
    pub fn start(&self) -> Result<(), JsValue> {
        claim_start(&self.started).map_err(JsValue::from_str)?;
        let window = browser_window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let roll: HtmlInputElement = element(&document, ROLL_CONTROL)?;
        self.listen(roll.as_ref(), "input", |target| {
            let value = target.dyn_into::<HtmlInputElement>().ok()?.value();
            value.parse().ok().map(ControlEvent::RollChanged)
        })?;

        let distance: HtmlInputElement = element(&document, DISTANCE_CONTROL)?;
        self.listen(distance.as_ref(), "input", |target| {
            let value = target.dyn_into::<HtmlInputElement>().ok()?.value();
            value.parse().ok().map(ControlEvent::DistanceChanged)
        })?;

        let projection: HtmlSelectElement = element(&document, PROJECTION_CONTROL)?;
        self.listen(projection.as_ref(), "change", |target| {
            let value = target.dyn_into::<HtmlSelectElement>().ok()?.value();
            match value.parse::<ProjectionPreset>() {
                Ok(preset) => Some(ControlEvent::ProjectionChanged(preset)),
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            }
        })?;

        self.watch_resize(&window)?;
        self.resize()?;
        self.animate(&window)
    }

    /// Render a single frame
    pub fn render(&self) {
        let mut app = self.app.borrow_mut();
        let App { scene, shader } = &mut *app;
        scene.tick(shader);
    }

    pub fn roll(&self, degrees: f32) {
        self.app.borrow_mut().handle(ControlEvent::RollChanged(degrees));
    }

    pub fn set_distance(&self, distance: f32) {
        self.app
            .borrow_mut()
            .handle(ControlEvent::DistanceChanged(distance));
    }

    pub fn set_projection(&self, name: &str) -> Result<(), JsValue> {
        let preset = name
            .parse::<ProjectionPreset>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.app
            .borrow_mut()
            .handle(ControlEvent::ProjectionChanged(preset));
        Ok(())
    }

    /// Refit the canvas to the window at 4:3 and update the GL viewport
    pub fn resize(&self) -> Result<(), JsValue> {
        resize_canvas(&browser_window()?, &self.canvas, &self.gl)
    }
}

impl WebRenderer {
    fn listen<F>(&self, target: &web_sys::EventTarget, kind: &str, to_event: F) -> Result<(), JsValue>
    where
        F: Fn(web_sys::EventTarget) -> Option<ControlEvent> + 'static,
    {
        let app = Rc::clone(&self.app);
        let callback = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            if let Some(control) = ev.target().and_then(&to_event) {
                app.borrow_mut().handle(control);
            }
        });
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        // listeners live as long as the page
        callback.forget();
        Ok(())
    }

    fn watch_resize(&self, window: &Window) -> Result<(), JsValue> {
        let canvas = self.canvas.clone();
        let gl = self.gl.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = browser_window().and_then(|w| resize_canvas(&w, &canvas, &gl)) {
                log::warn!("resize failed: {e:?}");
            }
        });
        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
        callback.forget();
        Ok(())
    }

    fn animate(&self, window: &Window) -> Result<(), JsValue> {
        let app = Rc::clone(&self.app);
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let next = Rc::clone(&frame);

        *frame.borrow_mut() = Some(Closure::new(move || {
            {
                let mut app = app.borrow_mut();
                let App { scene, shader } = &mut *app;
                scene.tick(shader);
            }
            if let Some(callback) = next.borrow().as_ref() {
                if let Ok(w) = browser_window() {
                    if let Err(e) = w.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        log::warn!("animation stopped: {e:?}");
                    }
                }
            }
        }));

        let first = frame.borrow();
        let callback = first
            .as_ref()
            .ok_or_else(|| JsValue::from_str("animation callback missing"))?;
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        Ok(())
    }
}

fn resize_canvas(window: &Window, canvas: &HtmlCanvasElement, gl: &Gl) -> Result<(), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    let size = fit_canvas(width, height, f64::from(canvas.offset_top()));

    canvas.set_width(size.width);
    canvas.set_height(size.height);
    gl.viewport(0, 0, size.width as i32, size.height as i32);
    Ok(())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
