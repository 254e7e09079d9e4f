// Browser glue: finds the canvas, probes the device, drives the animator from
// requestAnimationFrame and debounces window resizes through setTimeout.

use std::cell::RefCell;
use std::convert::TryFrom;
use std::rc::{Rc, Weak};

use rand::rngs::ThreadRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::animator::Animator;
use crate::color::Theme;
use crate::config::FieldConfig;
use crate::environment::Environment;
use crate::error::SetupError;
use crate::field::Bounds;
use crate::lifecycle::{FrameAction, Resume};
use crate::overlay::{AnimationControl, Overlay};
use crate::surface::CanvasSurface;

type CanvasAnimator = Animator<CanvasSurface, ThreadRng>;

thread_local! {
    // Owns the running animation for the rest of the page's life. Handles
    // given to JS are extra references; freeing them never stops the loop.
    static RUNTIME: RefCell<Option<Rc<Runtime>>> = RefCell::new(None);
}

struct Runtime {
    window: Window,
    document: Document,
    theme_class: String,
    resize_delay_ms: i32,
    animator: RefCell<CanvasAnimator>,
    // Holds the frame callback so it can request itself again.
    on_frame: RefCell<Option<Closure<dyn FnMut()>>>,
}

pub(crate) fn start(config: FieldConfig) -> Result<Option<AnimationHandle>, SetupError> {
    let window = web_sys::window().ok_or(SetupError::NoWindow)?;
    let document = window.document().ok_or(SetupError::NoDocument)?;

    let canvas = match find_canvas(&document, &config.canvas_id) {
        Ok(canvas) => canvas,
        Err(err) if err.is_surface_unavailable() => {
            log::info!("neural background skipped: {}", err);
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    if let Some(runtime) = RUNTIME.with(|slot| slot.borrow().clone()) {
        log::debug!("neural background already running, returning its handle");
        return Ok(Some(AnimationHandle { runtime }));
    }

    let environment = probe_environment(&window)?;
    let bounds = match environment.gate(&config) {
        Ok(bounds) => bounds,
        Err(reason) => {
            log::info!("neural background disabled: {}", reason);
            hide(&canvas);
            return Ok(None);
        }
    };

    let surface = match CanvasSurface::new(canvas.clone()) {
        Ok(surface) => surface,
        Err(err) if err.is_surface_unavailable() => {
            log::warn!("neural background skipped: {}", err);
            hide(&canvas);
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let theme_class = config.alternate_theme_class.clone();
    let animator = Animator::new(config, surface, rand::thread_rng(), bounds);
    let resize_delay_ms = i32::try_from(animator.resize_delay_ms()).unwrap_or(i32::MAX);
    let runtime = Rc::new(Runtime {
        window,
        document,
        theme_class,
        resize_delay_ms,
        animator: RefCell::new(animator),
        on_frame: RefCell::new(None),
    });

    install_frame_callback(&runtime);
    listen_for_resize(&runtime)?;
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime.clone()));
    let first_frame = runtime.animator.borrow_mut().start();
    if first_frame {
        runtime.request_frame();
    }

    log::info!(
        "neural background running: {}x{}, {} particles",
        bounds.width,
        bounds.height,
        runtime.animator.borrow().field().len()
    );
    Ok(Some(AnimationHandle { runtime }))
}

fn find_canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, SetupError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SetupError::SurfaceMissing(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SetupError::NotACanvas(id.to_owned()))
}

fn hide(canvas: &HtmlCanvasElement) {
    if let Err(err) = canvas.style().set_property("display", "none") {
        log::warn!("could not hide canvas: {:?}", err);
    }
}

fn probe_environment(window: &Window) -> Result<Environment, SetupError> {
    let touch_events = js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart"))?;
    let touch_points = window.navigator().max_touch_points() > 0;
    let viewport_width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let viewport_height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Environment {
        touch_capable: touch_events || touch_points,
        viewport_width,
        viewport_height,
    })
}

fn viewport_bounds(window: &Window) -> Option<Bounds> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Bounds::new(width, height)
}

fn install_frame_callback(runtime: &Rc<Runtime>) {
    let weak: Weak<Runtime> = Rc::downgrade(runtime);
    let callback = Closure::wrap(Box::new(move || {
        if let Some(runtime) = weak.upgrade() {
            runtime.on_animation_frame();
        }
    }) as Box<dyn FnMut()>);
    *runtime.on_frame.borrow_mut() = Some(callback);
}

fn listen_for_resize(runtime: &Rc<Runtime>) -> Result<(), SetupError> {
    let weak = Rc::downgrade(runtime);
    let on_resize = Closure::wrap(Box::new(move || {
        if let Some(runtime) = weak.upgrade() {
            schedule_resize(&runtime);
        }
    }) as Box<dyn FnMut()>);
    runtime
        .window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    on_resize.forget();
    Ok(())
}

fn schedule_resize(runtime: &Rc<Runtime>) {
    let bounds = match viewport_bounds(&runtime.window) {
        Some(bounds) => bounds,
        None => {
            log::debug!("ignoring resize to an empty viewport");
            return;
        }
    };
    let ticket = runtime.animator.borrow_mut().request_resize(bounds);
    let weak = Rc::downgrade(runtime);
    let fire = Closure::once_into_js(move || {
        if let Some(runtime) = weak.upgrade() {
            runtime.animator.borrow_mut().apply_resize(ticket);
        }
    });
    if let Err(err) = runtime
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            fire.unchecked_ref(),
            runtime.resize_delay_ms,
        )
    {
        log::warn!("could not schedule resize: {:?}", err);
    }
}

impl Runtime {
    fn theme(&self) -> Theme {
        let alternate = self
            .document
            .body()
            .map_or(false, |body| body.class_list().contains(&self.theme_class));
        Theme::from_flag(alternate)
    }

    fn on_animation_frame(&self) {
        let action = self.animator.borrow_mut().frame(|| self.theme());
        if action == FrameAction::Render {
            self.request_frame();
        }
    }

    fn request_frame(&self) {
        let requested = match self.on_frame.borrow().as_ref() {
            Some(callback) => self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map(|_| ()),
            None => Err(JsValue::from_str("frame callback not installed")),
        };
        if let Err(err) = requested {
            log::warn!("requestAnimationFrame failed, loop stopped: {:?}", err);
            self.animator.borrow_mut().frame_dropped();
        }
    }

    fn pause(&self) {
        self.animator.borrow_mut().pause();
    }

    fn resume(&self) {
        let outcome = self.animator.borrow_mut().resume();
        if outcome == Resume::Restart {
            self.request_frame();
        }
    }
}

/// Pause/resume handle returned to the page.
#[wasm_bindgen]
#[derive(Clone)]
pub struct AnimationHandle {
    runtime: Rc<Runtime>,
}

#[wasm_bindgen]
impl AnimationHandle {
    pub fn pause(&self) {
        self.runtime.pause();
    }

    pub fn resume(&self) {
        self.runtime.resume();
    }

    pub fn is_running(&self) -> bool {
        self.runtime.animator.borrow().is_running()
    }

    /// How many times the field has been (re)built, the initial setup included.
    pub fn setup_count(&self) -> u32 {
        self.runtime.animator.borrow().setups() as u32
    }

    /// Particle positions flattened as `[x0, y0, x1, y1, ...]`.
    pub fn positions(&self) -> Vec<f64> {
        self.runtime
            .animator
            .borrow()
            .field()
            .particles()
            .iter()
            .flat_map(|p| p.pos.iter().copied())
            .collect()
    }

    /// A modal overlay wired to this animation.
    pub fn overlay(&self) -> ModalOverlay {
        ModalOverlay {
            inner: Overlay::new(self.clone()),
        }
    }
}

impl AnimationControl for AnimationHandle {
    fn pause(&self) {
        AnimationHandle::pause(self);
    }

    fn resume(&self) {
        AnimationHandle::resume(self);
    }
}

/// Modal dialog state as seen by the background: open pauses, close resumes.
#[wasm_bindgen]
pub struct ModalOverlay {
    inner: Overlay<AnimationHandle>,
}

#[wasm_bindgen]
impl ModalOverlay {
    pub fn open(&mut self) -> bool {
        self.inner.open()
    }

    pub fn close(&mut self) -> bool {
        self.inner.close()
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }
}
