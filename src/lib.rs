mod animator;
mod color;
mod config;
mod debounce;
mod environment;
mod error;
mod field;
mod lifecycle;
mod overlay;
mod particle;
mod surface;
mod utils;
mod web;

use wasm_bindgen::prelude::*;

pub use animator::Animator;
pub use color::{Color, Theme};
pub use config::FieldConfig;
pub use debounce::{Debouncer, Ticket};
pub use environment::{Disabled, Environment};
pub use error::SetupError;
pub use field::{link_opacity, Bounds, Field, Link};
pub use lifecycle::{FrameAction, Lifecycle, Resume, State};
pub use overlay::{AnimationControl, Overlay};
pub use particle::Particle;
pub use surface::{CanvasSurface, DrawCommand, RecordingSurface, Surface};
pub use web::{AnimationHandle, ModalOverlay};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Installs the panic hook and the console logger. Safe to call more than once.
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Starts the particle network behind the page.
///
/// `config` is an optional JSON object overriding [`FieldConfig`] defaults.
/// Resolves to `undefined` when the page has no canvas or the device is
/// excluded (touch input, narrow viewport); the canvas is hidden in the
/// latter case. Otherwise returns the handle other components use to pause
/// and resume the animation.
#[wasm_bindgen]
pub fn start_background(config: Option<String>) -> Result<Option<AnimationHandle>, JsValue> {
    let config = match config {
        Some(json) => FieldConfig::from_json(&json)?,
        None => FieldConfig::default(),
    };
    Ok(web::start(config)?)
}
