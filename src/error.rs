use thiserror::Error;
use wasm_bindgen::JsValue;

/// Reasons the background animation could not be brought up.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global `window` object")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    SurfaceMissing(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("canvas does not provide a 2d context")]
    NoContext,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("malformed config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl SetupError {
    /// True when the page simply has no usable drawing surface. The feature is
    /// skipped quietly in that case instead of reporting an error to the caller.
    pub fn is_surface_unavailable(&self) -> bool {
        matches!(
            self,
            SetupError::SurfaceMissing(_) | SetupError::NotACanvas(_) | SetupError::NoContext
        )
    }
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        SetupError::Js(format!("{:?}", value))
    }
}

impl From<SetupError> for JsValue {
    fn from(err: SetupError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
