// Tunable constants for the background field, optionally overridden from JSON

use serde::Deserialize;

use crate::error::SetupError;

/// Everything the animator needs to know up front.
///
/// Every field has a default, so a page may pass a partial JSON object
/// (or nothing at all) to `start_background`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Number of particles created on every setup.
    pub particle_count: usize,
    /// Maximum distance at which two particles are linked.
    pub link_distance: f64,
    pub particle_radius: f64,
    /// Lower end of the speed band, in pixels per tick.
    pub min_speed: f64,
    /// Upper end of the speed band, in pixels per tick.
    pub max_speed: f64,
    pub line_width: f64,
    pub particle_alpha: f64,
    /// Viewports narrower than this never start the animation.
    pub min_viewport_width: f64,
    pub resize_debounce_ms: u32,
    pub canvas_id: String,
    /// Body class that switches the palette to the alternate theme.
    pub alternate_theme_class: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 60,
            link_distance: 150.0,
            particle_radius: 2.0,
            min_speed: 0.1,
            max_speed: 0.35,
            line_width: 1.0,
            particle_alpha: 0.5,
            min_viewport_width: 768.0,
            resize_debounce_ms: 250,
            canvas_id: "neural-bg".to_owned(),
            alternate_theme_class: "contact-page-body".to_owned(),
        }
    }
}

impl FieldConfig {
    /// Largest delay `setTimeout` accepts without overflowing.
    pub const MAX_DEBOUNCE_MS: u32 = i32::MAX as u32;

    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.particle_count == 0 {
            return Err(invalid("particle_count must be at least 1"));
        }
        if !(self.link_distance > 0.0) {
            return Err(invalid("link_distance must be positive"));
        }
        if !(self.particle_radius > 0.0) {
            return Err(invalid("particle_radius must be positive"));
        }
        if !(self.min_speed >= 0.0) || !(self.max_speed >= self.min_speed) {
            return Err(invalid("speed band must satisfy 0 <= min_speed <= max_speed"));
        }
        if !(0.0..=1.0).contains(&self.particle_alpha) {
            return Err(invalid("particle_alpha must be within [0, 1]"));
        }
        if !(self.line_width > 0.0) {
            return Err(invalid("line_width must be positive"));
        }
        if !(self.min_viewport_width >= 0.0) || !self.min_viewport_width.is_finite() {
            return Err(invalid("min_viewport_width must be a finite, non-negative width"));
        }
        if self.resize_debounce_ms > Self::MAX_DEBOUNCE_MS {
            return Err(invalid("resize_debounce_ms does not fit a browser timeout"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> SetupError {
    SetupError::InvalidConfig(reason.to_owned())
}
