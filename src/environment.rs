// One-time startup decision: is this a device the background should run on

use thiserror::Error;

use crate::config::FieldConfig;
use crate::field::Bounds;

/// What the page reports about the device at startup.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Environment {
    pub touch_capable: bool,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

/// Why the animation stays off. Not an error, just logged.
#[derive(Debug, Error, PartialEq)]
pub enum Disabled {
    #[error("touch-primary device")]
    TouchDevice,
    #[error("viewport {width}px is narrower than {breakpoint}px")]
    NarrowViewport { width: f64, breakpoint: f64 },
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport { width: f64, height: f64 },
}

impl Environment {
    /// Decides once whether the animation runs. Not re-evaluated on resize.
    pub fn gate(&self, config: &FieldConfig) -> Result<Bounds, Disabled> {
        if self.touch_capable {
            return Err(Disabled::TouchDevice);
        }
        if self.viewport_width < config.min_viewport_width {
            return Err(Disabled::NarrowViewport {
                width: self.viewport_width,
                breakpoint: config.min_viewport_width,
            });
        }
        Bounds::new(self.viewport_width, self.viewport_height).ok_or(Disabled::EmptyViewport {
            width: self.viewport_width,
            height: self.viewport_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop(width: f64) -> Environment {
        Environment {
            touch_capable: false,
            viewport_width: width,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn wide_desktop_runs() {
        let bounds = desktop(1000.0).gate(&FieldConfig::default()).unwrap();
        assert_eq!(bounds, Bounds::new(1000.0, 800.0).unwrap());
    }

    #[test]
    fn breakpoint_width_itself_runs() {
        assert!(desktop(768.0).gate(&FieldConfig::default()).is_ok());
    }

    #[test]
    fn narrow_viewport_is_disabled() {
        let reason = desktop(767.0).gate(&FieldConfig::default()).unwrap_err();
        assert_eq!(
            reason,
            Disabled::NarrowViewport {
                width: 767.0,
                breakpoint: 768.0
            }
        );
    }

    #[test]
    fn touch_wins_over_width() {
        let env = Environment {
            touch_capable: true,
            ..desktop(1920.0)
        };
        assert_eq!(env.gate(&FieldConfig::default()), Err(Disabled::TouchDevice));
    }

    #[test]
    fn zero_height_is_disabled() {
        let env = Environment {
            viewport_height: 0.0,
            ..desktop(1200.0)
        };
        assert!(matches!(
            env.gate(&FieldConfig::default()),
            Err(Disabled::EmptyViewport { .. })
        ));
    }
}
