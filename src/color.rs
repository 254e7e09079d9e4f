// Simple color struct, created from an unsigned 32 representing 0x00RRGGBB,
// plus the two fixed page themes the field is drawn in

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Color {
        Color {
            a: a.max(0.0).min(1.0),
            ..self
        }
    }

    /// CSS `rgba()` string as accepted by `fillStyle` / `strokeStyle`.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Default,
    Alternate,
}

impl Theme {
    const DEFAULT_COLOR: u32 = 0xd2691e;
    const ALTERNATE_COLOR: u32 = 0x2d2a26;

    pub fn from_flag(alternate: bool) -> Theme {
        if alternate {
            Theme::Alternate
        } else {
            Theme::Default
        }
    }

    /// Opaque base color; particles and links apply their own alpha.
    pub fn color(self) -> Color {
        match self {
            Theme::Default => Color::from_u32(Theme::DEFAULT_COLOR),
            Theme::Alternate => Color::from_u32(Theme::ALTERNATE_COLOR),
        }
    }
}
