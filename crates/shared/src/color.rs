//! Accent color parsing and the derived shades used by the panel theme.

pub const DEFAULT_ACCENT_COLOR: &str = "#4a90e2";

const DEFAULT_ACCENT_RGB: Rgb = Rgb {
    r: 74,
    g: 144,
    b: 226,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`, case-insensitive. Shorthand `#rgb` is rejected.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn darken(self, percent: f32) -> Self {
        let factor = 1.0 - percent / 100.0;
        let scale = |channel: u8| -> u8 { (channel as f32 * factor).round().clamp(0.0, 255.0) as u8 };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// Unmultiplied RGBA with `alpha` in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> [u8; 4] {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentPalette {
    pub base: Rgb,
    pub dark: Rgb,
    pub darker: Rgb,
    pub tint_15: [u8; 4],
    pub tint_20: [u8; 4],
    pub tint_30: [u8; 4],
}

impl AccentPalette {
    pub fn from_hex(hex: &str) -> Self {
        let base = Rgb::from_hex(hex).unwrap_or(DEFAULT_ACCENT_RGB);
        Self {
            base,
            dark: base.darken(15.0),
            darker: base.darken(30.0),
            tint_15: base.with_alpha(0.15),
            tint_20: base.with_alpha(0.2),
            tint_30: base.with_alpha(0.3),
        }
    }
}

impl Default for AccentPalette {
    fn default() -> Self {
        Self::from_hex(DEFAULT_ACCENT_COLOR)
    }
}
