//! RGBA color type and the annotation palette.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum) and are
/// straight (not premultiplied) alpha.
///
/// # Examples
///
/// ```
/// use screenpen::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let from_bytes = Color::from_rgb8(255, 165, 0);
/// assert_eq!(from_bytes.a, 1.0);
/// # let _ = red;
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#rrggbb` hex notation into an opaque color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Converts to straight 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Sets this color as the cairo source.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

// ============================================================================
// Palette
// ============================================================================

pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);

pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);

pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Orange (255, 165, 0)
pub const ORANGE: Color = Color::new(1.0, 165.0 / 255.0, 0.0, 1.0);

/// Gray (128, 128, 128)
pub const GRAY: Color = Color::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0);

/// Fully transparent; painted by the eraser and used to clear layers.
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

/// Palette in toolbar order, paired with the names accepted by the config file.
pub const PALETTE: [(&str, Color); 10] = [
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("cyan", CYAN),
    ("magenta", MAGENTA),
    ("yellow", YELLOW),
    ("black", BLACK),
    ("white", WHITE),
    ("orange", ORANGE),
    ("gray", GRAY),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_with_and_without_hash() {
        assert_eq!(Color::from_hex("#7acfe6"), Some(Color::from_rgb8(0x7a, 0xcf, 0xe6)));
        assert_eq!(Color::from_hex("eccdec"), Some(Color::from_rgb8(0xec, 0xcd, 0xec)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn rgba8_quantizes_and_clamps() {
        assert_eq!(ORANGE.to_rgba8(), [255, 165, 0, 255]);
        assert_eq!(GRAY.to_rgba8(), [128, 128, 128, 255]);
        assert_eq!(TRANSPARENT.to_rgba8(), [0, 0, 0, 0]);
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }
}
