//! # Style Primitives
//!
//! Colors, text styles and paint modes used by the itinerary template.
//!
//! There is no cascade here. The template is fixed, so every block states
//! its own colors and font sizes explicitly, and the palette below names the
//! handful of brand colors it draws with.

use serde::{Deserialize, Serialize};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Build a color from 0-255 channel values.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Linear interpolation between two colors, rounding each channel to
    /// the nearest 0-255 step the way the gradient band expects.
    pub fn mix(self, other: Color, ratio: f64) -> Color {
        let channel = |a: f64, b: f64| {
            let a = (a * 255.0).round();
            let b = (b * 255.0).round();
            (a + (b - a) * ratio).round() / 255.0
        };
        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// The template palette.
pub mod palette {
    use super::Color;

    pub const BRAND_PURPLE: Color = Color::rgb8(84, 28, 156);
    pub const ACCENT_PURPLE: Color = Color::rgb8(147, 51, 234);
    pub const GRADIENT_BLUE: Color = Color::rgb8(74, 144, 226);
    pub const BAND_LIGHT: Color = Color::rgb8(240, 230, 255);
    pub const BAND_TAB: Color = Color::rgb8(220, 200, 255);
    pub const ROW_EVEN: Color = Color::rgb8(248, 240, 255);
    pub const ROW_ODD: Color = Color::WHITE;
    pub const PANEL: Color = Color::rgb8(245, 245, 245);
    pub const RULE: Color = Color::rgb8(200, 200, 200);
    pub const MUTED: Color = Color::rgb8(100, 100, 100);
    pub const LINK: Color = Color::rgb8(0, 100, 200);
}

/// Horizontal anchoring of a text run relative to its x coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How a text run is drawn. Sizes are in points; positions elsewhere are
/// in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            align: TextAlign::Left,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// Fill or stroke for closed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Fill(Color),
    Stroke { color: Color, width: f64 },
}

impl Paint {
    /// Default stroke width, in layout units.
    pub const HAIRLINE: f64 = 0.2;

    pub fn stroke(color: Color) -> Self {
        Paint::Stroke {
            color,
            width: Self::HAIRLINE,
        }
    }
}
