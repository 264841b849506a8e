//! Display colors for stars and solar-system bodies
//!
//! Feed colors arrive as strings, either `#RRGGBB` / `#AARRGGBB` hex or one
//! of a small set of color names. Anything else is reported as `None` and the
//! caller picks a fallback.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from packed 0xAARRGGBB
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packed 0xAARRGGBB
    pub fn to_argb(&self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Parse a hex (`#RRGGBB`, `#AARRGGBB`) or named color, case-insensitive
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.starts_with('#') {
            let digits = HEX_COLOR.as_ref()?.captures(text)?.get(1)?.as_str();
            let value = u32::from_str_radix(digits, 16).ok()?;
            return Some(if digits.len() == 6 {
                Self::from_argb(0xFF00_0000 | value)
            } else {
                Self::from_argb(value)
            });
        }
        NAMED_COLORS.get(text.to_lowercase().as_str()).copied()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:08X}", self.to_argb())
        }
    }
}

lazy_static! {
    // Held as Option so parsing stays free of unwrap; a pattern that failed
    // to compile would make every hex color unparsable.
    static ref HEX_COLOR: Option<Regex> =
        Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").ok();

    static ref NAMED_COLORS: HashMap<&'static str, Color> = {
        let mut m = HashMap::new();
        for &(name, argb) in NAMED_COLOR_PAIRS.iter() {
            m.insert(name, Color::from_argb(argb));
        }
        m
    };
}

const NAMED_COLOR_PAIRS: [(&str, u32); 23] = [
    ("black", 0xFF000000),
    ("darkgray", 0xFF444444),
    ("darkgrey", 0xFF444444),
    ("gray", 0xFF888888),
    ("grey", 0xFF888888),
    ("lightgray", 0xFFCCCCCC),
    ("lightgrey", 0xFFCCCCCC),
    ("white", 0xFFFFFFFF),
    ("red", 0xFFFF0000),
    ("green", 0xFF00FF00),
    ("blue", 0xFF0000FF),
    ("yellow", 0xFFFFFF00),
    ("cyan", 0xFF00FFFF),
    ("magenta", 0xFFFF00FF),
    ("aqua", 0xFF00FFFF),
    ("fuchsia", 0xFFFF00FF),
    ("lime", 0xFF00FF00),
    ("maroon", 0xFF800000),
    ("navy", 0xFF000080),
    ("olive", 0xFF808000),
    ("purple", 0xFF800080),
    ("silver", 0xFFC0C0C0),
    ("teal", 0xFF008080),
];

/// Bluish-white to warm-white tint by apparent magnitude, for stars without a color
pub fn star_color_by_magnitude(magnitude: f64) -> Color {
    if magnitude < 0.0 {
        Color::rgb(200, 220, 255)
    } else if magnitude < 1.0 {
        Color::rgb(220, 230, 255)
    } else if magnitude < 2.0 {
        Color::rgb(240, 245, 255)
    } else if magnitude < 3.0 {
        Color::rgb(255, 250, 240)
    } else if magnitude < 4.0 {
        Color::rgb(255, 245, 230)
    } else {
        Color::rgb(255, 240, 220)
    }
}
