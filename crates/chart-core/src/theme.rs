// File: crates/chart-core/src/theme.rs
// Summary: Colors, light/dark theme presets and the vertical area gradient.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color; serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }

    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        let byte = |i: usize| hex.get(i..i + 2).and_then(|h| u8::from_str_radix(h, 16).ok());
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Same color with alpha scaled by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&s).ok_or_else(|| format!("invalid color '{s}' (expected #rrggbb)"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self { c.to_string() }
}

/// Vertical gradient from `top_opacity` (0%) to `bottom_opacity` (100%) of one color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub id: String,
    pub color: Color,
    pub top_opacity: f64,
    pub bottom_opacity: f64,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            id: "area-gradient".into(),
            color: Color::rgb(0x34, 0x98, 0xdb),
            top_opacity: 0.8,
            bottom_opacity: 0.2,
        }
    }
}

impl Gradient {
    /// `url(#id)` reference for fill attributes.
    pub fn url(&self) -> String {
        format!("url(#{})", self.id)
    }

    /// Color at relative height `t` (0 = top, 1 = bottom).
    pub fn color_at(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        self.color.with_opacity(self.top_opacity + (self.bottom_opacity - self.top_opacity) * t)
    }
}

/// Colors used by raster output (SVG output inherits `currentColor`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub tick_label: Color,
    pub brush_fill: Color,
    pub brush_stroke: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(255, 255, 255),
            axis_line: Color::rgb(0, 0, 0),
            tick_label: Color::rgb(0, 0, 0),
            brush_fill: Color::rgba(0x77, 0x77, 0x77, 77),
            brush_stroke: Color::rgb(255, 255, 255),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            axis_line: Color::rgb(180, 180, 190),
            tick_label: Color::rgb(210, 210, 220),
            brush_fill: Color::rgba(200, 200, 210, 60),
            brush_stroke: Color::rgb(40, 40, 45),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
