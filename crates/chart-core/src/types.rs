// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (plot size, margins, plot rectangle).

/// Default plot width in pixels (inside the margins).
pub const WIDTH: u32 = 600;
/// Default plot height in pixels (inside the margins).
pub const HEIGHT: u32 = 180;

/// Screen margins around the plot, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(50, 20, 20, 30)
    }
}

/// Plot area in drawing-group coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self { left: 0.0, top: 0.0, right: width, bottom: height }
    }
    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }

    /// Clamp a horizontal pixel coordinate into the rectangle.
    #[inline]
    pub fn clamp_x(&self, x: f64) -> f64 {
        x.clamp(self.left, self.right)
    }
}
