// File: crates/chart-core/src/config.rs
// Summary: Chart configuration (size, margins, tick hints, curve, gradient) with JSON loading.

use serde::{Deserialize, Serialize};

use crate::area::Curve;
use crate::theme::Gradient;
use crate::types::{Insets, PlotRect, HEIGHT, WIDTH};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Plot width inside the margins.
    pub width: u32,
    /// Plot height inside the margins.
    pub height: u32,
    pub margin: Insets,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub curve: Curve,
    pub gradient: Gradient,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            margin: Insets::default(),
            x_ticks: 6,
            y_ticks: 10,
            curve: Curve::default(),
            gradient: Gradient::default(),
        }
    }
}

impl ChartConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep their defaults.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn outer_width(&self) -> u32 { self.width + self.margin.hsum() }
    pub fn outer_height(&self) -> u32 { self.height + self.margin.vsum() }

    pub fn plot_rect(&self) -> PlotRect {
        PlotRect::from_size(self.width as f64, self.height as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_layout() {
        let c = ChartConfig::default();
        assert_eq!((c.outer_width(), c.outer_height()), (670, 230));
        assert_eq!(c.margin, Insets::new(50, 20, 20, 30));
        assert_eq!(c.x_ticks, 6);
    }

    #[test]
    fn partial_json_overrides() {
        let c = ChartConfig::from_json(
            r##"{"width": 800, "curve": {"kind": "linear"}, "gradient": {"id": "g", "color": "#ff0000", "top_opacity": 1.0, "bottom_opacity": 0.0}}"##,
        )
        .unwrap();
        assert_eq!(c.width, 800);
        assert_eq!(c.height, 180);
        assert_eq!(c.curve, Curve::Linear);
        assert_eq!(c.gradient.color.to_string(), "#ff0000");
        assert!(ChartConfig::from_json(r##"{"gradient": {"id": "g", "color": "red", "top_opacity": 1, "bottom_opacity": 0}}"##).is_err());
    }
}
