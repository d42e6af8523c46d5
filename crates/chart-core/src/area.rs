// File: crates/chart-core/src/area.rs
// Summary: Area shape generator (topline forward, flat baseline backward) with curve interpolation.

use serde::{Deserialize, Serialize};

use crate::path::{PathCmd, PathData, Point};

/// Interpolation between consecutive points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Curve {
    Linear,
    /// Cardinal spline; tension 0 is the classic Catmull-Rom-like shape, 1 gives straight lines.
    Cardinal { tension: f64 },
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Cardinal { tension: 0.0 }
    }
}

impl Curve {
    /// Emit one polyline. When `join` is set the first point is reached with a line
    /// from the current position instead of starting a new subpath.
    pub fn trace(self, pts: &[Point], join: bool, out: &mut PathData) {
        let Some(&first) = pts.first() else { return; };
        out.push(if join { PathCmd::LineTo(first) } else { PathCmd::MoveTo(first) });
        match self {
            Curve::Linear => {
                for &p in &pts[1..] {
                    out.push(PathCmd::LineTo(p));
                }
            }
            Curve::Cardinal { tension } => cardinal(pts, tension, out),
        }
    }
}

fn cardinal(pts: &[Point], tension: f64, out: &mut PathData) {
    let n = pts.len();
    if n < 2 {
        return;
    }
    if n == 2 {
        out.push(PathCmd::LineTo(pts[1]));
        return;
    }
    let k = (1.0 - tension) / 6.0;
    for i in 1..n {
        let p1 = pts[i - 1];
        let p2 = pts[i];
        // End tangents are zero: mirror the missing neighbour onto the segment end.
        let p0 = if i >= 2 { pts[i - 2] } else { p2 };
        let p3 = if i + 1 < n { pts[i + 1] } else { p1 };
        out.push(PathCmd::CubicTo {
            c1: Point::new(p1.x + k * (p2.x - p0.x), p1.y + k * (p2.y - p0.y)),
            c2: Point::new(p2.x + k * (p1.x - p3.x), p2.y + k * (p1.y - p3.y)),
            to: p2,
        });
    }
}

/// Filled area between a fixed baseline `y0` and per-point `y1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaGenerator {
    pub y0: f64,
    pub curve: Curve,
}

impl AreaGenerator {
    pub fn new(y0: f64, curve: Curve) -> Self {
        Self { y0, curve }
    }

    /// Build the closed outline for `data`; empty data yields an empty path.
    pub fn generate<T>(
        &self,
        data: &[T],
        x: impl Fn(&T) -> f64,
        y1: impl Fn(&T) -> f64,
    ) -> PathData {
        let mut out = PathData::new();
        if data.is_empty() {
            return out;
        }
        let top: Vec<Point> = data.iter().map(|d| Point::new(x(d), y1(d))).collect();
        let base: Vec<Point> = top.iter().rev().map(|p| Point::new(p.x, self.y0)).collect();
        self.curve.trace(&top, false, &mut out);
        self.curve.trace(&base, true, &mut out);
        out.push(PathCmd::Close);
        out
    }
}
