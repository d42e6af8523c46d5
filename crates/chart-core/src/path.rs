// File: crates/chart-core/src/path.rs
// Summary: Renderer-agnostic path commands with SVG path-data serialization.

use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

/// Ordered list of path commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    pub cmds: Vec<PathCmd>,
}

impl PathData {
    pub fn new() -> Self { Self::default() }
    pub fn is_empty(&self) -> bool { self.cmds.is_empty() }
    pub fn push(&mut self, cmd: PathCmd) { self.cmds.push(cmd); }

    /// SVG `d` attribute; coordinates are rounded to three decimals.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => { let _ = write!(out, "M{},{}", num(p.x), num(p.y)); }
                PathCmd::LineTo(p) => { let _ = write!(out, "L{},{}", num(p.x), num(p.y)); }
                PathCmd::CubicTo { c1, c2, to } => {
                    let _ = write!(
                        out,
                        "C{},{},{},{},{},{}",
                        num(c1.x), num(c1.y), num(c2.x), num(c2.y), num(to.x), num(to.y)
                    );
                }
                PathCmd::Close => out.push('Z'),
            }
        }
        out
    }
}

/// Shortest decimal form after rounding to three places; never prints `-0`.
pub fn num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { "0".to_string() } else { format!("{r}") }
}
