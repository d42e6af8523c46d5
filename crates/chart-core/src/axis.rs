// File: crates/chart-core/src/axis.rs
// Summary: Axis model (orientation, tick hint, sizes) with tick layout and document rendering.

use crate::document::{Document, NodeId};
use crate::path::num;
use crate::scale::Scale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Left,
    Bottom,
}

/// One laid-out tick: pixel position along the axis plus its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub px: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    /// Tick count hint passed to the scale.
    pub ticks: usize,
    pub tick_size_inner: f64,
    pub tick_size_outer: f64,
    pub tick_padding: f64,
    /// Half-pixel shift so 1px strokes land on pixel centres.
    pub offset: f64,
}

impl Axis {
    pub fn new(orient: Orient) -> Self {
        Self {
            orient,
            ticks: 10,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            offset: 0.5,
        }
    }

    pub fn left() -> Self { Self::new(Orient::Left) }
    pub fn bottom() -> Self { Self::new(Orient::Bottom) }

    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    // -1 for axes whose ticks point left/up, +1 otherwise.
    fn k(&self) -> f64 {
        match self.orient {
            Orient::Left => -1.0,
            Orient::Bottom => 1.0,
        }
    }

    /// Tick positions and labels for the scale's current domain.
    pub fn layout<S: Scale>(&self, scale: &S) -> Vec<Tick> {
        scale
            .ticks(self.ticks)
            .into_iter()
            .map(|v| Tick { px: scale.to_px(v), label: scale.tick_label(v, self.ticks) })
            .collect()
    }

    /// SVG path data for the domain line including the outer ticks.
    pub fn domain_path(&self, range: (f64, f64)) -> String {
        let outer = num(self.k() * self.tick_size_outer);
        let r0 = num(range.0 + self.offset);
        let r1 = num(range.1 + self.offset);
        let off = num(self.offset);
        match self.orient {
            Orient::Left => format!("M{outer},{r0}H{off}V{r1}H{outer}"),
            Orient::Bottom => format!("M{r0},{outer}V{off}H{r1}V{outer}"),
        }
    }

    /// Rebuild the axis inside group `g`: domain path first, then one `g.tick` per tick.
    pub fn render<S: Scale>(&self, doc: &mut Document, g: NodeId, scale: &S) -> Vec<Tick> {
        let ticks = self.layout(scale);
        let k = self.k();
        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;

        doc.clear_children(g);
        doc.set_attr(g, "fill", "none")
            .set_attr(g, "font-size", 10)
            .set_attr(g, "font-family", "sans-serif")
            .set_attr(
                g,
                "text-anchor",
                match self.orient {
                    Orient::Left => "end",
                    Orient::Bottom => "middle",
                },
            );

        let domain = doc.append(g, "path");
        doc.set_attr(domain, "class", "domain")
            .set_attr(domain, "stroke", "currentColor")
            .set_attr(domain, "d", self.domain_path(scale.range()));

        for tick in &ticks {
            let pos = num(tick.px + self.offset);
            let t = doc.append(g, "g");
            doc.set_attr(t, "class", "tick").set_attr(t, "opacity", 1);
            let line = doc.append(t, "line");
            doc.set_attr(line, "stroke", "currentColor");
            let text = doc.append(t, "text");
            doc.set_attr(text, "fill", "currentColor");
            match self.orient {
                Orient::Left => {
                    doc.set_attr(t, "transform", format!("translate(0,{pos})"));
                    doc.set_attr(line, "x2", num(k * self.tick_size_inner));
                    doc.set_attr(text, "x", num(k * spacing)).set_attr(text, "dy", "0.32em");
                }
                Orient::Bottom => {
                    doc.set_attr(t, "transform", format!("translate({pos},0)"));
                    doc.set_attr(line, "y2", num(k * self.tick_size_inner));
                    doc.set_attr(text, "y", num(k * spacing)).set_attr(text, "dy", "0.71em");
                }
            }
            doc.set_text(text, tick.label.clone());
        }
        ticks
    }
}
