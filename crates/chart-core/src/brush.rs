// File: crates/chart-core/src/brush.rs
// Summary: Horizontal range-selection overlay with a typed, default-inert selection hook.
// Notes:
// - The brush never touches chart data; it only reports the selected date range.
// - Overlay rects are stretched to y = -6, height = plot height + 7.

use std::fmt;

use tracing::trace;

use crate::document::{Document, NodeId};
use crate::path::num;
use crate::record::SurveyTime;
use crate::scale::TimeScale;
use crate::types::PlotRect;

/// Callback receiving the selected `[start, end]` survey range.
pub type RangeHook = Box<dyn FnMut(SurveyTime, SurveyTime)>;

const HANDLE_SIZE: f64 = 6.0;

pub struct BrushX {
    pub extent: PlotRect,
    selection: Option<(f64, f64)>,
    hook: RangeHook,
    nodes: Option<BrushNodes>,
}

#[derive(Clone, Copy, Debug)]
struct BrushNodes {
    group: NodeId,
    selection: NodeId,
    handle_e: NodeId,
    handle_w: NodeId,
}

impl fmt::Debug for BrushX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrushX")
            .field("extent", &self.extent)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl BrushX {
    pub fn new(extent: PlotRect) -> Self {
        Self { extent, selection: None, hook: Box::new(|_, _| {}), nodes: None }
    }

    /// Replace the selection hook.
    pub fn on_range_select(&mut self, hook: impl FnMut(SurveyTime, SurveyTime) + 'static) {
        self.hook = Box::new(hook);
    }

    /// Current selection in pixels, `None` when nothing is selected.
    pub fn selection(&self) -> Option<(f64, f64)> {
        self.selection
    }

    /// Append the brush group (overlay, selection, two handles) under `parent`.
    pub fn mount(&mut self, doc: &mut Document, parent: NodeId) -> NodeId {
        let e = self.extent;
        let group = doc.append(parent, "g");
        doc.set_attr(group, "class", "x brush")
            .set_attr(group, "fill", "none")
            .set_attr(group, "pointer-events", "all")
            .set_attr(group, "style", "-webkit-tap-highlight-color: rgba(0, 0, 0, 0);");

        let overlay = doc.append(group, "rect");
        doc.set_attr(overlay, "class", "overlay")
            .set_attr(overlay, "pointer-events", "all")
            .set_attr(overlay, "cursor", "crosshair")
            .set_attr(overlay, "x", num(e.left))
            .set_attr(overlay, "y", num(e.top))
            .set_attr(overlay, "width", num(e.width()))
            .set_attr(overlay, "height", num(e.height()));

        let selection = doc.append(group, "rect");
        doc.set_attr(selection, "class", "selection")
            .set_attr(selection, "cursor", "move")
            .set_attr(selection, "fill", "#777")
            .set_attr(selection, "fill-opacity", 0.3)
            .set_attr(selection, "stroke", "#fff")
            .set_attr(selection, "shape-rendering", "crispEdges")
            .set_attr(selection, "style", "display: none;");

        let handle_e = doc.append(group, "rect");
        doc.set_attr(handle_e, "class", "handle handle--e")
            .set_attr(handle_e, "cursor", "ew-resize")
            .set_attr(handle_e, "style", "display: none;");
        let handle_w = doc.append(group, "rect");
        doc.set_attr(handle_w, "class", "handle handle--w")
            .set_attr(handle_w, "cursor", "ew-resize")
            .set_attr(handle_w, "style", "display: none;");

        for rect in doc.select_all_tag(group, "rect") {
            doc.set_attr(rect, "y", -6).set_attr(rect, "height", num(e.height() + 7.0));
        }

        self.nodes = Some(BrushNodes { group, selection, handle_e, handle_w });
        self.selection = None;
        group
    }

    /// Move the brush to a pixel range (or clear it with `None`).
    /// A non-empty selection is reported to the hook as survey times and returned.
    pub fn move_to(
        &mut self,
        doc: &mut Document,
        px: Option<(f64, f64)>,
        x: &TimeScale,
    ) -> Option<(SurveyTime, SurveyTime)> {
        let sel = px
            .map(|(a, b)| {
                let (a, b) = (self.extent.clamp_x(a), self.extent.clamp_x(b));
                (a.min(b), a.max(b))
            })
            .filter(|(a, b)| b > a);
        self.selection = sel;
        self.redraw(doc);

        let (x0, x1) = sel?;
        let range = (x.from_px(x0), x.from_px(x1));
        trace!(start = %range.0, end = %range.1, "brush selection");
        (self.hook)(range.0, range.1);
        Some(range)
    }

    fn redraw(&self, doc: &mut Document) {
        let Some(n) = self.nodes else { return; };
        let e = self.extent;
        match self.selection {
            Some((x0, x1)) => {
                doc.set_attr(n.selection, "style", "")
                    .set_attr(n.selection, "x", num(x0))
                    .set_attr(n.selection, "y", num(e.top))
                    .set_attr(n.selection, "width", num(x1 - x0))
                    .set_attr(n.selection, "height", num(e.height()));
                for (handle, at) in [(n.handle_e, x1), (n.handle_w, x0)] {
                    doc.set_attr(handle, "style", "")
                        .set_attr(handle, "x", num(at - HANDLE_SIZE / 2.0))
                        .set_attr(handle, "y", num(e.top - HANDLE_SIZE / 2.0))
                        .set_attr(handle, "width", num(HANDLE_SIZE))
                        .set_attr(handle, "height", num(e.height() + HANDLE_SIZE));
                }
            }
            None => {
                for node in [n.selection, n.handle_e, n.handle_w] {
                    doc.set_attr(node, "style", "display: none;");
                    for a in ["x", "width"] {
                        doc.remove_attr(node, a);
                    }
                }
            }
        }
    }

    pub fn group(&self) -> Option<NodeId> {
        self.nodes.map(|n| n.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (Document, BrushX, NodeId, TimeScale) {
        let mut doc = Document::new();
        let root = doc.root();
        let mut brush = BrushX::new(PlotRect::from_size(600.0, 180.0));
        let g = brush.mount(&mut doc, root);
        let mut x = TimeScale::new((0.0, 600.0));
        x.set_domain(SurveyTime::from_millis(0), SurveyTime::from_millis(6_000));
        (doc, brush, g, x)
    }

    #[test]
    fn mount_stretches_rects() {
        let (doc, brush, g, _) = setup();
        assert_eq!(brush.group(), Some(g));
        let rects = doc.select_all_tag(g, "rect");
        assert_eq!(rects.len(), 4);
        for r in rects {
            assert_eq!(doc.attr(r, "y"), Some("-6"));
            assert_eq!(doc.attr(r, "height"), Some("187"));
        }
    }

    #[test]
    fn default_hook_is_inert_and_selection_clamped() {
        let (mut doc, mut brush, g, x) = setup();
        let got = brush.move_to(&mut doc, Some((700.0, 100.0)), &x);
        assert_eq!(got, Some((SurveyTime::from_millis(1_000), SurveyTime::from_millis(6_000))));
        assert_eq!(brush.selection(), Some((100.0, 600.0)));
        let sel = doc.select_class(g, "selection").unwrap();
        assert_eq!(doc.attr(sel, "width"), Some("500"));
    }

    #[test]
    fn hook_receives_dates_and_clear_skips_it() {
        let (mut doc, mut brush, g, x) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        brush.on_range_select(move |a, b| sink.borrow_mut().push((a.as_millis(), b.as_millis())));

        brush.move_to(&mut doc, Some((0.0, 300.0)), &x);
        brush.move_to(&mut doc, None, &x);
        brush.move_to(&mut doc, Some((50.0, 50.0)), &x);
        assert_eq!(*seen.borrow(), vec![(0, 3_000)]);

        let sel = doc.select_class(g, "selection").unwrap();
        assert_eq!(doc.attr(sel, "style"), Some("display: none;"));
        assert_eq!(doc.attr(sel, "width"), None);
    }
}
