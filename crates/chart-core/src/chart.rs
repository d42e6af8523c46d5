// File: crates/chart-core/src/chart.rs
// Summary: AreaChart widget (setup -> aggregate -> draw) and the Frame snapshot of each draw.
// Notes:
// - Every operation takes the host document the chart was mounted into.
// - The gradient definition is created once at setup and referenced by every draw.

use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, date_extent, max_count, AggregatePoint};
use crate::area::AreaGenerator;
use crate::axis::{Axis, Tick};
use crate::brush::BrushX;
use crate::config::ChartConfig;
use crate::document::{Document, NodeId};
use crate::error::ChartError;
use crate::path::{num, PathData};
use crate::record::{parse_records_json, RawRecord, SurveyTime};
use crate::scale::{LinearScale, Scale, TimeScale};
use crate::theme::Gradient;
use crate::types::{Insets, PlotRect};

/// X domain used when there is nothing to draw (one day from the epoch).
pub const FALLBACK_X_DOMAIN: (SurveyTime, SurveyTime) =
    (SurveyTime::from_millis(0), SurveyTime::from_millis(86_400_000));
/// Y domain used when there is nothing to draw.
pub const FALLBACK_Y_DOMAIN: (f64, f64) = (0.0, 1.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawState {
    /// No aggregate points: fallback domains and an empty area path.
    Empty,
    Rendered { points: usize },
}

/// Everything the last draw produced, in drawing-group coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub outer_width: u32,
    pub outer_height: u32,
    pub margin: Insets,
    pub plot: PlotRect,
    pub x_domain: (SurveyTime, SurveyTime),
    pub y_domain: (f64, f64),
    pub area: PathData,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub gradient: Gradient,
    pub brush: Option<(f64, f64)>,
    pub state: DrawState,
}

impl Frame {
    fn blank(config: &ChartConfig) -> Self {
        Self {
            outer_width: config.outer_width(),
            outer_height: config.outer_height(),
            margin: config.margin,
            plot: config.plot_rect(),
            x_domain: FALLBACK_X_DOMAIN,
            y_domain: FALLBACK_Y_DOMAIN,
            area: PathData::new(),
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            gradient: config.gradient.clone(),
            brush: None,
            state: DrawState::Empty,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Nodes {
    svg: NodeId,
    y_axis: NodeId,
    x_axis: NodeId,
    area: NodeId,
}

#[derive(Debug)]
pub struct AreaChart {
    mount_id: String,
    config: ChartConfig,
    data: Vec<RawRecord>,
    display: Vec<AggregatePoint>,
    x: TimeScale,
    y: LinearScale,
    x_axis: Axis,
    y_axis: Axis,
    area: AreaGenerator,
    brush: BrushX,
    nodes: Nodes,
    frame: Frame,
}

impl AreaChart {
    /// Mount with the default layout and draw `data` immediately.
    pub fn new(doc: &mut Document, mount_id: &str, data: Vec<RawRecord>) -> Result<Self, ChartError> {
        Self::with_config(doc, mount_id, data, ChartConfig::default())
    }

    /// Validate a JSON array of records, then mount and draw.
    pub fn from_json(doc: &mut Document, mount_id: &str, json: &str) -> Result<Self, ChartError> {
        let data = parse_records_json(json)?;
        Self::new(doc, mount_id, data)
    }

    pub fn with_config(
        doc: &mut Document,
        mount_id: &str,
        data: Vec<RawRecord>,
        config: ChartConfig,
    ) -> Result<Self, ChartError> {
        let mount = doc.mount(mount_id)?;
        let plot = config.plot_rect();

        let x = TimeScale::new((0.0, plot.width()));
        let y = LinearScale::new((plot.height(), 0.0));
        let mut brush = BrushX::new(plot);
        let nodes = Self::init_vis(doc, mount, &config, &mut brush);

        let mut chart = Self {
            mount_id: mount_id.to_string(),
            x,
            y,
            x_axis: Axis::bottom().with_ticks(config.x_ticks),
            y_axis: Axis::left().with_ticks(config.y_ticks),
            area: AreaGenerator::new(plot.height(), config.curve),
            brush,
            nodes,
            frame: Frame::blank(&config),
            config,
            data,
            display: Vec::new(),
        };
        info!(mount = mount_id, records = chart.data.len(), "area chart mounted");
        chart.wrangle_data(doc);
        Ok(chart)
    }

    // Static content: surface, gradient, axis groups, area placeholder, brush.
    fn init_vis(doc: &mut Document, mount: NodeId, config: &ChartConfig, brush: &mut BrushX) -> Nodes {
        let svg = doc.append(mount, "svg");
        doc.set_attr(svg, "width", config.outer_width())
            .set_attr(svg, "height", config.outer_height());
        let g = doc.append(svg, "g");
        doc.set_attr(
            g,
            "transform",
            format!("translate({},{})", config.margin.left, config.margin.top),
        );

        let grad = &config.gradient;
        let defs = doc.append(g, "defs");
        let lg = doc.append(defs, "linearGradient");
        doc.set_attr(lg, "id", &grad.id)
            .set_attr(lg, "x1", "0%")
            .set_attr(lg, "y1", "0%")
            .set_attr(lg, "x2", "0%")
            .set_attr(lg, "y2", "100%");
        for (offset, opacity) in [("0%", grad.top_opacity), ("100%", grad.bottom_opacity)] {
            let stop = doc.append(lg, "stop");
            doc.set_attr(stop, "offset", offset)
                .set_attr(stop, "stop-color", grad.color)
                .set_attr(stop, "stop-opacity", num(opacity));
        }

        let y_axis = doc.append(g, "g");
        doc.set_attr(y_axis, "class", "y-axis axis");
        let x_axis = doc.append(g, "g");
        doc.set_attr(x_axis, "class", "x-axis axis")
            .set_attr(x_axis, "transform", format!("translate(0,{})", config.height));

        // Appended before the brush so the overlay stays on top.
        let area = doc.append(g, "path");
        doc.set_attr(area, "class", "area");

        brush.mount(doc, g);

        Nodes { svg, y_axis, x_axis, area }
    }

    /// Group the raw records by survey date, then redraw.
    pub fn wrangle_data(&mut self, doc: &mut Document) -> &Frame {
        self.display = aggregate(&self.data);
        debug!(records = self.data.len(), points = self.display.len(), "aggregated survey records");
        self.update_vis(doc)
    }

    /// Replace the raw dataset and re-run aggregation and drawing.
    pub fn set_data(&mut self, doc: &mut Document, data: Vec<RawRecord>) -> &Frame {
        self.data = data;
        self.wrangle_data(doc)
    }

    /// Update scale domains, the area path and both axes from the aggregate view.
    pub fn update_vis(&mut self, doc: &mut Document) -> &Frame {
        let (state, x_domain, y_domain) = match (date_extent(&self.display), max_count(&self.display)) {
            (Some(x_domain), Some(max)) => (
                DrawState::Rendered { points: self.display.len() },
                x_domain,
                (0.0, max as f64),
            ),
            _ => {
                warn!(mount = %self.mount_id, "no survey records; drawing empty chart");
                (DrawState::Empty, FALLBACK_X_DOMAIN, FALLBACK_Y_DOMAIN)
            }
        };
        self.x.set_domain(x_domain.0, x_domain.1);
        self.y.set_domain(y_domain.0, y_domain.1);

        let (x, y) = (self.x, self.y);
        let area = self.area.generate(
            &self.display,
            |p| x.to_px(p.date),
            |p| y.to_px(p.count as f64),
        );
        doc.set_attr(self.nodes.area, "fill", self.config.gradient.url())
            .set_attr(self.nodes.area, "d", area.to_svg());

        let y_ticks = self.y_axis.render(doc, self.nodes.y_axis, &self.y);
        let x_ticks = self.x_axis.render(doc, self.nodes.x_axis, &self.x);
        debug!(?state, x_ticks = x_ticks.len(), y_ticks = y_ticks.len(), "area chart drawn");

        self.frame = Frame {
            x_domain,
            y_domain,
            area,
            x_ticks,
            y_ticks,
            brush: self.brush.selection(),
            state,
            ..Frame::blank(&self.config)
        };
        &self.frame
    }

    /// Install the range-selection hook; the default hook does nothing.
    pub fn on_range_select(&mut self, hook: impl FnMut(SurveyTime, SurveyTime) + 'static) {
        self.brush.on_range_select(hook);
    }

    /// Move the brush to a pixel range in plot coordinates (`None` clears it).
    /// Displayed data is never filtered by the brush.
    pub fn brush_move(&mut self, doc: &mut Document, px: Option<(f64, f64)>) -> Option<(SurveyTime, SurveyTime)> {
        let range = self.brush.move_to(doc, px, &self.x);
        self.frame.brush = self.brush.selection();
        range
    }

    pub fn frame(&self) -> &Frame { &self.frame }
    pub fn data(&self) -> &[RawRecord] { &self.data }
    pub fn display_data(&self) -> &[AggregatePoint] { &self.display }
    pub fn x_scale(&self) -> &TimeScale { &self.x }
    pub fn y_scale(&self) -> &LinearScale { &self.y }
    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn mount_id(&self) -> &str { &self.mount_id }

    /// Serialized `<svg>` element of this chart.
    pub fn to_svg(&self, doc: &Document) -> String {
        doc.to_markup(self.nodes.svg)
    }

    /// Standalone SVG file content (adds the SVG namespace).
    pub fn to_svg_file(&self, doc: &Document) -> String {
        let markup = self.to_svg(doc);
        match markup.strip_prefix("<svg") {
            Some(rest) => format!("<svg xmlns=\"http://www.w3.org/2000/svg\"{rest}\n"),
            None => markup,
        }
    }
}
