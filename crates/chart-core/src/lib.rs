// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the area chart widget and its building blocks.

pub mod aggregate;
pub mod area;
pub mod axis;
pub mod brush;
pub mod chart;
pub mod config;
pub mod document;
pub mod error;
pub mod path;
pub mod record;
pub mod scale;
pub mod theme;
pub mod types;

pub use aggregate::{aggregate, AggregatePoint};
pub use area::{AreaGenerator, Curve};
pub use axis::{Axis, Orient, Tick};
pub use brush::BrushX;
pub use chart::{AreaChart, DrawState, Frame};
pub use config::ChartConfig;
pub use document::{Document, NodeId};
pub use error::{ChartError, RenderError, ValidationError};
pub use path::{PathCmd, PathData, Point};
pub use record::{parse_records_json, RawRecord, SurveyTime};
pub use scale::{LinearScale, Scale, TimeScale};
pub use theme::{Color, Gradient, Theme};
