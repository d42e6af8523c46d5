// File: crates/chart-render-skia/src/lib.rs
// Summary: Headless PNG rendering of an area chart Frame using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use chart_core::axis::Tick;
use chart_core::{Color, Frame, PathCmd, PathData, Theme};

pub mod text;

use text::{Anchor, TextShaper};

pub struct RenderOptions {
    /// Device pixels per chart pixel.
    pub scale: f32,
    pub theme: Theme,
    /// Tick labels need system fonts; disable for deterministic output.
    pub draw_labels: bool,
    pub font_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            theme: Theme::light(),
            draw_labels: true,
            font_size: 10.0,
        }
    }
}

fn sk(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

/// Render `frame` and return encoded PNG bytes.
pub fn render_to_png_bytes(frame: &Frame, opts: &RenderOptions) -> Result<Vec<u8>> {
    let scale = opts.scale.max(0.1);
    let w = (frame.outer_width as f32 * scale).round() as i32;
    let h = (frame.outer_height as f32 * scale).round() as i32;
    let mut surface = skia::surfaces::raster_n32_premul((w.max(1), h.max(1)))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();

    canvas.clear(sk(opts.theme.background));
    canvas.scale((scale, scale));
    canvas.translate((frame.margin.left as f32, frame.margin.top as f32));

    draw_area(canvas, frame);
    let shaper = opts.draw_labels.then(TextShaper::new);
    draw_axes(canvas, frame, opts, shaper.as_ref());
    draw_brush(canvas, frame, &opts.theme);

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    debug!(width = w, height = h, bytes = data.len(), "rendered area chart PNG");
    Ok(data.as_bytes().to_vec())
}

/// Render `frame` to a PNG file at `output_png_path`.
pub fn render_to_png(frame: &Frame, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_to_png_bytes(frame, opts)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, bytes)?;
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn to_sk_path(data: &PathData) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in &data.cmds {
        match *cmd {
            PathCmd::MoveTo(p) => { path.move_to((p.x as f32, p.y as f32)); }
            PathCmd::LineTo(p) => { path.line_to((p.x as f32, p.y as f32)); }
            PathCmd::CubicTo { c1, c2, to } => {
                path.cubic_to(
                    (c1.x as f32, c1.y as f32),
                    (c2.x as f32, c2.y as f32),
                    (to.x as f32, to.y as f32),
                );
            }
            PathCmd::Close => { path.close(); }
        }
    }
    path
}

// Vertical gradient spanning the shape's bounding box, like SVG objectBoundingBox units.
fn draw_area(canvas: &skia::Canvas, frame: &Frame) {
    if frame.area.is_empty() {
        return;
    }
    let path = to_sk_path(&frame.area);
    let bounds = *path.bounds();
    let grad = &frame.gradient;
    let colors = [sk(grad.color_at(0.0)), sk(grad.color_at(1.0))];

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    match skia::Shader::linear_gradient(
        ((bounds.left, bounds.top), (bounds.left, bounds.bottom)),
        &colors[..],
        None,
        skia::TileMode::Clamp,
        None,
        None,
    ) {
        Some(shader) => { paint.set_shader(shader); }
        // Zero-height bounds: no gradient to build.
        None => { paint.set_color(sk(grad.color_at(0.5))); }
    }
    canvas.draw_path(&path, &paint);
}

fn draw_axes(canvas: &skia::Canvas, frame: &Frame, opts: &RenderOptions, shaper: Option<&TextShaper>) {
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(1.0);
    stroke.set_color(sk(opts.theme.axis_line));

    let plot = frame.plot;
    let (l, r) = (plot.left as f32 + 0.5, plot.right as f32 + 0.5);
    let (t, b) = (plot.top as f32 + 0.5, plot.bottom as f32 + 0.5);
    let outer = 6.0f32;

    // Left axis domain with outer ticks.
    let mut left = skia::Path::new();
    left.move_to((-outer, b));
    left.line_to((0.5, b));
    left.line_to((0.5, t));
    left.line_to((-outer, t));
    canvas.draw_path(&left, &stroke);

    // Bottom axis domain, drawn in the translated x-axis frame.
    let base = plot.bottom as f32;
    let mut bottom = skia::Path::new();
    bottom.move_to((l, base + outer));
    bottom.line_to((l, base + 0.5));
    bottom.line_to((r, base + 0.5));
    bottom.line_to((r, base + outer));
    canvas.draw_path(&bottom, &stroke);

    let label_color = sk(opts.theme.tick_label);
    let size = opts.font_size;
    for Tick { px, label } in &frame.y_ticks {
        let y = *px as f32 + 0.5;
        canvas.draw_line((0.0, y), (-6.0, y), &stroke);
        if let Some(s) = shaper {
            s.draw(canvas, label, -9.0, y + 0.32 * size, size, label_color, Anchor::End);
        }
    }
    for Tick { px, label } in &frame.x_ticks {
        let x = *px as f32 + 0.5;
        canvas.draw_line((x, base), (x, base + 6.0), &stroke);
        if let Some(s) = shaper {
            s.draw(canvas, label, x, base + 9.0 + 0.71 * size, size, label_color, Anchor::Middle);
        }
    }
}

fn draw_brush(canvas: &skia::Canvas, frame: &Frame, theme: &Theme) {
    let Some((x0, x1)) = frame.brush else { return; };
    let rect = skia::Rect::from_ltrb(x0 as f32, frame.plot.top as f32, x1 as f32, frame.plot.bottom as f32);

    let mut fill = skia::Paint::default();
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(sk(theme.brush_fill));
    canvas.draw_rect(rect, &fill);

    let mut edge = skia::Paint::default();
    edge.set_style(skia::paint::Style::Stroke);
    edge.set_stroke_width(1.0);
    edge.set_color(sk(theme.brush_stroke));
    canvas.draw_rect(rect, &edge);
}
