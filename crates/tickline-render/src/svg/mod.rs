//! SVG backend: paints [`DrawCall`]s through the scale-aware [`Painter`] primitives.

mod primitives;
mod util;

pub use primitives::{BORDER_WIDTH, Painter};

use crate::draw::{DrawCall, draw_calls};
use crate::model::LayoutedDiagram;
use tickline_core::geom::size;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root element id; also prefixes the marker id and scopes the stylesheet.
    pub diagram_id: Option<String>,
}

pub fn render_svg(layout: &LayoutedDiagram, options: &SvgRenderOptions) -> String {
    let painter = Painter::new(layout.scale, options.diagram_id.clone());
    let calls = draw_calls(layout);

    let mut out = painter.document_header(
        size(layout.width, layout.height),
        layout.title.label_box,
    );
    for call in &calls {
        out.push_str(&paint(&painter, call));
        out.push('\n');
    }
    out.push_str(&painter.document_footer());

    tracing::debug!(
        draw_calls = calls.len(),
        bytes = out.len(),
        "rendered svg"
    );
    out
}

pub fn paint(painter: &Painter, call: &DrawCall) -> String {
    match call {
        DrawCall::Line { from, to, dashed } => painter.line(*from, *to, *dashed),
        DrawCall::Rect { origin, size, fill } => painter.rect(*origin, *size, fill.as_deref()),
        DrawCall::Polygon { points, fill } => painter.polygon(points, fill),
        DrawCall::Polyline {
            points,
            stroke_width,
        } => painter.polyline(points, *stroke_width),
        DrawCall::Text {
            pos,
            class,
            content,
            anchor,
        } => painter.text(*pos, *class, content, *anchor),
        DrawCall::Arrow { from, to, style } => painter.arrow(*from, *to, *style),
        DrawCall::DoubleArrow { from, to } => painter.double_arrow(*from, *to),
    }
}
