//! Stateless SVG fragment emitters. Every coordinate, stroke width, dash length and font size is
//! multiplied by the painter's `scale`.

use super::util::{fmt, fmt_into, fmt_points_into};
use crate::model::TextAnchor;
use crate::text::TextClass;
use tickline_core::ArrowStyle;
use tickline_core::geom::{Point, Size};

pub const BORDER_WIDTH: f64 = 2.0;
const DASH_LENGTH: f64 = 10.0;
const TITLE_BOX_BEVEL: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Painter {
    scale: f64,
    marker_id: String,
    /// Scopes the stylesheet when several documents are inlined into one page.
    root_id: Option<String>,
}

impl Painter {
    pub fn new(scale: f64, root_id: Option<String>) -> Self {
        let marker_id = match &root_id {
            Some(id) => format!("{id}-arrow"),
            None => "arrow".to_string(),
        };
        Self {
            scale,
            marker_id,
            root_id,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn marker_id(&self) -> &str {
        &self.marker_id
    }

    fn s(&self, v: f64) -> String {
        fmt(v * self.scale)
    }

    fn stroke_attr(&self, out: &mut String, width: f64) {
        out.push_str(" stroke=\"black\" stroke-width=\"");
        fmt_into(out, width * self.scale);
        out.push('"');
    }

    pub fn line(&self, from: Point, to: Point, dashed: bool) -> String {
        let mut out = format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
            self.s(from.x),
            self.s(from.y),
            self.s(to.x),
            self.s(to.y)
        );
        self.stroke_attr(&mut out, 1.0);
        if dashed {
            out.push_str(&format!(" stroke-dasharray=\"{}\"", self.s(DASH_LENGTH)));
        }
        out.push_str(" />");
        out
    }

    pub fn rect(&self, origin: Point, size: Size, fill: Option<&str>) -> String {
        let mut out = format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
            self.s(origin.x),
            self.s(origin.y),
            self.s(size.width),
            self.s(size.height),
            fill.unwrap_or("none")
        );
        if fill.is_none() {
            self.stroke_attr(&mut out, 1.0);
        } else {
            out.push_str(" stroke=\"none\"");
        }
        out.push_str(" />");
        out
    }

    pub fn polygon(&self, points: &[Point], fill: &str) -> String {
        let mut out = String::from("<polygon points=\"");
        fmt_points_into(&mut out, points, self.scale);
        out.push_str(&format!("\" fill=\"{fill}\" stroke=\"none\" />"));
        out
    }

    pub fn polyline(&self, points: &[Point], stroke_width: f64) -> String {
        let mut out = String::from("<polyline points=\"");
        fmt_points_into(&mut out, points, self.scale);
        out.push_str("\" fill=\"none\"");
        self.stroke_attr(&mut out, stroke_width);
        out.push_str(" />");
        out
    }

    /// `content` is markup text and is written as-is.
    pub fn text(
        &self,
        pos: Point,
        class: TextClass,
        content: &str,
        anchor: Option<TextAnchor>,
    ) -> String {
        let anchor = anchor
            .map(|a| format!(" text-anchor=\"{}\"", a.as_str()))
            .unwrap_or_default();
        format!(
            "<text{anchor} x=\"{}\" y=\"{}\" class=\"{}\">{content}</text>",
            self.s(pos.x),
            self.s(pos.y),
            class.css_class()
        )
    }

    pub fn arrow(&self, from: Point, to: Point, style: ArrowStyle) -> String {
        let mut out = String::from("<polyline points=\"");
        fmt_points_into(&mut out, &[from, to], self.scale);
        out.push_str("\" fill=\"none\"");
        self.stroke_attr(&mut out, 1.0);
        if style == ArrowStyle::Dashed {
            out.push_str(&format!(" stroke-dasharray=\"{}\"", self.s(DASH_LENGTH)));
        }
        out.push_str(&format!(" marker-end=\"url(#{})\" />", self.marker_id));
        out
    }

    pub fn double_arrow(&self, from: Point, to: Point) -> String {
        let mut out = String::from("<polyline points=\"");
        fmt_points_into(&mut out, &[from, to], self.scale);
        out.push_str("\" fill=\"none\"");
        self.stroke_attr(&mut out, 1.0);
        out.push_str(&format!(
            " marker-start=\"url(#{id})\" marker-end=\"url(#{id})\" />",
            id = self.marker_id
        ));
        out
    }

    /// XML prolog, root element, stylesheet, arrow marker, outer border and the framed title
    /// area. `size` and `label_box` are unscaled.
    pub fn document_header(&self, size: Size, label_box: Size) -> String {
        let width = size.width * self.scale;
        let height = size.height * self.scale;
        let id_attr = self
            .root_id
            .as_deref()
            .map(|id| format!(" id=\"{id}\""))
            .unwrap_or_default();
        let scope = self
            .root_id
            .as_deref()
            .map(|id| format!("#{id} "))
            .unwrap_or_default();

        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"{id_attr} width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = fmt(width),
            h = fmt(height)
        ));

        out.push_str("<style>\n");
        for class in TextClass::ALL {
            let style = class.style();
            out.push_str(&format!(
                "  {scope}.{} {{ font-family: {}; font-size: {}px; font-weight: {} }}\n",
                class.css_class(),
                style.font_family.as_deref().unwrap_or("sans-serif"),
                self.s(style.font_size),
                style.font_weight.as_deref().unwrap_or("normal"),
            ));
        }
        out.push_str(&format!("  {scope}text {{ white-space: pre }}\n"));
        out.push_str("</style>\n");

        out.push_str(&format!(
            "<defs><marker id=\"{}\" viewBox=\"0 0 15 15\" refX=\"15\" refY=\"7.5\" markerWidth=\"9\" markerHeight=\"9\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 15 7.5 L 0 15 z\" /></marker></defs>\n",
            self.marker_id
        ));

        let b = BORDER_WIDTH;
        let border = [
            Point::new(size.width - b, 0.0),
            Point::new(size.width - b, size.height - b),
            Point::new(0.0, size.height - b),
        ];
        out.push_str(&self.polyline(&border, BORDER_WIDTH));
        out.push('\n');

        let (w, h) = (label_box.width, label_box.height);
        let title_box = [
            Point::new(0.0, h),
            Point::new(w - TITLE_BOX_BEVEL, h),
            Point::new(w, h - TITLE_BOX_BEVEL),
            Point::new(w, 0.0),
        ];
        out.push_str(&self.polyline(&title_box, BORDER_WIDTH));
        out.push('\n');
        out
    }

    pub fn document_footer(&self) -> String {
        "</svg>\n".to_string()
    }
}
