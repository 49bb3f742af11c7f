//! Structured draw calls: the layout flattened into an ordered list of shapes, in paint order.

use crate::model::{LayoutedDiagram, LifelineLayout, TextAnchor, Track};
use crate::text::TextClass;
use serde::Serialize;
use tickline_core::ArrowStyle;
use tickline_core::geom::{Point, Size};

pub const TRACK_STROKE_WIDTH: f64 = 2.0;
pub const BUS_FILL: &str = "#d9d9d9";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum DrawCall {
    Line {
        from: Point,
        to: Point,
        dashed: bool,
    },
    Rect {
        origin: Point,
        size: Size,
        fill: Option<String>,
    },
    Polygon {
        points: Vec<Point>,
        fill: String,
    },
    Polyline {
        points: Vec<Point>,
        stroke_width: f64,
    },
    Text {
        pos: Point,
        class: TextClass,
        content: String,
        anchor: Option<TextAnchor>,
    },
    Arrow {
        from: Point,
        to: Point,
        style: ArrowStyle,
    },
    DoubleArrow {
        from: Point,
        to: Point,
    },
}

pub fn draw_calls(layout: &LayoutedDiagram) -> Vec<DrawCall> {
    let mut out = Vec::new();
    out.push(DrawCall::Text {
        pos: layout.title.pos,
        class: TextClass::Title,
        content: layout.title.text.clone(),
        anchor: None,
    });

    for lifeline in &layout.lifelines {
        push_lifeline(&mut out, lifeline);
    }

    for span in &layout.spans {
        out.push(DrawCall::DoubleArrow {
            from: span.from,
            to: span.to,
        });
        for cap in &span.caps {
            out.push(DrawCall::Line {
                from: cap.from,
                to: cap.to,
                dashed: false,
            });
        }
        out.push(DrawCall::Text {
            pos: span.label_pos,
            class: TextClass::Legend,
            content: span.label.clone(),
            anchor: Some(TextAnchor::Middle),
        });
    }

    for arrow in &layout.arrows {
        out.push(DrawCall::Arrow {
            from: arrow.from,
            to: arrow.to,
            style: arrow.style,
        });
        if let Some(label) = &arrow.label {
            out.push(DrawCall::Text {
                pos: label.pos,
                class: TextClass::StateLabel,
                content: label.text.clone(),
                anchor: Some(label.anchor),
            });
        }
    }

    for entry in &layout.legend.entries {
        out.push(DrawCall::Text {
            pos: entry.pos,
            class: TextClass::Legend,
            content: entry.tick.to_string(),
            anchor: Some(TextAnchor::Middle),
        });
    }
    out
}

fn push_lifeline(out: &mut Vec<DrawCall>, lifeline: &LifelineLayout) {
    // Shading goes first so every line stays visible on top of it.
    for region in &lifeline.shading {
        out.push(DrawCall::Rect {
            origin: region.origin,
            size: region.size,
            fill: Some(region.fill.clone()),
        });
    }
    for sep in &lifeline.separators {
        out.push(DrawCall::Line {
            from: sep.from,
            to: sep.to,
            dashed: true,
        });
    }

    out.push(DrawCall::Polyline {
        points: lifeline.outline.clone(),
        stroke_width: 1.0,
    });
    out.push(DrawCall::Text {
        pos: lifeline.label_pos,
        class: TextClass::LifelineLabel,
        content: lifeline.name.clone(),
        anchor: None,
    });
    for mark in &lifeline.tick_marks {
        out.push(DrawCall::Line {
            from: mark.from,
            to: mark.to,
            dashed: false,
        });
    }
    for row in &lifeline.state_rows {
        out.push(DrawCall::Line {
            from: row.axis.from,
            to: row.axis.to,
            dashed: false,
        });
        out.push(DrawCall::Text {
            pos: row.label_pos,
            class: TextClass::StateLabel,
            content: row.label.clone(),
            anchor: Some(TextAnchor::End),
        });
    }

    match &lifeline.track {
        Track::Staircase { points } => {
            if !points.is_empty() {
                out.push(DrawCall::Polyline {
                    points: points.clone(),
                    stroke_width: TRACK_STROKE_WIDTH,
                });
            }
        }
        Track::Bus { upper, lower, band } => {
            if upper.is_empty() {
                return;
            }
            out.push(DrawCall::Polygon {
                points: band.clone(),
                fill: BUS_FILL.to_string(),
            });
            for rail in [upper, lower] {
                out.push(DrawCall::Polyline {
                    points: rail.clone(),
                    stroke_width: TRACK_STROKE_WIDTH,
                });
            }
        }
    }
}
