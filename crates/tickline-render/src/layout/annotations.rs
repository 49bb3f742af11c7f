use super::TickGrid;
use crate::model::{
    ArrowLayout, LabelLayout, LegendEntry, LegendLayout, LifelineLayout, Segment, SpanLayout,
    TextAnchor,
};
use crate::{Error, Result};
use rustc_hash::FxHashMap;
use tickline_core::geom::{Point, lerp, point, screen_right_normal};
use tickline_core::{Arrow, LabelSide, LegendMode, ProcessedDiagram, Span};

/// Span bracket offset below the top edge of its lifeline box.
const SPAN_OFFSET: f64 = 35.0;
const SPAN_CAP_HEIGHT: f64 = 7.0;
const SPAN_LABEL_RAISE: f64 = 10.0;
const ARROW_LABEL_OFFSET: f64 = 10.0;

pub(super) struct LifelineIndex<'a> {
    by_name: FxHashMap<&'a str, &'a LifelineLayout>,
    num_ticks: usize,
}

impl<'a> LifelineIndex<'a> {
    pub(super) fn new(lifelines: &'a [LifelineLayout], num_ticks: usize) -> Self {
        Self {
            by_name: lifelines.iter().map(|l| (l.name.as_str(), l)).collect(),
            num_ticks,
        }
    }

    fn resolve(&self, context: &'static str, name: &str, tick: usize) -> Result<&'a LifelineLayout> {
        let lifeline = self
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownLifeline {
                context,
                name: name.to_string(),
            })?;
        if tick >= self.num_ticks {
            return Err(Error::TickOutOfRange {
                context,
                lifeline: name.to_string(),
                tick,
                num_ticks: self.num_ticks,
            });
        }
        Ok(lifeline)
    }

    fn attachment(&self, name: &str, tick: usize, idx: usize) -> Result<Point> {
        let lifeline = self.resolve("arrow", name, tick)?;
        let candidates = lifeline
            .attachments
            .get(tick)
            .map(Vec::as_slice)
            .unwrap_or_default();
        candidates
            .get(idx)
            .copied()
            .ok_or_else(|| Error::AttachmentOutOfRange {
                lifeline: name.to_string(),
                tick,
                idx,
                available: candidates.len(),
            })
    }
}

pub(super) fn layout_span(
    span: &Span,
    index: &LifelineIndex<'_>,
    grid: &TickGrid,
) -> Result<SpanLayout> {
    let lifeline = index.resolve("span", &span.lifeline, span.origin_tick)?;
    index.resolve("span", &span.lifeline, span.dest_tick)?;

    let y = lifeline.top + SPAN_OFFSET;
    let from = point(grid.x(span.origin_tick), y);
    let to = point(grid.x(span.dest_tick), y);
    let cap = |p: Point| Segment {
        from: point(p.x, p.y - SPAN_CAP_HEIGHT),
        to: point(p.x, p.y + SPAN_CAP_HEIGHT),
    };
    Ok(SpanLayout {
        lifeline: span.lifeline.clone(),
        from,
        to,
        caps: [cap(from), cap(to)],
        label: span.label.clone(),
        label_pos: point((from.x + to.x) / 2.0, y - SPAN_LABEL_RAISE),
    })
}

pub(super) fn layout_arrow(arrow: &Arrow, index: &LifelineIndex<'_>) -> Result<ArrowLayout> {
    let from = index.attachment(&arrow.origin_lifeline, arrow.origin_tick, arrow.origin_idx)?;
    let to = index.attachment(&arrow.dest_lifeline, arrow.dest_tick, arrow.dest_idx)?;

    let label = arrow.label.as_ref().map(|text| {
        let along = lerp(from, to, arrow.label_pos as f64 / 100.0);
        let normal = screen_right_normal(from, to) * ARROW_LABEL_OFFSET;
        let (pos, anchor) = match arrow.label_side {
            LabelSide::R => (along + normal, TextAnchor::Start),
            LabelSide::L => (along - normal, TextAnchor::End),
        };
        LabelLayout {
            text: text.clone(),
            pos,
            anchor,
        }
    });

    Ok(ArrowLayout {
        from,
        to,
        style: arrow.style,
        label,
    })
}

/// Tick indices shown under the lifelines. In significant mode only the ticks authored on the
/// first declared lifeline are shown.
pub(super) fn layout_legend(diagram: &ProcessedDiagram, grid: &TickGrid, y: f64) -> LegendLayout {
    let ticks: Vec<usize> = match diagram.config.legend_mode {
        LegendMode::ByFrequency => {
            let freq = diagram.config.tick_freq.max(1) as usize;
            (0..grid.num_ticks).step_by(freq).collect()
        }
        LegendMode::OnlySignificant => {
            let governing = diagram
                .lifelines
                .keys()
                .next()
                .and_then(|name| diagram.timeline(name))
                .unwrap_or_default();
            (0..grid.num_ticks)
                .filter(|&i| governing.get(i).is_some_and(|s| s.significant))
                .collect()
        }
    };

    LegendLayout {
        y,
        entries: ticks
            .into_iter()
            .map(|tick| LegendEntry {
                tick,
                pos: point(grid.x(tick), y),
            })
            .collect(),
    }
}
