//! Coordinate layout: resolves a processed diagram into absolute, unscaled pixel geometry.
//!
//! Lifelines are stacked top to bottom in declaration order. Every lifeline shares one horizontal
//! tick grid that starts at `lifeline_base_x`, which is wide enough to hold the longest lifeline
//! name and the longest state label side by side.

mod annotations;
mod lifeline;

pub use lifeline::PALETTE;

use crate::Result;
use crate::model::{LayoutedDiagram, TitleLayout};
use crate::text::{TextClass, TextMeasurer};
use tickline_core::geom::{point, size};
use tickline_core::{LifelineStyle, ProcessedDiagram};

pub const TICK_HEIGHT: f64 = 40.0;
pub const BOX_MARGIN_UPPER: f64 = 50.0;
pub const BOX_MARGIN_LOWER: f64 = 20.0;
pub const SIMPLIFIED_BOX_HEIGHT: f64 = 80.0;
/// Distance of each simplified-style rail from its centerline.
pub const BUS_HALF_HEIGHT: f64 = 8.0;

const LEFT_PAD: f64 = 20.0;
const AXIS_GAP: f64 = 40.0;
const RIGHT_PAD: f64 = 30.0;
const FIRST_BOX_TOP: f64 = 70.0;
/// Vertical room below each box: tick marks plus the gap to the next box.
const BOX_GAP: f64 = 45.0;
const LEGEND_RAISE: f64 = 20.0;
const TITLE_X: f64 = 10.0;
const TITLE_BASELINE: f64 = 28.0;
const TITLE_BOX_HEIGHT: f64 = 45.0;
const TITLE_BOX_PAD: f64 = 30.0;

/// The shared horizontal axis: tick `i` sits at `base_x + i * tick_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickGrid {
    pub base_x: f64,
    pub tick_width: f64,
    pub num_ticks: usize,
}

impl TickGrid {
    pub fn x(&self, tick: usize) -> f64 {
        self.base_x + tick as f64 * self.tick_width
    }

    /// x of the last tick; `base_x` when there are no ticks.
    pub fn last_x(&self) -> f64 {
        self.x(self.num_ticks.saturating_sub(1))
    }
}

pub fn layout_diagram(
    diagram: &ProcessedDiagram,
    measurer: &dyn TextMeasurer,
) -> Result<LayoutedDiagram> {
    let name_style = TextClass::LifelineLabel.style();
    let state_style = TextClass::StateLabel.style();

    let longest_name = diagram
        .lifelines
        .keys()
        .map(|name| measurer.measure(name, &name_style).width)
        .fold(0.0, f64::max);
    let longest_state = diagram
        .lifelines
        .values()
        .filter(|l| l.style != LifelineStyle::Simplified)
        .flat_map(|l| l.states.labels().map(|(_, label)| label))
        .map(|label| measurer.measure(label, &state_style).width)
        .fold(0.0, f64::max);

    let grid = TickGrid {
        base_x: LEFT_PAD + longest_name + longest_state + AXIS_GAP,
        tick_width: diagram.config.tick_width,
        num_ticks: diagram.num_ticks(),
    };

    let mut lifelines = Vec::with_capacity(diagram.lifelines.len());
    let mut top = FIRST_BOX_TOP;
    for lifeline in diagram.lifelines.values() {
        let timeline = diagram.timeline(&lifeline.name).unwrap_or_default();
        let layout = lifeline::layout_lifeline(lifeline, &timeline, &grid, top, LEFT_PAD)?;
        top = layout.bottom() + BOX_GAP;
        lifelines.push(layout);
    }

    let index = annotations::LifelineIndex::new(&lifelines, grid.num_ticks);
    let spans = diagram
        .spans
        .iter()
        .map(|span| annotations::layout_span(span, &index, &grid))
        .collect::<Result<Vec<_>>>()?;
    let arrows = diagram
        .arrows
        .iter()
        .map(|arrow| annotations::layout_arrow(arrow, &index))
        .collect::<Result<Vec<_>>>()?;
    let legend = annotations::layout_legend(diagram, &grid, top - LEGEND_RAISE);

    let title_width = measurer
        .measure(&diagram.title, &TextClass::Title.style())
        .width;
    let title = TitleLayout {
        text: diagram.title.clone(),
        pos: point(TITLE_X, TITLE_BASELINE),
        label_box: size(title_width + TITLE_BOX_PAD, TITLE_BOX_HEIGHT),
    };

    let width = (grid.last_x() + RIGHT_PAD).max(title.label_box.width + TITLE_X);
    tracing::debug!(
        width,
        height = top,
        lifelines = lifelines.len(),
        arrows = arrows.len(),
        spans = spans.len(),
        "laid out diagram"
    );

    Ok(LayoutedDiagram {
        width,
        height: top,
        scale: diagram.config.scale,
        lifeline_base_x: grid.base_x,
        tick_width: grid.tick_width,
        num_ticks: grid.num_ticks,
        title,
        lifelines,
        spans,
        arrows,
        legend,
    })
}
