use super::{
    BOX_MARGIN_LOWER, BOX_MARGIN_UPPER, BUS_HALF_HEIGHT, SIMPLIFIED_BOX_HEIGHT, TICK_HEIGHT,
    TickGrid,
};
use crate::model::{LifelineLayout, Segment, ShadedRegion, StateRow, Track};
use crate::{Error, Result};
use tickline_core::geom::{Point, point, size};
use tickline_core::{Lifeline, LifelineStyle, TickSnapshot};

/// Slice-style fills, indexed by `state_idx % PALETTE.len()`.
pub const PALETTE: &[&str] = &[
    "#fde2e4", "#dfe7fd", "#e2ece9", "#fff1e6", "#e9e4f0", "#d3f8e2", "#fad2e1", "#f0efeb",
];

const BOX_SIDE_PAD: f64 = 10.0;
const AXIS_LENGTH: f64 = 20.0;
const STATE_LABEL_GAP: f64 = 25.0;
const STATE_LABEL_BASELINE: f64 = 5.0;
const TICK_MARK_ABOVE: f64 = 5.0;
const TICK_MARK_BELOW: f64 = 10.0;

pub(super) fn layout_lifeline(
    lifeline: &Lifeline,
    timeline: &[TickSnapshot],
    grid: &TickGrid,
    top: f64,
    label_x: f64,
) -> Result<LifelineLayout> {
    let height = match lifeline.style {
        LifelineStyle::Simplified => SIMPLIFIED_BOX_HEIGHT,
        LifelineStyle::Normal | LifelineStyle::Slice => {
            let rows = lifeline.states.len().max(1);
            (rows - 1) as f64 * TICK_HEIGHT + BOX_MARGIN_UPPER + BOX_MARGIN_LOWER
        }
    };
    let bottom = top + height;
    let left = grid.base_x - BOX_SIDE_PAD;
    let right = grid.last_x() + BOX_SIDE_PAD;

    let tick_marks = (0..grid.num_ticks)
        .map(|i| Segment {
            from: point(grid.x(i), bottom - TICK_MARK_ABOVE),
            to: point(grid.x(i), bottom + TICK_MARK_BELOW),
        })
        .collect();

    let mut layout = LifelineLayout {
        name: lifeline.name.clone(),
        style: lifeline.style,
        top,
        height,
        outline: vec![
            point(left, bottom),
            point(left, top),
            point(right, top),
            point(right, bottom),
            point(left, bottom),
        ],
        label_pos: point(label_x, top + height / 2.0),
        state_rows: Vec::new(),
        tick_marks,
        track: Track::Staircase { points: Vec::new() },
        shading: Vec::new(),
        separators: Vec::new(),
        attachments: Vec::new(),
    };

    match lifeline.style {
        LifelineStyle::Simplified => {
            let center_y = bottom - BOX_MARGIN_LOWER - BUS_HALF_HEIGHT;
            layout_bus(&mut layout, timeline, grid, center_y);
        }
        LifelineStyle::Normal | LifelineStyle::Slice => {
            check_states(lifeline, timeline)?;
            let row_y = |idx: usize| bottom - BOX_MARGIN_LOWER - idx as f64 * TICK_HEIGHT;
            layout.state_rows = lifeline
                .states
                .labels()
                .map(|(idx, label)| {
                    let y = row_y(idx);
                    StateRow {
                        idx,
                        label: label.to_string(),
                        y,
                        axis: Segment {
                            from: point(grid.base_x - AXIS_LENGTH, y),
                            to: point(grid.base_x, y),
                        },
                        label_pos: point(grid.base_x - STATE_LABEL_GAP, y + STATE_LABEL_BASELINE),
                    }
                })
                .collect();
            layout.attachments = staircase(timeline, grid, row_y);
            layout.track = Track::Staircase {
                points: layout.attachments.iter().flatten().copied().collect(),
            };
            if lifeline.style == LifelineStyle::Slice {
                layout_shading(&mut layout, timeline, grid);
            }
        }
    }
    Ok(layout)
}

/// Every state a normal or slice lifeline passes through needs a row to sit on. A lifeline with
/// an empty catalog still has the implicit row 0.
fn check_states(lifeline: &Lifeline, timeline: &[TickSnapshot]) -> Result<()> {
    for (tick, snap) in timeline.iter().enumerate() {
        let declared = lifeline.states.get(snap.state_idx).is_some()
            || (lifeline.states.is_empty() && snap.state_idx == 0);
        if !declared {
            return Err(Error::UnknownState {
                lifeline: lifeline.name.clone(),
                tick,
                state_idx: snap.state_idx,
            });
        }
    }
    Ok(())
}

/// Per-tick staircase vertices. A tick whose state differs from the previous one gets two
/// points: the old row first, then the new one, so the path steps vertically at that tick.
fn staircase(
    timeline: &[TickSnapshot],
    grid: &TickGrid,
    row_y: impl Fn(usize) -> f64,
) -> Vec<Vec<Point>> {
    let mut out = Vec::with_capacity(timeline.len());
    let mut prev: Option<usize> = None;
    for (i, snap) in timeline.iter().enumerate() {
        let x = grid.x(i);
        let mut points = Vec::with_capacity(2);
        if let Some(prev_idx) = prev.filter(|p| *p != snap.state_idx) {
            points.push(point(x, row_y(prev_idx)));
        }
        points.push(point(x, row_y(snap.state_idx)));
        out.push(points);
        prev = Some(snap.state_idx);
    }
    out
}

/// Two rails around `cy`. At a tick whose state changed the rails close to a chevron: they
/// leave full width `run` before the tick, meet at the centre on it and reopen `run` after it.
fn layout_bus(layout: &mut LifelineLayout, timeline: &[TickSnapshot], grid: &TickGrid, cy: f64) {
    let run = BUS_HALF_HEIGHT.min(grid.tick_width / 2.0);
    let mut upper = Vec::with_capacity(timeline.len());
    let mut lower = Vec::with_capacity(timeline.len());
    let mut attachments = Vec::with_capacity(timeline.len());

    for (i, snap) in timeline.iter().enumerate() {
        let x = grid.x(i);
        let changed = i > 0 && timeline[i - 1].state_idx != snap.state_idx;
        if changed {
            let centre = point(x, cy);
            upper.extend([
                point(x - run, cy - BUS_HALF_HEIGHT),
                centre,
                point(x + run, cy - BUS_HALF_HEIGHT),
            ]);
            lower.extend([
                point(x - run, cy + BUS_HALF_HEIGHT),
                centre,
                point(x + run, cy + BUS_HALF_HEIGHT),
            ]);
            attachments.push(vec![centre]);
        } else {
            let top = point(x, cy - BUS_HALF_HEIGHT);
            let bottom = point(x, cy + BUS_HALF_HEIGHT);
            upper.push(top);
            lower.push(bottom);
            attachments.push(vec![top, bottom]);
        }
    }

    let band = upper.iter().chain(lower.iter().rev()).copied().collect();
    layout.attachments = attachments;
    layout.track = Track::Bus { upper, lower, band };
}

/// One region per significant tick, running to the next significant tick (or the last tick).
/// Regions that would have zero width are skipped; the separator is still drawn.
fn layout_shading(layout: &mut LifelineLayout, timeline: &[TickSnapshot], grid: &TickGrid) {
    let significant: Vec<usize> = timeline
        .iter()
        .enumerate()
        .filter(|(_, s)| s.significant)
        .map(|(i, _)| i)
        .collect();
    let last_tick = timeline.len().saturating_sub(1);

    for (n, &from_tick) in significant.iter().enumerate() {
        let to_tick = significant.get(n + 1).copied().unwrap_or(last_tick);
        let x0 = grid.x(from_tick);
        layout.separators.push(Segment {
            from: point(x0, layout.top),
            to: point(x0, layout.bottom()),
        });
        if to_tick <= from_tick {
            continue;
        }
        let state_idx = timeline[from_tick].state_idx;
        layout.shading.push(ShadedRegion {
            from_tick,
            to_tick,
            state_idx,
            origin: point(x0, layout.top),
            size: size(grid.x(to_tick) - x0, layout.height),
            fill: PALETTE[state_idx % PALETTE.len()].to_string(),
        });
    }
}
