//! Expands sparse explicit ticks into one snapshot per lifeline per time step.

use crate::config::DiagramConfig;
use crate::model::{Arrow, Diagram, Lifeline, Span};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSnapshot {
    pub state_idx: usize,
    /// `true` when the state was authored at this tick, `false` when carried forward.
    pub significant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTick {
    pub time: usize,
    /// One snapshot per declared lifeline, in declaration order.
    pub states: IndexMap<String, TickSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDiagram {
    pub title: String,
    pub config: DiagramConfig,
    pub lifelines: IndexMap<String, Lifeline>,
    /// Dense, gapless: `ticks[t].time == t`.
    pub ticks: Vec<ProcessedTick>,
    pub spans: Vec<Span>,
    pub arrows: Vec<Arrow>,
}

impl ProcessedDiagram {
    pub fn num_ticks(&self) -> usize {
        self.ticks.len()
    }

    /// The dense column for one lifeline, or `None` if it was never declared.
    pub fn timeline(&self, name: &str) -> Option<Vec<TickSnapshot>> {
        if !self.lifelines.contains_key(name) {
            return None;
        }
        Some(
            self.ticks
                .iter()
                .map(|t| t.states.get(name).copied().unwrap_or_default())
                .collect(),
        )
    }

    pub fn snapshot(&self, name: &str, time: usize) -> Option<TickSnapshot> {
        self.ticks.get(time)?.states.get(name).copied()
    }
}

/// Builds the dense snapshot sequence for `diagram`.
///
/// Covers times `0..=max(explicit time)`; no explicit ticks yields an empty sequence. When several
/// explicit ticks share a `(time, lifeline)` pair the last one declared wins.
pub fn interpolate_ticks(diagram: &Diagram) -> Vec<ProcessedTick> {
    let Some(max_time) = diagram.ticks.iter().map(|t| t.time).max() else {
        return Vec::new();
    };

    let mut explicit: FxHashMap<(usize, &str), usize> = FxHashMap::default();
    for tick in &diagram.ticks {
        explicit.insert((tick.time, tick.lifeline.as_str()), tick.state_idx);
    }

    let mut last: IndexMap<&str, TickSnapshot> = diagram
        .lifelines
        .keys()
        .map(|name| (name.as_str(), TickSnapshot::default()))
        .collect();

    let mut out = Vec::with_capacity(max_time + 1);
    for time in 0..=max_time {
        let mut states = IndexMap::with_capacity(last.len());
        for (name, prev) in last.iter_mut() {
            let snap = match explicit.get(&(time, *name)) {
                Some(&state_idx) => TickSnapshot {
                    state_idx,
                    significant: true,
                },
                None => TickSnapshot {
                    state_idx: prev.state_idx,
                    significant: false,
                },
            };
            *prev = snap;
            states.insert((*name).to_string(), snap);
        }
        out.push(ProcessedTick { time, states });
    }
    out
}

pub fn process(diagram: Diagram) -> ProcessedDiagram {
    let ticks = interpolate_ticks(&diagram);
    tracing::debug!(
        ticks = ticks.len(),
        lifelines = diagram.lifelines.len(),
        "interpolated ticks"
    );
    ProcessedDiagram {
        title: diagram.title,
        config: diagram.config,
        lifelines: diagram.lifelines,
        ticks,
        spans: diagram.spans,
        arrows: diagram.arrows,
    }
}
