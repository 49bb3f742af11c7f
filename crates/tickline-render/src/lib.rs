#![forbid(unsafe_code)]

//! Headless layout + SVG output for processed Tickline diagrams.

pub mod draw;
pub mod layout;
pub mod model;
pub mod svg;
pub mod text;

use crate::model::LayoutedDiagram;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;
use tickline_core::ProcessedDiagram;

/// Reference errors found while resolving geometry. Nothing is emitted when one is raised.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{context} references unknown lifeline \"{name}\"")]
    UnknownLifeline { context: &'static str, name: String },
    #[error(
        "{context} on lifeline \"{lifeline}\" references tick {tick}, but the diagram has {num_ticks} ticks"
    )]
    TickOutOfRange {
        context: &'static str,
        lifeline: String,
        tick: usize,
        num_ticks: usize,
    },
    #[error(
        "arrow references attachment {idx} of lifeline \"{lifeline}\" at tick {tick}, which only has {available}"
    )]
    AttachmentOutOfRange {
        lifeline: String,
        tick: usize,
        idx: usize,
        available: usize,
    },
    #[error("lifeline \"{lifeline}\" is in undeclared state {state_idx} at tick {tick}")]
    UnknownState {
        lifeline: String,
        tick: usize,
        state_idx: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions").finish_non_exhaustive()
    }
}

pub fn layout_processed(
    diagram: &ProcessedDiagram,
    options: &LayoutOptions,
) -> Result<LayoutedDiagram> {
    layout::layout_diagram(diagram, options.text_measurer.as_ref())
}
