#![forbid(unsafe_code)]

//! Tickline parser + tick interpolation (headless).
//!
//! Pipeline: source text -> [`preprocess`] (comments, macros) -> [`grammar`] (line rules) ->
//! [`model::Diagram`] -> [`interpolate`] (dense per-tick snapshots) -> [`ProcessedDiagram`].
//! Layout and SVG output live in `tickline-render`.

pub mod config;
pub mod error;
pub mod geom;
pub mod grammar;
pub mod interpolate;
pub mod model;
pub mod preprocess;
pub mod sanitize;

pub use config::{DiagramConfig, LegendMode};
pub use error::{Error, Result};
pub use grammar::{ParseWarning, ParsedDiagram};
pub use interpolate::{ProcessedDiagram, ProcessedTick, TickSnapshot};
pub use model::{Arrow, ArrowStyle, Diagram, LabelSide, Lifeline, LifelineStyle, Span, Tick};
pub use preprocess::{PreprocessResult, preprocess};

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub strict: bool,
}

impl ParseOptions {
    /// Strict parsing: a line that matches no rule is an error.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Lenient parsing: unmatched lines are skipped and reported as warnings.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// A processed diagram together with the warnings collected while parsing it.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    pub processed: ProcessedDiagram,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    site_config: DiagramConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the built-in defaults. `config` directives in a source still override per key.
    pub fn with_site_config(mut self, site_config: DiagramConfig) -> Self {
        self.site_config = site_config;
        self
    }

    pub fn site_config(&self) -> &DiagramConfig {
        &self.site_config
    }

    /// Preprocesses and parses `text` into a [`Diagram`], stopping at the first fatal error.
    pub fn parse_diagram_sync(&self, text: &str, options: ParseOptions) -> Result<ParsedDiagram> {
        let pre = preprocess(text);
        grammar::parse_lines(&pre.lines, self.site_config, options)
    }

    /// Parses `text` and expands its explicit ticks into the dense per-tick model.
    pub fn process_sync(&self, text: &str, options: ParseOptions) -> Result<ProcessOutput> {
        Ok(self.process_parsed(self.parse_diagram_sync(text, options)?))
    }

    /// Expands an already parsed diagram; the parse warnings move into the output.
    pub fn process_parsed(&self, parsed: ParsedDiagram) -> ProcessOutput {
        let ParsedDiagram { diagram, warnings } = parsed;
        ProcessOutput {
            processed: interpolate::process(diagram),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests;
