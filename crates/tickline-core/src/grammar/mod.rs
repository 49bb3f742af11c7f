//! Line-pattern dispatch: every preprocessed line is matched against an ordered rule table and
//! the matching rule mutates the diagram being built.

mod rules;

use crate::config::DiagramConfig;
use crate::model::Diagram;
use crate::preprocess::SourceLine;
use crate::{Error, ParseOptions, Result};
use regex::{Captures, Regex};
use serde::Serialize;

pub use rules::{MAX_STATE_INDEX, MAX_TICK_TIME};

type RuleFn = fn(&mut DiagramBuilder, &Captures<'_>, usize) -> Result<()>;

/// One line pattern and the mutation applied when it matches.
pub struct Rule {
    pub name: &'static str,
    regex: fn() -> &'static Regex,
    apply: RuleFn,
}

impl Rule {
    pub fn is_match(&self, text: &str) -> bool {
        (self.regex)().is_match(text)
    }

    fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        (self.regex)().captures(text)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Rules in precedence order. Every pattern is anchored on a distinct leading keyword (`T<n> `
/// for ticks, `T<n>:` for arrows), so at most one rule can match a line; the order only matters
/// if that invariant is ever broken, and debug builds assert it.
pub const RULES: &[Rule] = &[
    Rule {
        name: "config",
        regex: rules::config_regex,
        apply: DiagramBuilder::apply_config,
    },
    Rule {
        name: "title",
        regex: rules::title_regex,
        apply: DiagramBuilder::apply_title,
    },
    Rule {
        name: "lifeline",
        regex: rules::lifeline_regex,
        apply: DiagramBuilder::apply_lifeline,
    },
    Rule {
        name: "style",
        regex: rules::style_regex,
        apply: DiagramBuilder::apply_style,
    },
    Rule {
        name: "state",
        regex: rules::state_regex,
        apply: DiagramBuilder::apply_state,
    },
    Rule {
        name: "span",
        regex: rules::span_regex,
        apply: DiagramBuilder::apply_span,
    },
    Rule {
        name: "arrow",
        regex: rules::arrow_regex,
        apply: DiagramBuilder::apply_arrow,
    },
    Rule {
        name: "tick",
        regex: rules::tick_regex,
        apply: DiagramBuilder::apply_tick,
    },
];

/// A line that matched no rule and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub line: usize,
    pub text: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: unrecognized statement: {}", self.line, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDiagram {
    pub diagram: Diagram,
    pub warnings: Vec<ParseWarning>,
}

/// Accumulates the diagram while lines are dispatched. The partial diagram stays inspectable
/// through [`DiagramBuilder::diagram`] after a failed line.
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    diagram: Diagram,
    warnings: Vec<ParseWarning>,
    options: ParseOptions,
}

impl DiagramBuilder {
    pub fn new(config: DiagramConfig, options: ParseOptions) -> Self {
        Self {
            diagram: Diagram::new(config),
            warnings: Vec::new(),
            options,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Dispatches one line. Returns the name of the rule that consumed it, or `None` when the
    /// line matched nothing and was recorded as a warning.
    pub fn apply_line(&mut self, line: &SourceLine) -> Result<Option<&'static str>> {
        let text = line.text.as_str();
        let Some((rule, caps)) = RULES
            .iter()
            .find_map(|rule| rule.captures(text).map(|caps| (rule, caps)))
        else {
            return self.unmatched(line);
        };
        debug_assert_eq!(
            RULES.iter().filter(|r| r.is_match(text)).count(),
            1,
            "line matched more than one grammar rule: {text}"
        );

        (rule.apply)(self, &caps, line.number)?;
        Ok(Some(rule.name))
    }

    fn unmatched(&mut self, line: &SourceLine) -> Result<Option<&'static str>> {
        if self.options.strict {
            return Err(Error::UnrecognizedStatement {
                line: line.number,
                text: line.text.clone(),
            });
        }
        tracing::warn!(line = line.number, text = %line.text, "ignoring unrecognized statement");
        self.warnings.push(ParseWarning {
            line: line.number,
            text: line.text.clone(),
        });
        Ok(None)
    }

    pub fn finish(self) -> ParsedDiagram {
        ParsedDiagram {
            diagram: self.diagram,
            warnings: self.warnings,
        }
    }
}

/// Runs every line through the dispatcher, stopping at the first fatal error.
pub fn parse_lines(
    lines: &[SourceLine],
    config: DiagramConfig,
    options: ParseOptions,
) -> Result<ParsedDiagram> {
    let mut builder = DiagramBuilder::new(config, options);
    for line in lines {
        builder.apply_line(line)?;
    }
    let parsed = builder.finish();
    tracing::debug!(
        lifelines = parsed.diagram.lifelines.len(),
        ticks = parsed.diagram.ticks.len(),
        arrows = parsed.diagram.arrows.len(),
        spans = parsed.diagram.spans.len(),
        warnings = parsed.warnings.len(),
        "parsed diagram"
    );
    Ok(parsed)
}
