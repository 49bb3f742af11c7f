use super::DiagramBuilder;
use crate::config::ConfigDirectiveError;
use crate::model::{Arrow, ArrowStyle, LabelSide, Lifeline, LifelineStyle, Span, Tick};
use crate::sanitize::{sanitize_field, sanitize_text};
use crate::{Error, Result};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Largest accepted tick time; the interpolator allocates one snapshot row per tick.
pub const MAX_TICK_TIME: usize = 100_000;
/// Largest accepted state index in a `state` declaration.
pub const MAX_STATE_INDEX: usize = 4_096;

// A double-quoted field with backslash escapes; the capture excludes the quotes.
macro_rules! quoted {
    () => {
        r#""((?:[^"\\]|\\.)*)""#
    };
}

macro_rules! rule_regex {
    ($name:ident, $pattern:expr) => {
        pub(super) fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("valid regex"))
        }
    };
}

rule_regex!(config_regex, r"^config\s+(\S+)\s+(\S+)$");
rule_regex!(title_regex, concat!(r"^title\s+", quoted!(), "$"));
rule_regex!(lifeline_regex, concat!(r"^lifeline\s+", quoted!(), "$"));
rule_regex!(style_regex, concat!(r"^style\s+", quoted!(), r"\s+(\w+)$"));
rule_regex!(
    state_regex,
    concat!(r"^state\s+", quoted!(), r"\s+", quoted!(), r"\s+(\d+)$")
);
rule_regex!(
    span_regex,
    concat!(r"^span\s+", quoted!(), r"\s+T(\d+):T(\d+)\s+", quoted!(), "$")
);
rule_regex!(
    arrow_regex,
    concat!(
        r"^T(\d+):",
        quoted!(),
        r"(?::(\d+))?\s*(->|=>)\s*T(\d+):",
        quoted!(),
        r"(?::(\d+))?(?:\s+",
        quoted!(),
        r"(?::(-?\d+))?)?(?::(R|L))?$"
    )
);
rule_regex!(
    tick_regex,
    concat!(r"^T(\d+)\s+", quoted!(), r"\s+(?:", quoted!(), r#"|([^\s"]+))$"#)
);

fn parse_usize(token: &str, line: usize) -> Result<usize> {
    token.parse().map_err(|_| Error::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_optional_usize(m: Option<regex::Match<'_>>, line: usize) -> Result<usize> {
    match m {
        Some(m) => parse_usize(m.as_str(), line),
        None => Ok(0),
    }
}

fn check_limit(value: usize, max: usize, what: &'static str, line: usize) -> Result<()> {
    if value > max {
        return Err(Error::LimitExceeded {
            line,
            what,
            value,
            max,
        });
    }
    Ok(())
}

impl DiagramBuilder {
    fn declared_lifeline_mut(&mut self, name: &str, line: usize) -> Result<&mut Lifeline> {
        self.diagram
            .lifelines
            .get_mut(name)
            .ok_or_else(|| Error::UnknownLifeline {
                line,
                name: name.to_string(),
            })
    }

    pub(super) fn apply_config(&mut self, caps: &Captures<'_>, line: usize) -> Result<()> {
        let key = &caps[1];
        let value = &caps[2];
        self.diagram
            .config
            .apply_directive(key, value)
            .map_err(|err| match err {
                ConfigDirectiveError::UnknownKey => Error::UnknownConfigKey {
                    line,
                    key: key.to_string(),
                },
                ConfigDirectiveError::InvalidValue(reason) => Error::InvalidConfigValue {
                    line,
                    key: key.to_string(),
                    value: value.to_string(),
                    reason,
                },
            })
    }

    pub(super) fn apply_title(&mut self, caps: &Captures<'_>, _line: usize) -> Result<()> {
        self.diagram.title = sanitize_field(&caps[1]);
        Ok(())
    }

    pub(super) fn apply_lifeline(&mut self, caps: &Captures<'_>, line: usize) -> Result<()> {
        let name = sanitize_field(&caps[1]);
        if self.diagram.lifelines.contains_key(&name) {
            tracing::warn!(line, name = %name, "lifeline declared twice; keeping the first declaration");
            return Ok(());
        }
        self.diagram
            .lifelines
            .insert(name.clone(), Lifeline::new(name));
        Ok(())
    }

    pub(super) fn apply_style(&mut self, caps: &Captures<'_>, line: usize) -> Result<()> {
        let name = sanitize_field(&caps[1]);
        let token = &caps[2];
        let lifeline = self.declared_lifeline_mut(&name, line)?;
        lifeline.style =
            LifelineStyle::from_directive_value(token).ok_or_else(|| Error::InvalidStyle {
                line,
                style: token.to_string(),
            })?;
        Ok(())
    }

    pub(super) fn apply_state(&mut self, caps: &Captures<'_>, line: usize) -> Result<()> {
        let name = sanitize_field(&caps[1]);
        let label = sanitize_field(&caps[2]);
        let idx = parse_usize(&caps[3], line)?;
        check_limit(idx, MAX_STATE_INDEX, "state index", line)?;
        self.declared_lifeline_mut(&name, line)?
            .states
            .insert(idx, label);
        Ok(())
    }

    pub(super) fn apply_tick(&mut self, caps: &Captures<'_>, line: usize) -> Result<()> {
        let time = parse_usize(&caps[1], line)?;
        check_limit(time, MAX_TICK_TIME, "tick time", line)?;
        let name = sanitize_field(&caps[2]);
        let lifeline = self.declared_lifeline_mut(&name, line)?;

        let state_idx = match (caps.get(3), caps.get(4)) {
            (None, Some(bare)) if bare.as_str().bytes().all(|b| b.is_ascii_digit()) => {
                bare.as_str()
                    .parse()
                    .map_err(|_| Error::InvalidStateIndex {
                        line,
                        token: bare.as_str().to_string(),
                    })?
            }
            (quoted, bare) => {
                let label = match (quoted, bare) {
                    (Some(q), _) => sanitize_field(q.as_str()),
                    (None, Some(b)) => sanitize_text(b.as_str()),
                    (None, None) => String::new(),
                };
                lifeline
                    .states
                    .position(&label)
                    .ok_or_else(|| Error::UnknownState {
                        line,
                        lifeline: name.clone(),
                        state: label.clone(),
                    })?
            }
        };

        self.diagram.ticks.push(Tick {
            time,
            lifeline: name,
            state_idx,
        });
        Ok(())
    }

    pub(super) fn apply_span(&mut self, caps: &Captures<'_>, line: usize) -> Result<()> {
        self.diagram.spans.push(Span {
            lifeline: sanitize_field(&caps[1]),
            origin_tick: parse_usize(&caps[2], line)?,
            dest_tick: parse_usize(&caps[3], line)?,
            label: sanitize_field(&caps[4]),
        });
        Ok(())
    }

    pub(super) fn apply_arrow(&mut self, caps: &Captures<'_>, line: usize) -> Result<()> {
        let label_pos = match caps.get(9) {
            Some(m) => m.as_str().parse().map_err(|_| Error::InvalidNumber {
                line,
                token: m.as_str().to_string(),
            })?,
            None => 0,
        };
        let label_side = match caps.get(10).map(|m| m.as_str()) {
            Some("L") => LabelSide::L,
            _ => LabelSide::R,
        };
        let style = if &caps[4] == "->" {
            ArrowStyle::Solid
        } else {
            ArrowStyle::Dashed
        };

        self.diagram.arrows.push(Arrow {
            origin_lifeline: sanitize_field(&caps[2]),
            origin_tick: parse_usize(&caps[1], line)?,
            origin_idx: parse_optional_usize(caps.get(3), line)?,
            dest_lifeline: sanitize_field(&caps[6]),
            dest_tick: parse_usize(&caps[5], line)?,
            dest_idx: parse_optional_usize(caps.get(7), line)?,
            label: caps.get(8).map(|m| sanitize_field(m.as_str())),
            label_pos,
            label_side,
            style,
        });
        Ok(())
    }
}
