use crate::grammar::{DiagramBuilder, MAX_TICK_TIME, RULES};
use crate::preprocess::SourceLine;
use crate::*;

fn parse(text: &str) -> Result<ParsedDiagram> {
    Engine::new().parse_diagram_sync(text, ParseOptions::default())
}

const TWO_LIFELINES: &str = r#"title "Handshake"
lifeline "A"
lifeline "B"
state "A" "Idle" 0
state "A" "Busy" 1
state "B" "Wait" 0
state "B" "Ack" 1
T0 "A" 0
T1 "A" "Busy"
T2 "B" 1
span "A" T0:T1 "setup"
T0:"A" -> T1:"B" "ack":30:L
T1:"B":1 => T2:"A"
"#;

#[test]
fn parses_every_statement_kind() {
    let parsed = parse(TWO_LIFELINES).unwrap();
    let d = &parsed.diagram;
    assert!(parsed.warnings.is_empty());
    assert_eq!(d.title, "Handshake");
    assert_eq!(d.lifelines.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(d.lifeline("A").unwrap().states.get(1), Some("Busy"));
    assert_eq!(
        d.ticks,
        vec![
            Tick { time: 0, lifeline: "A".into(), state_idx: 0 },
            Tick { time: 1, lifeline: "A".into(), state_idx: 1 },
            Tick { time: 2, lifeline: "B".into(), state_idx: 1 },
        ]
    );
    assert_eq!(
        d.spans,
        vec![Span {
            lifeline: "A".into(),
            origin_tick: 0,
            dest_tick: 1,
            label: "setup".into(),
        }]
    );

    let ack = &d.arrows[0];
    assert_eq!(ack.origin_lifeline, "A");
    assert_eq!(ack.dest_lifeline, "B");
    assert_eq!((ack.origin_tick, ack.dest_tick), (0, 1));
    assert_eq!(ack.label.as_deref(), Some("ack"));
    assert_eq!(ack.label_pos, 30);
    assert_eq!(ack.label_side, LabelSide::L);
    assert_eq!(ack.style, ArrowStyle::Solid);

    let back = &d.arrows[1];
    assert_eq!(back.origin_idx, 1);
    assert_eq!(back.dest_idx, 0);
    assert_eq!(back.label, None);
    assert_eq!(back.label_pos, 0);
    assert_eq!(back.label_side, LabelSide::R);
    assert_eq!(back.style, ArrowStyle::Dashed);
}

#[test]
fn default_title_when_none_given() {
    let parsed = parse("lifeline \"A\"\n").unwrap();
    assert_eq!(parsed.diagram.title, model::DEFAULT_TITLE);
}

#[test]
fn label_lookup_matches_literal_index() {
    let by_name = parse("lifeline \"A\"\nstate \"A\" \"Idle\" 0\nstate \"A\" \"Busy\" 3\nT0 \"A\" \"Busy\"\nT1 \"A\" Busy\n").unwrap();
    let by_index = parse("lifeline \"A\"\nstate \"A\" \"Idle\" 0\nstate \"A\" \"Busy\" 3\nT0 \"A\" 3\nT1 \"A\" 3\n").unwrap();
    assert_eq!(by_name.diagram.ticks, by_index.diagram.ticks);
}

#[test]
fn unresolved_state_name_is_fatal_with_line_number() {
    let err = parse("lifeline \"A\"\nstate \"A\" \"Idle\" 0\n\nT0 \"A\" \"Nonexistent\"\n").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownState {
            line: 4,
            lifeline: "A".into(),
            state: "Nonexistent".into(),
        }
    );
    assert_eq!(err.line(), 4);
    assert_eq!(
        err.to_string(),
        "line 4: state \"Nonexistent\" is not declared for lifeline \"A\""
    );
}

#[test]
fn undeclared_lifeline_references_are_fatal() {
    for (text, line) in [
        ("style \"Ghost\" Slice\n", 1),
        ("lifeline \"A\"\nstate \"Ghost\" \"Idle\" 0\n", 2),
        ("lifeline \"A\"\n\nT0 \"Ghost\" 0\n", 3),
    ] {
        let err = parse(text).unwrap_err();
        assert!(matches!(err, Error::UnknownLifeline { .. }), "{err}");
        assert_eq!(err.line(), line);
    }
}

#[test]
fn style_directive_is_case_insensitive_and_validated() {
    let parsed = parse("lifeline \"A\"\nstyle \"A\" simplified\n").unwrap();
    assert_eq!(
        parsed.diagram.lifeline("A").unwrap().style,
        LifelineStyle::Simplified
    );

    let err = parse("lifeline \"A\"\nstyle \"A\" Fancy\n").unwrap_err();
    assert_eq!(
        err,
        Error::InvalidStyle {
            line: 2,
            style: "Fancy".into()
        }
    );
}

#[test]
fn duplicate_lifeline_keeps_first_declaration() {
    let parsed = parse("lifeline \"A\"\nstyle \"A\" Slice\nlifeline \"A\"\n").unwrap();
    assert_eq!(parsed.diagram.lifelines.len(), 1);
    assert_eq!(
        parsed.diagram.lifeline("A").unwrap().style,
        LifelineStyle::Slice
    );
}

#[test]
fn config_directives() {
    let parsed = parse(
        "config TICK_WIDTH 80\nconfig LEGEND_FREQUENCY 5\nconfig LEGEND_MODE significant\nconfig SCALE default\n",
    )
    .unwrap();
    let cfg = parsed.diagram.config;
    assert_eq!(cfg.tick_width, 80.0);
    assert_eq!(cfg.tick_freq, 5);
    assert_eq!(cfg.legend_mode, LegendMode::OnlySignificant);
    assert_eq!(cfg.scale, 1.0);

    let err = parse("\nconfig TICK_HEIGHT 10\n").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownConfigKey {
            line: 2,
            key: "TICK_HEIGHT".into()
        }
    );

    let err = parse("config LEGEND_MODE sometimes\n").unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { line: 1, .. }));
}

#[test]
fn site_config_is_the_base_for_directives() {
    let engine = Engine::new().with_site_config(DiagramConfig {
        tick_width: 30.0,
        scale: 2.0,
        ..Default::default()
    });
    let parsed = engine
        .parse_diagram_sync("config TICK_WIDTH 60\n", ParseOptions::default())
        .unwrap();
    assert_eq!(parsed.diagram.config.tick_width, 60.0);
    assert_eq!(parsed.diagram.config.scale, 2.0);
}

#[test]
fn unmatched_lines_warn_in_lenient_mode() {
    let parsed = parse("lifeline \"A\"\nthis is not a statement\nT0 \"A\" 0\n").unwrap();
    assert_eq!(
        parsed.warnings,
        vec![ParseWarning {
            line: 2,
            text: "this is not a statement".into()
        }]
    );
    assert_eq!(parsed.diagram.ticks.len(), 1);
}

#[test]
fn unmatched_lines_fail_in_strict_mode() {
    let err = Engine::new()
        .parse_diagram_sync("lifeline \"A\"\nbogus\n", ParseOptions::strict())
        .unwrap_err();
    assert_eq!(
        err,
        Error::UnrecognizedStatement {
            line: 2,
            text: "bogus".into()
        }
    );
}

#[test]
fn captured_text_is_unescaped_then_sanitized() {
    let parsed = parse(r#"title "say \"hi\" & <wave>""#).unwrap();
    assert_eq!(
        parsed.diagram.title,
        "say &quot;hi&quot; &amp; &lt;wave&gt;"
    );
}

#[test]
fn limits_are_enforced() {
    let text = format!("lifeline \"A\"\nT{} \"A\" 0\n", MAX_TICK_TIME + 1);
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, Error::LimitExceeded { line: 2, what: "tick time", .. }));

    let err = parse("lifeline \"A\"\nstate \"A\" \"Far\" 999999\n").unwrap_err();
    assert!(matches!(err, Error::LimitExceeded { what: "state index", .. }));
}

#[test]
fn every_sample_line_matches_exactly_one_rule() {
    for text in TWO_LIFELINES.lines().filter(|l| !l.is_empty()) {
        let matching: Vec<_> = RULES.iter().filter(|r| r.is_match(text)).map(|r| r.name).collect();
        assert_eq!(matching.len(), 1, "{text}: {matching:?}");
    }
}

#[test]
fn builder_keeps_partial_diagram_after_error() {
    let mut builder = DiagramBuilder::new(DiagramConfig::default(), ParseOptions::default());
    let line = |number: usize, text: &str| SourceLine {
        number,
        text: text.to_string(),
    };
    assert_eq!(
        builder.apply_line(&line(1, "lifeline \"A\"")).unwrap(),
        Some("lifeline")
    );
    assert!(builder.apply_line(&line(2, "T0 \"B\" 0")).is_err());
    assert_eq!(builder.diagram().lifelines.len(), 1);
    assert!(builder.diagram().ticks.is_empty());
}

#[test]
fn parsed_diagram_serializes_to_camel_case_json() {
    let parsed = parse("lifeline \"A\"\nT0 \"A\" 0\n").unwrap();
    let json = serde_json::to_value(&parsed.diagram).unwrap();
    assert_eq!(json["ticks"][0]["stateIdx"], 0);
    assert_eq!(json["config"]["tickWidth"], 50.0);
    assert_eq!(json["lifelines"]["A"]["style"], "normal");
}

#[test]
fn tick_rule_accepts_bare_and_quoted_state_tokens() {
    let tick = RULES.iter().find(|r| r.name == "tick").unwrap();
    assert!(tick.is_match(r#"T0 "A" 0"#));
    assert!(tick.is_match(r#"T12 "A" Busy"#));
    assert!(tick.is_match(r#"T3 "A" "Busy \"now\"""#));
    assert!(!tick.is_match(r#"T3 "A" Bu"sy"#));
    assert!(!tick.is_match(r#"T3 "A""#));
}
