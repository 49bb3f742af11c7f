use std::path::PathBuf;
use tickline_core::{Engine, ParseOptions};
use tickline_render::draw::{DrawCall, draw_calls};
use tickline_render::model::LayoutedDiagram;
use tickline_render::svg::{SvgRenderOptions, render_svg};
use tickline_render::{LayoutOptions, layout_processed};

const FIXTURES: &[&str] = &["basic.tick", "slice.tick", "simplified.tick", "macros.tick"];

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn layout(text: &str) -> LayoutedDiagram {
    let processed = Engine::new()
        .process_sync(text, ParseOptions::strict())
        .unwrap()
        .processed;
    layout_processed(&processed, &LayoutOptions::default()).unwrap()
}

fn svg(text: &str) -> String {
    render_svg(&layout(text), &SvgRenderOptions::default())
}

fn root_attr(svg: &str, name: &str) -> String {
    let doc = roxmltree::Document::parse(svg).unwrap();
    doc.root_element().attribute(name).unwrap().to_string()
}

#[test]
fn fixtures_render_well_formed_svg() {
    for name in FIXTURES {
        let out = svg(&fixture(name));
        let doc = roxmltree::Document::parse(&out)
            .unwrap_or_else(|e| panic!("{name}: invalid svg: {e}"));
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "svg", "{name}");
        assert!(
            root.descendants().any(|n| n.has_tag_name("marker")),
            "{name}: missing arrow marker"
        );
    }
}

#[test]
fn rendering_is_deterministic() {
    for name in FIXTURES {
        let d = layout(&fixture(name));
        let a = render_svg(&d, &SvgRenderOptions::default());
        let b = render_svg(&d, &SvgRenderOptions::default());
        assert_eq!(a, b, "{name}");
    }
}

#[test]
fn scale_multiplies_document_size() {
    let text = fixture("basic.tick");
    let one = svg(&text);
    let two = svg(&format!("config SCALE 2\n{text}"));

    let w1: f64 = root_attr(&one, "width").parse().unwrap();
    let w2: f64 = root_attr(&two, "width").parse().unwrap();
    assert!((w2 - 2.0 * w1).abs() < 1e-6);
    assert_eq!(root_attr(&two, "viewBox"), format!("0 0 {} {}", root_attr(&two, "width"), root_attr(&two, "height")));
    assert!(two.contains("font-size: 40px"));
}

#[test]
fn diagram_id_prefixes_marker_references() {
    let d = layout(&fixture("basic.tick"));
    let out = render_svg(
        &d,
        &SvgRenderOptions {
            diagram_id: Some("first".to_string()),
        },
    );
    assert_eq!(root_attr(&out, "id"), "first");
    assert!(out.contains("<marker id=\"first-arrow\""));
    assert!(out.contains("marker-end=\"url(#first-arrow)\""));
    assert!(!out.contains("url(#arrow)"));
}

#[test]
fn dashed_arrows_and_spans() {
    let out = svg(&fixture("basic.tick"));
    let doc = roxmltree::Document::parse(&out).unwrap();
    let arrows: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("polyline") && n.attribute("marker-end").is_some())
        .collect();
    // Two arrows plus the span's double arrow.
    assert_eq!(arrows.len(), 3);
    assert_eq!(
        arrows
            .iter()
            .filter(|n| n.attribute("stroke-dasharray").is_some())
            .count(),
        1
    );
    assert_eq!(
        arrows
            .iter()
            .filter(|n| n.attribute("marker-start").is_some())
            .count(),
        1
    );
}

#[test]
fn escaped_text_round_trips_through_xml() {
    let out = svg("title \"R&D <team>\"\nlifeline \"A's\"\nT0 \"A's\" 0\n");
    let doc = roxmltree::Document::parse(&out).unwrap();
    let texts: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .filter_map(|n| n.text())
        .collect();
    assert!(texts.contains(&"R&D <team>"));
    assert!(texts.contains(&"A's"));
}

#[test]
fn legend_labels_are_rendered() {
    let out = svg(&fixture("slice.tick"));
    let doc = roxmltree::Document::parse(&out).unwrap();
    let legend: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("text") && n.attribute("class") == Some("legend"))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(legend, vec!["0", "3", "6", "7", "8"]);
}

#[test]
fn shading_is_painted_before_the_track() {
    let calls = draw_calls(&layout(&fixture("slice.tick")));
    let first_rect = calls
        .iter()
        .position(|c| matches!(c, DrawCall::Rect { .. }))
        .unwrap();
    let track = calls
        .iter()
        .position(|c| matches!(c, DrawCall::Polyline { stroke_width, .. } if *stroke_width == 2.0))
        .unwrap();
    assert!(first_rect < track);
    assert!(matches!(calls[0], DrawCall::Text { .. }));
}

#[test]
fn simplified_lifeline_draws_band_and_rails() {
    let calls = draw_calls(&layout(&fixture("simplified.tick")));
    let polygons = calls
        .iter()
        .filter(|c| matches!(c, DrawCall::Polygon { .. }))
        .count();
    assert_eq!(polygons, 1);
}
