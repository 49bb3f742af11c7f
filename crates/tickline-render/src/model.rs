use serde::Serialize;
use tickline_core::geom::{Point, Size};
use tickline_core::{ArrowStyle, LifelineStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleLayout {
    pub text: String,
    pub pos: Point,
    /// The framed label area in the top-left corner.
    pub label_box: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRow {
    pub idx: usize,
    pub label: String,
    pub y: f64,
    pub axis: Segment,
    pub label_pos: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadedRegion {
    pub from_tick: usize,
    pub to_tick: usize,
    pub state_idx: usize,
    pub origin: Point,
    pub size: Size,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Track {
    /// State-index-vs-time path with vertical steps at every change.
    Staircase { points: Vec<Point> },
    /// Two rails around a centerline that pinch together where the state changes.
    Bus {
        upper: Vec<Point>,
        lower: Vec<Point>,
        band: Vec<Point>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifelineLayout {
    pub name: String,
    pub style: LifelineStyle,
    pub top: f64,
    pub height: f64,
    /// Box corners, bottom-left -> top-left -> top-right -> bottom-right -> bottom-left.
    pub outline: Vec<Point>,
    pub label_pos: Point,
    pub state_rows: Vec<StateRow>,
    pub tick_marks: Vec<Segment>,
    pub track: Track,
    pub shading: Vec<ShadedRegion>,
    pub separators: Vec<Segment>,
    /// Arrow attachment candidates, one list per tick.
    pub attachments: Vec<Vec<Point>>,
}

impl LifelineLayout {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanLayout {
    pub lifeline: String,
    pub from: Point,
    pub to: Point,
    pub caps: [Segment; 2],
    pub label: String,
    pub label_pos: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelLayout {
    pub text: String,
    pub pos: Point,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowLayout {
    pub from: Point,
    pub to: Point,
    pub style: ArrowStyle,
    pub label: Option<LabelLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendEntry {
    pub tick: usize,
    pub pos: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLayout {
    pub y: f64,
    pub entries: Vec<LegendEntry>,
}

/// Absolute geometry of a whole diagram in unscaled pixels. `scale` is applied at emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutedDiagram {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub lifeline_base_x: f64,
    pub tick_width: f64,
    pub num_ticks: usize,
    pub title: TitleLayout,
    pub lifelines: Vec<LifelineLayout>,
    pub spans: Vec<SpanLayout>,
    pub arrows: Vec<ArrowLayout>,
    pub legend: LegendLayout,
}

impl LayoutedDiagram {
    pub fn lifeline(&self, name: &str) -> Option<&LifelineLayout> {
        self.lifelines.iter().find(|l| l.name == name)
    }
}
