//! The structured diagram produced by the grammar dispatcher.

use crate::config::DiagramConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled Diagram";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifelineStyle {
    #[default]
    Normal,
    Simplified,
    /// Normal geometry plus color-coded state shading.
    Slice,
}

impl LifelineStyle {
    pub fn from_directive_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "simplified" => Some(Self::Simplified),
            "slice" => Some(Self::Slice),
            _ => None,
        }
    }
}

/// Ordered state labels of one lifeline, addressed by state index.
///
/// Labels may be assigned sparsely; unassigned slots are holes and read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateCatalog {
    slots: Vec<Option<String>>,
}

impl StateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `label` to `idx`, growing the catalog with holes as needed.
    pub fn insert(&mut self, idx: usize, label: String) {
        if self.slots.len() <= idx {
            self.slots.resize(idx + 1, None);
        }
        self.slots[idx] = Some(label);
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.slots.get(idx).and_then(|s| s.as_deref())
    }

    /// Position of the first slot holding `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.as_deref() == Some(label))
    }

    /// Number of slots, holes included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Assigned `(index, label)` pairs in index order.
    pub fn labels(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_deref().map(|s| (i, s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifeline {
    pub name: String,
    pub style: LifelineStyle,
    pub states: StateCatalog,
}

impl Lifeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: LifelineStyle::default(),
            states: StateCatalog::new(),
        }
    }
}

/// One explicit `(time, lifeline, state)` observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub time: usize,
    pub lifeline: String,
    pub state_idx: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub lifeline: String,
    pub origin_tick: usize,
    pub dest_tick: usize,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelSide {
    L,
    #[default]
    R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrowStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub origin_lifeline: String,
    pub origin_tick: usize,
    pub origin_idx: usize,
    pub dest_lifeline: String,
    pub dest_tick: usize,
    pub dest_idx: usize,
    pub label: Option<String>,
    /// Percent along the segment; may be negative.
    pub label_pos: i64,
    pub label_side: LabelSide,
    pub style: ArrowStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub title: String,
    pub config: DiagramConfig,
    /// Declared lifelines, keyed by sanitized name, in declaration order.
    pub lifelines: IndexMap<String, Lifeline>,
    pub ticks: Vec<Tick>,
    pub spans: Vec<Span>,
    pub arrows: Vec<Arrow>,
}

impl Diagram {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            config,
            lifelines: IndexMap::new(),
            ticks: Vec::new(),
            spans: Vec::new(),
            arrows: Vec::new(),
        }
    }

    pub fn lifeline(&self, name: &str) -> Option<&Lifeline> {
        self.lifelines.get(name)
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new(DiagramConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_catalog_keeps_holes() {
        let mut states = StateCatalog::new();
        states.insert(2, "Done".to_string());
        states.insert(0, "Idle".to_string());
        assert_eq!(states.len(), 3);
        assert_eq!(states.get(1), None);
        assert_eq!(states.get(2), Some("Done"));
        assert_eq!(
            states.labels().collect::<Vec<_>>(),
            vec![(0, "Idle"), (2, "Done")]
        );
    }

    #[test]
    fn position_finds_first_matching_label() {
        let mut states = StateCatalog::new();
        states.insert(0, "Idle".to_string());
        states.insert(1, "Busy".to_string());
        states.insert(3, "Busy".to_string());
        assert_eq!(states.position("Busy"), Some(1));
        assert_eq!(states.position("Gone"), None);
    }

    #[test]
    fn style_names_are_case_insensitive() {
        assert_eq!(
            LifelineStyle::from_directive_value("Slice"),
            Some(LifelineStyle::Slice)
        );
        assert_eq!(
            LifelineStyle::from_directive_value("SIMPLIFIED"),
            Some(LifelineStyle::Simplified)
        );
        assert_eq!(LifelineStyle::from_directive_value("Fancy"), None);
    }
}
