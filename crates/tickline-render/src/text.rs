use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn is_bold(&self) -> bool {
        matches!(self.font_weight.as_deref(), Some("bold") | Some("700"))
    }
}

/// The text roles a diagram uses. Each maps to one CSS class in the SVG output and to the style
/// the layout measures it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextClass {
    Title,
    LifelineLabel,
    StateLabel,
    Legend,
}

impl TextClass {
    pub const ALL: [TextClass; 4] = [
        TextClass::Title,
        TextClass::LifelineLabel,
        TextClass::StateLabel,
        TextClass::Legend,
    ];

    pub fn css_class(self) -> &'static str {
        match self {
            TextClass::Title => "title",
            TextClass::LifelineLabel => "lifeline-label",
            TextClass::StateLabel => "state-label",
            TextClass::Legend => "legend",
        }
    }

    pub fn style(self) -> TextStyle {
        let (font_size, bold) = match self {
            TextClass::Title => (20.0, true),
            TextClass::LifelineLabel => (17.0, true),
            TextClass::StateLabel | TextClass::Legend => (16.0, false),
        };
        TextStyle {
            font_family: Some("sans-serif".to_string()),
            font_size,
            font_weight: bold.then(|| "bold".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free measurer: every display column is `font_size * char_width_factor` wide.
///
/// Input is markup text (entities such as `&amp;` count as one character), and wide CJK/emoji
/// characters count as two columns.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
    pub bold_width_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn display_text(text: &str) -> Cow<'_, str> {
        if text.contains('&') {
            Cow::Owned(htmlize::unescape(text).into_owned())
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };
        let bold_width_factor = if self.bold_width_factor == 0.0 {
            1.1
        } else {
            self.bold_width_factor
        };

        let display = Self::display_text(text);
        let font_size = style.font_size.max(1.0);
        let lines: Vec<&str> = display.split('\n').collect();
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        let mut width = max_cols as f64 * font_size * char_width_factor;
        if style.is_bold() {
            width *= bold_width_factor;
        }
        TextMetrics {
            width,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}
