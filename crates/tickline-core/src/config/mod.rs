use serde::{Deserialize, Serialize};

/// Which tick indices the legend under the lifelines shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendMode {
    /// Every `tick_freq`-th index.
    #[default]
    ByFrequency,
    /// Only indices that were explicitly authored on the governing lifeline.
    OnlySignificant,
}

impl LegendMode {
    pub fn from_directive_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "frequency" | "byfrequency" => Some(Self::ByFrequency),
            "significant" | "onlysignificant" => Some(Self::OnlySignificant),
            _ => None,
        }
    }
}

/// Layout options a diagram source can override through `config` directives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramConfig {
    pub tick_width: f64,
    pub tick_freq: u32,
    pub legend_mode: LegendMode,
    pub scale: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            tick_width: 50.0,
            tick_freq: 1,
            legend_mode: LegendMode::ByFrequency,
            scale: 1.0,
        }
    }
}

/// Why a config directive was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigDirectiveError {
    UnknownKey,
    InvalidValue(String),
}

type ValueParser = fn(&mut DiagramConfig, &str) -> Result<(), String>;

/// Recognized keys, in their normalized form (lowercase, no `_`).
const CONFIG_KEYS: &[(&str, ValueParser)] = &[
    ("tickwidth", set_tick_width),
    ("legendfrequency", set_legend_frequency),
    ("legendmode", set_legend_mode),
    ("scale", set_scale),
];

/// `TICK_WIDTH`, `tick_width` and `tickWidth` all normalize to `tickwidth`.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl DiagramConfig {
    /// Applies one `config KEY VALUE` directive. The literal value `default` leaves the current
    /// value untouched (the key must still be recognized).
    pub fn apply_directive(&mut self, key: &str, value: &str) -> Result<(), ConfigDirectiveError> {
        let normalized = normalize_key(key);
        let Some((_, parser)) = CONFIG_KEYS.iter().find(|(k, _)| *k == normalized) else {
            return Err(ConfigDirectiveError::UnknownKey);
        };
        if value == "default" {
            return Ok(());
        }
        parser(self, value).map_err(ConfigDirectiveError::InvalidValue)
    }
}

fn parse_positive_f64(value: &str) -> Result<f64, String> {
    let v: f64 = value
        .parse()
        .map_err(|_| "expected a positive number".to_string())?;
    if !(v.is_finite() && v > 0.0) {
        return Err("expected a positive number".to_string());
    }
    Ok(v)
}

fn set_tick_width(cfg: &mut DiagramConfig, value: &str) -> Result<(), String> {
    cfg.tick_width = parse_positive_f64(value)?;
    Ok(())
}

fn set_scale(cfg: &mut DiagramConfig, value: &str) -> Result<(), String> {
    cfg.scale = parse_positive_f64(value)?;
    Ok(())
}

fn set_legend_frequency(cfg: &mut DiagramConfig, value: &str) -> Result<(), String> {
    let v: u32 = value
        .parse()
        .map_err(|_| "expected a positive integer".to_string())?;
    if v == 0 {
        return Err("expected a positive integer".to_string());
    }
    cfg.tick_freq = v;
    Ok(())
}

fn set_legend_mode(cfg: &mut DiagramConfig, value: &str) -> Result<(), String> {
    cfg.legend_mode = LegendMode::from_directive_value(value)
        .ok_or_else(|| "expected `frequency` or `significant`".to_string())?;
    Ok(())
}
