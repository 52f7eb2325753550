//! Histogram rendering settings

use covis_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width, in log-axis units, reserved around zero on a logarithmic X axis
pub const DEFAULT_MIDDLE_WIDTH: f64 = 1.2;

/// Axis scale selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Linear,
    #[serde(rename = "log", alias = "logarithmic")]
    Logarithmic,
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMode::Linear => write!(f, "linear"),
            ScaleMode::Logarithmic => write!(f, "log"),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "lin" => Ok(ScaleMode::Linear),
            "log" | "logarithmic" => Ok(ScaleMode::Logarithmic),
            _ => Err(Error::InvalidInput(format!("unknown scale '{s}'"))),
        }
    }
}

/// Histogram rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistogramConfig {
    /// Log-axis width of the zero-crossing gap
    pub middle_width: f64,
    /// Fill color of regular bars
    pub bar_color: String,
    /// Fill color of bars drawn in the zero-crossing gap
    pub gap_color: String,
    /// Label of the missing-value bin
    pub missing_label: String,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            middle_width: DEFAULT_MIDDLE_WIDTH,
            bar_color: "#5586b6".to_string(),
            gap_color: "#b6b6b6".to_string(),
            missing_label: covis_partition::MISSING_LABEL.to_string(),
        }
    }
}

impl HistogramConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zero-gap width; negative or non-finite values fall back to the default
    pub fn with_middle_width(mut self, width: f64) -> Self {
        self.middle_width = if width.is_finite() && width >= 0.0 {
            width
        } else {
            DEFAULT_MIDDLE_WIDTH
        };
        self
    }

    pub fn with_bar_color(mut self, color: impl Into<String>) -> Self {
        self.bar_color = color.into();
        self
    }

    pub fn with_gap_color(mut self, color: impl Into<String>) -> Self {
        self.gap_color = color.into();
        self
    }

    pub fn with_missing_label(mut self, label: impl Into<String>) -> Self {
        self.missing_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_parse() {
        assert_eq!("linear".parse::<ScaleMode>().unwrap(), ScaleMode::Linear);
        assert_eq!("LOG".parse::<ScaleMode>().unwrap(), ScaleMode::Logarithmic);
        assert!("sqrt".parse::<ScaleMode>().is_err());
        assert_eq!(ScaleMode::Logarithmic.to_string(), "log");
    }

    #[test]
    fn test_scale_serde() {
        assert_eq!(serde_json::to_string(&ScaleMode::Logarithmic).unwrap(), r#""log""#);
        let scale: ScaleMode = serde_json::from_str(r#""linear""#).unwrap();
        assert_eq!(scale, ScaleMode::Linear);
    }

    #[test]
    fn test_config_builder() {
        let config = HistogramConfig::new()
            .with_middle_width(-3.0)
            .with_bar_color("red")
            .with_missing_label("N/A");
        assert_eq!(config.middle_width, DEFAULT_MIDDLE_WIDTH);
        assert_eq!(config.bar_color, "red");
        assert_eq!(config.missing_label, "N/A");
        assert_eq!(HistogramConfig::default().with_middle_width(0.5).middle_width, 0.5);
    }

    #[test]
    fn test_config_partial_json() {
        let config: HistogramConfig = serde_json::from_str(r#"{"middleWidth": 2.0}"#).unwrap();
        assert_eq!(config.middle_width, 2.0);
        assert_eq!(config.missing_label, "Missing");
    }
}
