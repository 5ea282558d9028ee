//! Application configuration.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use sketchify_core::shapes::{Polygon, SerializableColor, ShapeStyle};
use sketchify_core::tools::ToolSettings;
use std::path::{Path, PathBuf};

/// Settings read from an optional JSON file; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Initial stroke color as a hex string.
    pub color: String,
    /// Initial stroke width.
    pub size: f64,
    /// Initial polygon side count.
    pub polygon_sides: u32,
    /// Directory exported images are written to.
    pub export_dir: PathBuf,
    /// File name prefix of exported images.
    pub export_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            color: "#000".to_string(),
            size: ShapeStyle::DEFAULT_STROKE_WIDTH,
            polygon_sides: Polygon::DEFAULT_SIDES,
            export_dir: PathBuf::from("."),
            export_prefix: "sketchify".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
        let config = Self::from_json(&text).map_err(|e| AppError::json(path, e))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Initial tool pickers. An unreadable color falls back to black.
    pub fn tool_settings(&self) -> ToolSettings {
        let mut tools = ToolSettings::new();
        tools.set_color(parse_color_or_black(&self.color));
        tools.set_size(self.size);
        tools.set_polygon_sides(self.polygon_sides);
        tools
    }
}

/// Parse a hex color, logging and substituting black when it is invalid.
pub fn parse_color_or_black(color: &str) -> SerializableColor {
    SerializableColor::from_hex(color).unwrap_or_else(|e| {
        log::warn!("{e}; using black");
        SerializableColor::black()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_json(r##"{"width": 320, "color": "#ff0000"}"##).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.export_prefix, "sketchify");

        let tools = config.tool_settings();
        assert_eq!(tools.style.stroke_color, SerializableColor::new(255, 0, 0, 255));
        assert_eq!(tools.style.stroke_width, 3.0);
        assert_eq!(tools.polygon_sides(), 5);
    }

    #[test]
    fn test_out_of_range_values_are_normalized() {
        let config = AppConfig {
            color: "chartreuse".to_string(),
            polygon_sides: 40,
            ..AppConfig::default()
        };
        let tools = config.tool_settings();
        assert_eq!(tools.style.stroke_color, SerializableColor::black());
        assert_eq!(tools.polygon_sides(), 12);
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, AppError::Json { .. }));
        assert!(err.to_string().contains("config.json"));
    }
}
