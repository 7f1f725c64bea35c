//! Whiteboard initialization settings.

use crate::history::{DEFAULT_HISTORY_LIMIT, MIN_HISTORY_LIMIT};
use crate::shapes::SerializableColor;
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest accepted canvas width or height, in pixels.
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings read once when a whiteboard is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    /// Human-readable title; also the basis of the export filename.
    pub title: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub background_color: SerializableColor,
    /// Tool active when the canvas opens.
    pub initial_tool: ToolKind,
    /// Color active when the canvas opens.
    pub initial_color: SerializableColor,
    /// Line width for strokes and outlines.
    pub stroke_width: f64,
    /// Text label size in pixels.
    pub font_size: f64,
    /// Maximum number of undo snapshots (`null` = unbounded).
    pub history_limit: Option<usize>,
    /// TrueType/OpenType font used for text labels.
    pub font_path: Option<PathBuf>,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            title: "Whiteboard".to_string(),
            width: 800,
            height: 600,
            background_color: SerializableColor::white(),
            initial_tool: ToolKind::Pen,
            initial_color: SerializableColor::black(),
            stroke_width: 2.0,
            font_size: 16.0,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            font_path: None,
        }
    }
}

impl WhiteboardConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded whiteboard config from {}", path.display());
        Ok(config)
    }

    /// Check values the engine cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let dimension_ok = |d: u32| (1..=MAX_CANVAS_DIMENSION).contains(&d);
        if !(dimension_ok(self.width) && dimension_ok(self.height)) {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "stroke_width",
                value: self.stroke_width,
            });
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "font_size",
                value: self.font_size,
            });
        }
        if let Some(limit) = self.history_limit {
            if limit < MIN_HISTORY_LIMIT {
                return Err(ConfigError::InvalidValue {
                    field: "history_limit",
                    value: limit as f64,
                });
            }
        }
        Ok(())
    }

    pub fn size(&self) -> kurbo::Size {
        kurbo::Size::new(self.width as f64, self.height as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = WhiteboardConfig::from_json(r##"{"title": "Sprint retro", "initial_tool": "arrow"}"##)
            .unwrap();
        assert_eq!(config.title, "Sprint retro");
        assert_eq!(config.initial_tool, ToolKind::Arrow);
        assert_eq!(config.width, 800);
        assert_eq!(config.background_color, SerializableColor::white());
        assert_eq!(config.history_limit, Some(DEFAULT_HISTORY_LIMIT));
    }

    #[test]
    fn test_colors_parse_from_hex() {
        let config = WhiteboardConfig::from_json(
            r##"{"background_color": "#102030", "initial_color": "#f00"}"##,
        )
        .unwrap();
        assert_eq!(config.background_color, SerializableColor::rgb(0x10, 0x20, 0x30));
        assert_eq!(config.initial_color, SerializableColor::rgb(255, 0, 0));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            WhiteboardConfig::from_json(r#"{"width": 0}"#),
            Err(ConfigError::InvalidSize { .. })
        ));
        assert!(matches!(
            WhiteboardConfig::from_json(r#"{"stroke_width": -1.0}"#),
            Err(ConfigError::InvalidValue { field: "stroke_width", .. })
        ));
        assert!(matches!(
            WhiteboardConfig::from_json(r##"{"background_color": "blue"}"##),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_canvas() {
        assert!(matches!(
            WhiteboardConfig::from_json(r#"{"width": 100000, "height": 600}"#),
            Err(ConfigError::InvalidSize { width: 100000, .. })
        ));
        assert!(matches!(
            WhiteboardConfig::from_json(r#"{"width": 4294967295, "height": 4294967295}"#),
            Err(ConfigError::InvalidSize { .. })
        ));
        assert!(WhiteboardConfig::from_json(r#"{"width": 16384, "height": 16384}"#).is_ok());
    }

    #[test]
    fn test_history_limit_must_leave_room_to_undo() {
        for limit in [0, 1] {
            let json = format!(r#"{{"history_limit": {limit}}}"#);
            assert!(matches!(
                WhiteboardConfig::from_json(&json),
                Err(ConfigError::InvalidValue { field: "history_limit", .. })
            ));
        }
        let config = WhiteboardConfig::from_json(r#"{"history_limit": 2}"#).unwrap();
        assert_eq!(config.history_limit, Some(MIN_HISTORY_LIMIT));
        assert_eq!(WhiteboardConfig::from_json(r#"{"history_limit": null}"#).unwrap().history_limit, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "Board", "width": 320, "height": 240}}"#).unwrap();

        let config = WhiteboardConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "Board");
        assert_eq!(config.size(), kurbo::Size::new(320.0, 240.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = WhiteboardConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
