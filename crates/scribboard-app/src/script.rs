//! Replay scripts: the host UI's event stream, recorded as JSON.

use scribboard_core::{SerializableColor, ToolKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One host event, in the order the UI would deliver it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// The canvas moved on screen; later pointer positions are client space.
    CanvasOrigin { x: f64, y: f64 },
    SelectTool { tool: ToolKind },
    SetColor { color: SerializableColor },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave,
    /// Answer a pending text request.
    Text { text: String },
    /// Dismiss a pending text request.
    CancelText,
    Undo,
    Redo,
    Clear,
    /// Write the current scene as PNG plus scene JSON.
    Export {
        /// File stem override; defaults to the whiteboard title.
        #[serde(default)]
        name: Option<String>,
    },
}

/// A recorded session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> crate::AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| crate::AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_json(&json)?;
        log::info!("Loaded {} events from {}", script.events.len(), path.display());
        Ok(script)
    }

    /// Whether the script asks for at least one export.
    pub fn has_export(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, ScriptEvent::Export { .. }))
    }
}
