//! Scribboard Core Library
//!
//! Element model, tool state machine, pointer sequencing and linear undo
//! history for the Scribboard whiteboard. Rendering lives in
//! `scribboard-render`.

pub mod canvas;
pub mod config;
pub mod history;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod tools;

pub use canvas::{EventOutcome, Whiteboard};
pub use config::{ConfigError, ConfigResult, WhiteboardConfig};
pub use history::{HistoryManager, DEFAULT_HISTORY_LIMIT, MIN_HISTORY_LIMIT};
pub use input::{PointerAction, PointerEvent, PointerInputController};
pub use scene::Scene;
pub use shapes::{Element, ElementId, ElementTrait, SerializableColor};
pub use tools::{DrawSession, ToolKind, ToolManager, ToolState};

// Geometry types appear throughout the public API.
pub use kurbo::{Point, Rect, Size};
