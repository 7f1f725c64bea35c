//! Renderer trait abstraction.

use crate::pipeline::DisplayList;
use kurbo::Size;
use peniko::Color;
use scribboard_core::WhiteboardConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Failed to load font {path}: {reason}")]
    FontLoad { path: PathBuf, reason: String },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Visual parameters shared by every frame of a whiteboard.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    /// Canvas size in pixels.
    pub size: Size,
    /// Background color (for clearing).
    pub background_color: Color,
    /// Line width for strokes, outlines and arrows.
    pub stroke_width: f64,
    /// Text label size in pixels.
    pub font_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&WhiteboardConfig::default())
    }
}

impl RenderStyle {
    /// Create a style for a canvas of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Derive the style from a whiteboard's configuration.
    pub fn from_config(config: &WhiteboardConfig) -> Self {
        Self {
            size: config.size(),
            background_color: config.background_color.into(),
            stroke_width: config.stroke_width,
            font_size: config.font_size,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the line width.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set the text size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }
}

/// Trait for rendering backends.
///
/// A backend receives the complete display list for a frame and replays it
/// in order; later commands paint over earlier ones.
pub trait Renderer {
    /// Replay a display list onto the backend's surface.
    fn draw(&mut self, list: &DisplayList);

    /// Surface size in pixels.
    fn size(&self) -> Size;
}
