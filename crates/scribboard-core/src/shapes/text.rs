//! Text label element.

use super::{points_finite, ElementId, ElementTrait, SerializableColor};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single line of text whose baseline starts at `anchor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub(crate) id: ElementId,
    /// Glyph color.
    pub color: SerializableColor,
    /// Baseline origin.
    pub anchor: Point,
    /// Label content.
    pub text: String,
}

impl TextLabel {
    pub fn new(anchor: Point, text: impl Into<String>, color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            color,
            anchor,
            text: text.into(),
        }
    }
}

impl ElementTrait for TextLabel {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> SerializableColor {
        self.color
    }

    // Glyph extents depend on the font, which only the renderer knows.
    fn bounds(&self) -> Rect {
        Rect::from_points(self.anchor, self.anchor)
    }

    fn is_complete(&self) -> bool {
        !self.text.is_empty() && points_finite([&self.anchor])
    }
}
