//! Ellipse element (drawn as a circle around its center).

use super::{points_finite, ElementId, ElementTrait, SerializableColor};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by its center and a point on its edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ElementId,
    /// Outline color.
    pub color: SerializableColor,
    /// Center point (where the drag started).
    pub center: Point,
    /// A point on the outline (where the drag ended).
    pub edge: Point,
}

impl Ellipse {
    /// Create a new ellipse from center and edge point.
    pub fn new(center: Point, edge: Point, color: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), center, edge, color)
    }

    pub(crate) fn with_id(id: ElementId, center: Point, edge: Point, color: SerializableColor) -> Self {
        Self {
            id,
            color,
            center,
            edge,
        }
    }

    /// Euclidean distance from center to edge.
    pub fn radius(&self) -> f64 {
        self.center.distance(self.edge)
    }
}

impl ElementTrait for Ellipse {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> SerializableColor {
        self.color
    }

    fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn is_complete(&self) -> bool {
        points_finite([&self.center, &self.edge])
    }
}
