//! Arrow element.

use super::{points_finite, ElementId, ElementTrait, SerializableColor};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of each arrowhead wing.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;

/// Angle between the shaft and each arrowhead wing.
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

/// A straight arrow from tail to head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ElementId,
    /// Line color.
    pub color: SerializableColor,
    /// Start point.
    pub tail: Point,
    /// End point (where the arrowhead points).
    pub head: Point,
}

impl Arrow {
    /// Create a new arrow.
    pub fn new(tail: Point, head: Point, color: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), tail, head, color)
    }

    pub(crate) fn with_id(id: ElementId, tail: Point, head: Point, color: SerializableColor) -> Self {
        Self {
            id,
            color,
            tail,
            head,
        }
    }

    /// Angle of the shaft in radians, `atan2(dy, dx)`.
    pub fn angle(&self) -> f64 {
        (self.head.y - self.tail.y).atan2(self.head.x - self.tail.x)
    }

    /// Get the length of the arrow shaft.
    pub fn length(&self) -> f64 {
        self.tail.distance(self.head)
    }

    /// Endpoints of the two arrowhead wings.
    pub fn wings(&self) -> (Point, Point) {
        arrow_wings(self.tail, self.head)
    }
}

/// Arrowhead wing endpoints for a shaft from `tail` to `head`.
///
/// Each wing ends at `head - 15 * (cos(angle ∓ 30°), sin(angle ∓ 30°))`
/// where `angle = atan2(dy, dx)`.
pub fn arrow_wings(tail: Point, head: Point) -> (Point, Point) {
    let angle = (head.y - tail.y).atan2(head.x - tail.x);
    let wing = |a: f64| head - Vec2::new(a.cos(), a.sin()) * ARROW_HEAD_LENGTH;
    (wing(angle - ARROW_HEAD_ANGLE), wing(angle + ARROW_HEAD_ANGLE))
}

impl ElementTrait for Arrow {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> SerializableColor {
        self.color
    }

    fn bounds(&self) -> Rect {
        let (left, right) = self.wings();
        Rect::from_points(self.tail, self.head)
            .union_pt(left)
            .union_pt(right)
    }

    fn is_complete(&self) -> bool {
        points_finite([&self.tail, &self.head])
    }
}
