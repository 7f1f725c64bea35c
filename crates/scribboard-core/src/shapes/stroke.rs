//! Freehand stroke element.

use super::{bounds_of, points_finite, ElementId, ElementTrait, SerializableColor};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand pen stroke (ordered series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ElementId,
    /// Stroke color.
    pub color: SerializableColor,
    /// Points in drawing order.
    pub points: Vec<Point>,
}

impl Stroke {
    /// Create a stroke starting at a single point.
    pub fn new(start: Point, color: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), vec![start], color)
    }

    /// Create a stroke from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), points, color)
    }

    pub(crate) fn with_id(id: ElementId, points: Vec<Point>, color: SerializableColor) -> Self {
        Self { id, color, points }
    }

    /// Append a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A stroke with a single point is a click without a drag.
    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }
}

impl ElementTrait for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> SerializableColor {
        self.color
    }

    fn bounds(&self) -> Rect {
        bounds_of(&self.points).unwrap_or(Rect::ZERO)
    }

    fn is_complete(&self) -> bool {
        !self.points.is_empty() && points_finite(&self.points)
    }
}
