//! Rectangle element.

use super::{points_finite, ElementId, ElementTrait, SerializableColor};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle outline spanned by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    /// Outline color.
    pub color: SerializableColor,
    /// Corner where the drag started.
    pub corner1: Point,
    /// Corner where the drag ended.
    pub corner2: Point,
}

impl Rectangle {
    /// Create a new rectangle from two corners.
    pub fn new(corner1: Point, corner2: Point, color: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), corner1, corner2, color)
    }

    pub(crate) fn with_id(
        id: ElementId,
        corner1: Point,
        corner2: Point,
        color: SerializableColor,
    ) -> Self {
        Self {
            id,
            color,
            corner1,
            corner2,
        }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.corner1, self.corner2)
    }

    pub fn width(&self) -> f64 {
        (self.corner2.x - self.corner1.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.corner2.y - self.corner1.y).abs()
    }
}

impl ElementTrait for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> SerializableColor {
        self.color
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn is_complete(&self) -> bool {
        points_finite([&self.corner1, &self.corner2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_in_any_order() {
        let rect = Rectangle::new(
            Point::new(50.0, 40.0),
            Point::new(5.0, 5.0),
            SerializableColor::black(),
        );
        assert_eq!(rect.as_rect(), Rect::new(5.0, 5.0, 50.0, 40.0));
        assert!((rect.width() - 45.0).abs() < f64::EPSILON);
        assert!((rect.height() - 35.0).abs() < f64::EPSILON);
    }
}
